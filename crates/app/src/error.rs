use std::path::PathBuf;

use doodle_config::ConfigError;
use doodle_ipc::IpcError;
use doodle_painting::PaintError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Paint(#[from] PaintError),

    #[error("Invalid script: {0}")]
    Script(#[from] IpcError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Export {
        path: PathBuf,
        source: image::ImageError,
    },
}
