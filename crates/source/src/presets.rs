//! Preset coloring pages shipped with the app

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::prompt::Complexity;
use crate::{ImageProvider, ImageRequest, SourceError};

/// Topics with a ready-made page, checked in this order
pub const PRESET_TOPICS: [&str; 6] = ["dinosaur", "unicorn", "robot", "butterfly", "car", "flower"];

/// Preset pages stored as `<topic>-<little|big|expert>.png` in one directory
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    asset_dir: PathBuf,
}

impl PresetLibrary {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
        }
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    /// Asset path for a request, if its topic mentions a preset
    pub fn resolve(&self, request: &ImageRequest) -> Option<PathBuf> {
        let topic = request.topic.to_lowercase();
        let preset = PRESET_TOPICS.iter().find(|p| topic.contains(*p))?;
        let level = Complexity::from_phrase(&request.complexity);
        Some(
            self.asset_dir
                .join(format!("{}-{}.png", preset, level.asset_suffix())),
        )
    }

    /// Read and decode an asset
    pub async fn load(&self, path: &Path) -> Result<image::RgbaImage, SourceError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            SourceError::Unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let image =
            image::load_from_memory(&bytes).map_err(|e| SourceError::Decode(e.to_string()))?;
        debug!(
            "Loaded preset {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image.to_rgba8())
    }
}

impl ImageProvider for PresetLibrary {
    async fn fetch(&mut self, request: &ImageRequest) -> Result<image::RgbaImage, SourceError> {
        let path = self.resolve(request).ok_or_else(|| {
            SourceError::Unavailable(format!("no preset page for \"{}\"", request.topic))
        })?;
        self.load(&path).await
    }
}
