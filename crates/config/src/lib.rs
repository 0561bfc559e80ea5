//! Shared configuration for DoodleDream
//!
//! This crate is the single source of truth for canvas dimensions, history
//! depth, brush defaults and the color palette. Every field has a default so
//! a partial JSON file only needs to name what it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default canvas width in buffer pixels
pub const DEFAULT_WIDTH: u32 = 1024;

/// Default canvas height in buffer pixels
pub const DEFAULT_HEIGHT: u32 = 768;

/// Default history capacity: the blank state plus 10 undoable steps
pub const DEFAULT_HISTORY_CAPACITY: usize = 11;

/// Default brush diameter in buffer pixels
pub const DEFAULT_BRUSH_SIZE: u32 = 10;

/// Smallest brush diameter the UI offers
pub const MIN_BRUSH_SIZE: u32 = 5;

/// Largest brush diameter the UI offers
pub const MAX_BRUSH_SIZE: u32 = 50;

/// Default brush color
pub const DEFAULT_COLOR: &str = "#FF6B6B";

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "DOODLE_CONFIG";

/// The stock palette, in display order
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#FF6B6B", // Red
    "#4ECDC4", // Teal
    "#FFE66D", // Yellow
    "#95E1D3", // Light green
    "#F38181", // Pink
    "#F7D794", // Light orange
    "#778BEB", // Blue
    "#CF6A87", // Purple
    "#596275", // Dark grey
    "#000000", // Black
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Canvas (pixel buffer) configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Buffer width in pixels
    pub width: u32,
    /// Buffer height in pixels
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Brush defaults and the operating range offered to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub default_size: u32,
    pub min_size: u32,
    pub max_size: u32,
    /// Initial color as `#RRGGBB`
    pub default_color: String,
    /// Palette colors as `#RRGGBB`
    pub palette: Vec<String>,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_BRUSH_SIZE,
            min_size: MIN_BRUSH_SIZE,
            max_size: MAX_BRUSH_SIZE,
            default_color: DEFAULT_COLOR.to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl BrushConfig {
    /// Clamp a requested size into the configured range
    pub fn clamp_size(&self, size: u32) -> u32 {
        size.clamp(self.min_size, self.max_size)
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas: CanvasConfig,
    /// Maximum number of snapshots kept, including the blank floor state
    pub history_capacity: usize,
    pub brush: BrushConfig,
    /// Directory holding the preset coloring pages
    pub asset_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            brush: BrushConfig::default(),
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON text and validate it
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Load from the file named by `DOODLE_CONFIG`, or fall back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if self.brush.min_size == 0 || self.brush.min_size > self.brush.max_size {
            return Err(ConfigError::Invalid(format!(
                "brush size range {}..={} is empty",
                self.brush.min_size, self.brush.max_size
            )));
        }
        Ok(())
    }
}
