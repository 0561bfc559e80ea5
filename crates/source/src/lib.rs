//! Coloring page sources for DoodleDream
//!
//! A source turns a topic such as "a dinosaur, moderate detail" into an
//! RGBA image. Preset pages shipped with the app are checked first; anything
//! else goes to a fallback provider (normally an image-generation backend).

mod chain;
mod data_uri;
mod presets;
mod prompt;

pub use chain::{ColoringSource, Unavailable};
pub use data_uri::decode_data_uri;
pub use presets::{PRESET_TOPICS, PresetLibrary};
pub use prompt::{Complexity, MAX_TOPIC_LEN, validate_topic};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid image data: {0}")]
    Decode(String),

    #[error("No image available: {0}")]
    Unavailable(String),
}

/// What to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Free-text topic, e.g. "a friendly robot"
    pub topic: String,
    /// Free-text complexity, e.g. "simple", "moderate", "intricate"
    pub complexity: String,
}

impl ImageRequest {
    pub fn new(topic: impl Into<String>, complexity: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            complexity: complexity.into(),
        }
    }
}

/// Trait for coloring page providers
#[allow(async_fn_in_trait)]
pub trait ImageProvider {
    /// Produce an image for the request
    async fn fetch(&mut self, request: &ImageRequest) -> Result<image::RgbaImage, SourceError>;
}
