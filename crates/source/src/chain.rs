//! Preset-first source chain

use tracing::{info, warn};

use crate::presets::PresetLibrary;
use crate::prompt::validate_topic;
use crate::{ImageProvider, ImageRequest, SourceError};

/// Fallback used when no generation backend is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl ImageProvider for Unavailable {
    async fn fetch(&mut self, request: &ImageRequest) -> Result<image::RgbaImage, SourceError> {
        Err(SourceError::Unavailable(format!(
            "no preset page for \"{}\" and no generator configured",
            request.topic
        )))
    }
}

/// Validates the topic, tries a preset page, then the fallback provider
#[derive(Debug, Clone)]
pub struct ColoringSource<F = Unavailable> {
    presets: PresetLibrary,
    fallback: F,
}

impl ColoringSource<Unavailable> {
    pub fn presets_only(presets: PresetLibrary) -> Self {
        Self::new(presets, Unavailable)
    }
}

impl<F: ImageProvider> ColoringSource<F> {
    pub fn new(presets: PresetLibrary, fallback: F) -> Self {
        Self { presets, fallback }
    }

    pub fn presets(&self) -> &PresetLibrary {
        &self.presets
    }
}

impl<F: ImageProvider> ImageProvider for ColoringSource<F> {
    async fn fetch(&mut self, request: &ImageRequest) -> Result<image::RgbaImage, SourceError> {
        let topic = validate_topic(&request.topic)?;
        let request = ImageRequest::new(topic, request.complexity.trim());

        if let Some(path) = self.presets.resolve(&request) {
            match self.presets.load(&path).await {
                Ok(image) => {
                    info!("Using preset page {}", path.display());
                    return Ok(image);
                }
                Err(e) => warn!("Preset page {} unusable: {}", path.display(), e),
            }
        }

        info!("Requesting page for \"{}\" ({})", request.topic, request.complexity);
        self.fallback.fetch(&request).await
    }
}
