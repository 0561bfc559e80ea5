//! Images delivered inline as `data:` URIs

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::SourceError;

/// Decode `data:image/<type>;base64,<payload>` into RGBA pixels
pub fn decode_data_uri(uri: &str) -> Result<image::RgbaImage, SourceError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| SourceError::Decode("not a data URI".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| SourceError::Decode("data URI has no payload".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(SourceError::Decode(format!(
            "unsupported data URI encoding: {}",
            header
        )));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| SourceError::Decode(e.to_string()))?;
    let image = image::load_from_memory(&bytes).map_err(|e| SourceError::Decode(e.to_string()))?;
    debug!("Decoded {} image {}x{}", header, image.width(), image.height());
    Ok(image.to_rgba8())
}
