//! Whole-canvas operations: clear, image load, export, resize

use image::RgbaImage;
use tracing::{debug, info};

use crate::constants::BACKGROUND;
use crate::error::PaintError;
use crate::surface::{Snapshot, fit_centered};

use super::{PaintSession, SessionState};

/// What `load_image` did with the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Canvas replaced and snapshot pushed
    Applied,
    /// A stroke is open; the image is applied when it ends
    Queued,
}

impl PaintSession {
    /// Clear the canvas to white and push a snapshot (undoable)
    pub fn clear(&mut self) {
        if self.state == SessionState::Stroking {
            self.end_stroke();
        }
        self.buffer.clear(BACKGROUND);
        self.push_snapshot();
        debug!("Canvas cleared");
    }

    /// Replace the canvas with `image`, fitted and centered on white
    ///
    /// The image is scaled to fit with its aspect ratio preserved. While a
    /// stroke is open the image is held and applied right after the stroke's
    /// own snapshot. An empty image is refused without touching the canvas.
    pub fn load_image(&mut self, image: RgbaImage) -> Result<LoadStatus, PaintError> {
        let (src_w, src_h) = image.dimensions();
        if src_w == 0 || src_h == 0 {
            return Err(PaintError::ImageLoad(format!(
                "source image is empty ({}x{})",
                src_w, src_h
            )));
        }

        if self.state == SessionState::Stroking {
            debug!("load_image: stroke open, queueing {}x{} image", src_w, src_h);
            self.queued_image = Some(image);
            return Ok(LoadStatus::Queued);
        }

        let (x, y, w, h) = fit_centered(src_w, src_h, self.buffer.width(), self.buffer.height());
        self.buffer.clear(BACKGROUND);
        self.buffer.draw_image(&image, x, y, w, h);
        self.push_snapshot();
        info!(
            "Loaded {}x{} image at ({:.1}, {:.1}) {:.1}x{:.1}",
            src_w, src_h, x, y, w, h
        );
        Ok(LoadStatus::Applied)
    }

    /// Current pixels for an export sink. Encoding is up to the caller.
    ///
    /// During a stroke this includes the stroke drawn so far.
    pub fn export(&self) -> Snapshot {
        self.buffer.snapshot()
    }

    /// Resize the canvas. The canvas is cleared to white and history restarts
    /// with the blank canvas as its floor, since older snapshots no longer fit.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PaintError> {
        if self.state == SessionState::Stroking {
            self.rasterizer.end();
            self.state = SessionState::Idle;
        }
        self.buffer.resize_and_clear(width, height)?;
        self.history.reset(self.buffer.snapshot());
        self.queued_image = None;
        info!("Canvas resized to {}x{}, history reset", width, height);
        Ok(())
    }
}
