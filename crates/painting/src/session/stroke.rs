//! Pointer gestures: strokes and fills

use tracing::{debug, warn};

use doodle_ipc::{PointerEvent, SurfaceRect};

use crate::brush::StrokePoint;
use crate::error::PaintError;
use crate::fill::flood_fill;
use crate::mapping::BufferPoint;

use super::{PaintSession, SessionState};

impl PaintSession {
    /// Pointer went down at `point`
    ///
    /// Brush and eraser open a stroke (no history push yet). The bucket
    /// fills immediately and pushes a snapshot. A pointer-down that arrives
    /// while a stroke is still open closes that stroke first.
    pub fn pointer_down(&mut self, point: BufferPoint) -> Result<(), PaintError> {
        if self.state == SessionState::Stroking {
            debug!("pointer_down: closing stroke left open by a missed pointer-up");
            self.end_stroke();
        }

        if self.tools.tool().is_stroking() {
            self.begin_stroke(point);
            Ok(())
        } else {
            self.fill_at(point).map(|_| ())
        }
    }

    /// Open a stroke at `point` with the current tool's color and size
    pub fn begin_stroke(&mut self, point: BufferPoint) {
        if self.state == SessionState::Stroking {
            self.end_stroke();
        }
        let color = self.tools.draw_color();
        let size = self.tools.brush_size();
        debug!(
            "Begin stroke at ({}, {}), size={}, color={:?}",
            point.x, point.y, size, color
        );
        self.rasterizer
            .begin(StrokePoint::from((point.x, point.y)), color, size);
        self.state = SessionState::Stroking;
    }

    /// Extend the open stroke to `point`. The buffer changes immediately;
    /// history does not. Ignored while idle.
    pub fn continue_stroke(&mut self, point: BufferPoint) {
        if self.state != SessionState::Stroking {
            return;
        }
        let region = self
            .rasterizer
            .continue_to(&mut self.buffer, StrokePoint::from((point.x, point.y)));
        if let Some((x, y, w, h)) = region {
            debug!("  stroke segment -> affected region: ({}, {}) {}x{}", x, y, w, h);
        }
    }

    /// Close the open stroke and push its result to history.
    /// Ignored while idle. Applies any image that arrived mid-stroke.
    pub fn end_stroke(&mut self) {
        if self.state != SessionState::Stroking {
            return;
        }
        let segments = self.rasterizer.end();
        self.state = SessionState::Idle;
        self.push_snapshot();
        debug!("End stroke ({} segments)", segments);

        if let Some(image) = self.queued_image.take() {
            debug!("Applying image queued during stroke");
            if let Err(e) = self.load_image(image) {
                warn!("Queued image could not be applied: {}", e);
            }
        }
    }

    /// Flood fill from `point` with the current color and push a snapshot.
    ///
    /// Returns the number of pixels changed. Filling a region that already
    /// has the color changes nothing and pushes nothing. An out-of-bounds
    /// seed returns [`PaintError::OutOfBounds`] and changes nothing.
    pub fn fill_at(&mut self, point: BufferPoint) -> Result<usize, PaintError> {
        if self.state == SessionState::Stroking {
            self.end_stroke();
        }
        let color = self.tools.color().to_rgba();
        let filled = flood_fill(&mut self.buffer, point.x, point.y, color)?;
        if filled > 0 {
            self.push_snapshot();
        }
        Ok(filled)
    }

    /// Feed one pointer/touch event in client space.
    ///
    /// Down and move are mapped through the surface rectangle. A bucket
    /// click outside the buffer is reported as `OutOfBounds`; strokes simply
    /// clip. Up and leave end the stroke.
    pub fn handle_pointer(
        &mut self,
        rect: &SurfaceRect,
        event: &PointerEvent,
    ) -> Result<(), PaintError> {
        let mapper = self.mapper();
        match event {
            PointerEvent::Down { source } => match mapper.map_source(source, rect) {
                Some(point) => self.pointer_down(point),
                None => {
                    warn!("pointer down without a usable position, ignoring");
                    Ok(())
                }
            },
            PointerEvent::Move { source } => {
                if let Some(point) = mapper.map_source(source, rect) {
                    self.continue_stroke(point);
                }
                Ok(())
            }
            PointerEvent::Up | PointerEvent::Leave => {
                self.end_stroke();
                Ok(())
            }
        }
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.state == SessionState::Stroking
    }
}
