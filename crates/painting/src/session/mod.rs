//! Paint session: one canvas and everything that edits it
//!
//! This module connects:
//! - Pointer input (already mapped to buffer space, or raw via `handle_pointer`)
//! - Tool state (brush, bucket, eraser; color; size)
//! - Stroke rasterizer and flood fill (pixel writes)
//! - Bounded history (snapshot on every completed stroke, fill, clear, load)
//!
//! The buffer is mutated live during a stroke. History only sees the result
//! once the stroke ends.

mod commands;
mod loading;
mod stroke;
mod surface_ops;
mod undo;

use image::RgbaImage;
use tracing::info;

use doodle_config::EngineConfig;

use crate::brush::StrokeRasterizer;
use crate::error::PaintError;
use crate::history::HistoryManager;
use crate::mapping::CoordinateMapper;
use crate::surface::PixelBuffer;
use crate::types::{Rgb, Tool, ToolState};

pub use commands::CommandEffect;
pub use loading::{LoadOutcome, PendingLoad, SharedSession};
pub use surface_ops::LoadStatus;

/// Gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Between pointer-down and pointer-up of a brush or eraser gesture
    Stroking,
}

/// A canvas editing session
///
/// Owns the pixel buffer, tool state and history. Dropping the session drops
/// all three together.
pub struct PaintSession {
    /// Live pixels
    pub(crate) buffer: PixelBuffer,
    /// Snapshot history; floor is the blank canvas
    pub(crate) history: HistoryManager,
    /// Current tool, color and brush size
    pub(crate) tools: ToolState,
    /// Path state for the open stroke
    pub(crate) rasterizer: StrokeRasterizer,
    pub(crate) state: SessionState,
    /// Image that arrived mid-stroke, applied when the stroke ends
    pub(crate) queued_image: Option<RgbaImage>,
    /// Incremented for every image load started; stale completions are dropped
    pub(crate) load_epoch: u64,
}

impl PaintSession {
    /// Create a session with a white `width` x `height` canvas and a history
    /// holding at most `history_capacity` snapshots (including the blank one)
    pub fn new(width: u32, height: u32, history_capacity: usize) -> Result<Self, PaintError> {
        let buffer = PixelBuffer::new(width, height)?;
        let history = HistoryManager::with_initial(history_capacity, buffer.snapshot());
        info!(
            "Paint session created: {}x{}, history capacity {}",
            width,
            height,
            history.capacity()
        );
        Ok(Self {
            buffer,
            history,
            tools: ToolState::default(),
            rasterizer: StrokeRasterizer::new(),
            state: SessionState::Idle,
            queued_image: None,
            load_epoch: 0,
        })
    }

    /// Create a session from engine configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self, PaintError> {
        let mut session = Self::new(
            config.canvas.width,
            config.canvas.height,
            config.history_capacity,
        )?;
        let color = Rgb::from_hex(&config.brush.default_color)?;
        session.tools = ToolState::new(Tool::Brush, color, config.brush.default_size);
        Ok(session)
    }

    /// Get the canvas width
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Get the canvas height
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Read-only view of the live buffer
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// Switch the active tool
    pub fn select_tool(&mut self, tool: Tool) {
        self.tools.select_tool(tool);
    }

    /// Pick a color; switches the eraser back to the brush
    pub fn select_color(&mut self, color: Rgb) {
        self.tools.select_color(color);
    }

    /// Set the brush diameter in buffer pixels
    pub fn set_brush_size(&mut self, size: u32) {
        self.tools.set_brush_size(size);
    }

    /// Mapper for the current buffer dimensions
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.buffer.width(), self.buffer.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::BufferPoint;
    use crate::types::Rgba;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn test_session_creation() {
        let session = PaintSession::new(256, 128, 11).unwrap();
        assert_eq!(session.width(), 256);
        assert_eq!(session.height(), 128);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.history().len(), 1);
        assert!(session.buffer().pixels().iter().all(|p| *p == Rgba::WHITE));
    }

    #[test]
    fn test_session_from_config() {
        let mut config = EngineConfig::default();
        config.canvas.width = 64;
        config.canvas.height = 32;
        config.brush.default_color = "#000000".to_string();
        config.brush.default_size = 20;

        let session = PaintSession::from_config(&config).unwrap();
        assert_eq!(session.width(), 64);
        assert_eq!(session.tools().color(), Rgb::BLACK);
        assert_eq!(session.tools().brush_size(), 20);
        assert_eq!(session.history().capacity(), 11);
    }

    #[test]
    fn test_session_from_config_bad_color() {
        let mut config = EngineConfig::default();
        config.brush.default_color = "red".to_string();
        assert!(matches!(
            PaintSession::from_config(&config),
            Err(PaintError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_fill_then_undo_scenario() {
        let mut session = PaintSession::new(100, 100, 11).unwrap();
        session.select_tool(Tool::Bucket);
        session.select_color(RED);

        session.pointer_down(BufferPoint::new(50, 50)).unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session
            .buffer()
            .pixels()
            .iter()
            .all(|p| *p == RED.to_rgba()));
        assert_eq!(session.history().len(), 2);

        assert!(session.undo());
        assert!(session.buffer().pixels().iter().all(|p| *p == Rgba::WHITE));
    }

    #[test]
    fn test_stroke_scenario() {
        let mut session = PaintSession::new(100, 100, 11).unwrap();
        session.select_color(Rgb::BLACK);
        session.set_brush_size(10);

        session.pointer_down(BufferPoint::new(0, 0)).unwrap();
        assert_eq!(session.state(), SessionState::Stroking);
        session.continue_stroke(BufferPoint::new(10, 10));
        session.end_stroke();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.buffer().get_pixel(5, 5), Ok(Rgba::BLACK));
        assert_eq!(session.buffer().get_pixel(50, 50), Ok(Rgba::WHITE));
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_eraser_paints_white_over_color() {
        let mut session = PaintSession::new(40, 40, 11).unwrap();
        session.select_tool(Tool::Bucket);
        session.select_color(RED);
        session.pointer_down(BufferPoint::new(0, 0)).unwrap();

        session.select_tool(Tool::Eraser);
        session.pointer_down(BufferPoint::new(5, 20)).unwrap();
        session.continue_stroke(BufferPoint::new(35, 20));
        session.end_stroke();

        assert_eq!(session.buffer().get_pixel(20, 20), Ok(Rgba::WHITE));
        assert_eq!(session.buffer().get_pixel(20, 2), Ok(RED.to_rgba()));
    }
}
