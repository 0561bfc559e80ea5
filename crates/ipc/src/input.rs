//! Pointer and touch input types.

use serde::{Deserialize, Serialize};

/// Bounding rectangle of the drawing surface in display (client) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Where a pointer event happened, in client space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerSource {
    /// Single mouse pointer
    Mouse { x: f32, y: f32 },
    /// Touch points; only the first is used
    Touch { points: Vec<[f32; 2]> },
}

impl PointerSource {
    /// Client position of the pointer, or of the first touch point
    pub fn primary(&self) -> Option<(f32, f32)> {
        match self {
            Self::Mouse { x, y } => Some((*x, *y)),
            Self::Touch { points } => points.first().map(|p| (p[0], p[1])),
        }
    }
}

/// Gesture boundaries and movement from the pointer/touch event source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { source: PointerSource },
    Move { source: PointerSource },
    Up,
    /// Pointer left the surface; ends a stroke like `Up`
    Leave,
}
