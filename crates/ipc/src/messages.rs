//! Message enums exchanged between the UI and the paint engine.

use serde::{Deserialize, Serialize};

use crate::commands::{PaintCommand, ToolKind};
use crate::input::{PointerEvent, SurfaceRect};

/// Messages from the UI to the paint engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToEngine {
    /// Tool, color, history and I/O commands
    Command(PaintCommand),
    /// Pointer input, with the surface rectangle at the time of the event
    Pointer {
        rect: SurfaceRect,
        event: PointerEvent,
    },
}

/// Messages from the paint engine to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngineToUi {
    /// Session created; canvas size and the swatches to offer
    Ready {
        width: u32,
        height: u32,
        palette: Vec<String>,
    },

    /// Tool state after a command
    ToolChanged {
        tool: ToolKind,
        color: String,
        brush_size: u32,
    },

    /// History depth changed (push, undo, clear, load)
    HistoryChanged { snapshots: usize, can_undo: bool },

    /// A coloring page finished loading into the canvas
    ImageLoaded { width: u32, height: u32 },

    /// Export finished
    Exported { path: String },

    /// Error notification for user-facing display
    Error { code: String, message: String },
}
