//! Paint command types for the painting system.

use serde::{Deserialize, Serialize};

/// Drawing tool selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Brush,
    Bucket,
    Eraser,
}

/// Commands for controlling the painting system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PaintCommand {
    /// Switch the active tool
    SelectTool { tool: ToolKind },
    /// Pick a brush color as `#RRGGBB`. Switches Eraser back to Brush.
    SelectColor { color: String },
    /// Set brush diameter in buffer pixels
    SetBrushSize { size: u32 },
    /// Undo the last stroke or fill
    Undo,
    /// Clear the canvas to white (undoable)
    Clear,
    /// Load a coloring page for a topic, e.g. "a friendly dinosaur"
    LoadTopic {
        topic: String,
        #[serde(default)]
        complexity: String,
    },
    /// Load a coloring page delivered inline, e.g. `data:image/png;base64,...`
    LoadImage { data_uri: String },
    /// Export the current canvas to a file
    Export { path: String },
}
