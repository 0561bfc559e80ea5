use crate::types::Rgba;

/// Background color of every canvas. The eraser paints this.
pub const BACKGROUND: Rgba = Rgba::WHITE;

/// Default file name for a saved drawing
pub const DEFAULT_EXPORT_NAME: &str = "my-masterpiece.png";
