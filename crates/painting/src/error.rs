use thiserror::Error;

/// Errors from paint engine operations.
///
/// Every operation that returns one of these has left the buffer and history
/// exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaintError {
    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("Snapshot is {actual_width}x{actual_height}, buffer is {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Invalid buffer dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Image load failed: {0}")]
    ImageLoad(String),
}
