//! Error types for the UI message protocol.

/// Errors from reading or writing protocol messages.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Malformed message JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid message format: {0}")]
    InvalidFormat(String),
}
