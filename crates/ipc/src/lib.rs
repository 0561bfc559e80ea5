//! IPC message protocol for DoodleDream
//!
//! Defines the commands and pointer events the UI sends to the paint engine
//! and the notifications it gets back. Scripts for the headless driver are
//! plain JSON arrays of [`UiToEngine`] messages.

mod commands;
mod error;
mod input;
mod messages;

pub use commands::*;
pub use error::IpcError;
pub use input::*;
pub use messages::*;

/// Parse a JSON array of UI messages.
pub fn parse_script(text: &str) -> Result<Vec<UiToEngine>, IpcError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(IpcError::InvalidFormat(
            "script must be a JSON array of messages".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Serialize an engine notification for the UI.
pub fn encode_event(event: &EngineToUi) -> Result<String, IpcError> {
    Ok(serde_json::to_string(event)?)
}
