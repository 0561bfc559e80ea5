//! IPC command handling for the paint session

use tracing::debug;

use doodle_ipc::{EngineToUi, PaintCommand};

use crate::error::PaintError;
use crate::types::Rgb;

use super::PaintSession;

/// What the caller still has to do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEffect {
    /// Handled in full; notifications for the UI
    Applied(Vec<EngineToUi>),
    /// Fetch a coloring page, then complete a [`super::PendingLoad`]
    FetchImage { topic: String, complexity: String },
    /// Decode an inline image, then complete a [`super::PendingLoad`]
    DecodeImage { data_uri: String },
    /// Encode [`PaintSession::export`] to `path`
    Export { path: String },
}

impl PaintSession {
    /// Apply a UI command
    ///
    /// Tool, color, size, undo and clear are handled here. Loading images and
    /// exporting involve external collaborators and are handed back.
    pub fn apply_command(&mut self, command: &PaintCommand) -> Result<CommandEffect, PaintError> {
        debug!("apply_command: {:?}", command);
        let events = match command {
            PaintCommand::SelectTool { tool } => {
                self.select_tool((*tool).into());
                vec![self.tool_event()]
            }
            PaintCommand::SelectColor { color } => {
                let color = Rgb::from_hex(color)?;
                self.select_color(color);
                vec![self.tool_event()]
            }
            PaintCommand::SetBrushSize { size } => {
                self.set_brush_size(*size);
                vec![self.tool_event()]
            }
            PaintCommand::Undo => {
                self.undo();
                vec![self.history_event()]
            }
            PaintCommand::Clear => {
                self.clear();
                vec![self.history_event()]
            }
            PaintCommand::LoadTopic { topic, complexity } => {
                return Ok(CommandEffect::FetchImage {
                    topic: topic.clone(),
                    complexity: complexity.clone(),
                });
            }
            PaintCommand::LoadImage { data_uri } => {
                return Ok(CommandEffect::DecodeImage {
                    data_uri: data_uri.clone(),
                });
            }
            PaintCommand::Export { path } => {
                return Ok(CommandEffect::Export { path: path.clone() });
            }
        };
        Ok(CommandEffect::Applied(events))
    }

    /// Tool state notification
    pub fn tool_event(&self) -> EngineToUi {
        EngineToUi::ToolChanged {
            tool: self.tools.tool().into(),
            color: self.tools.color().to_hex(),
            brush_size: self.tools.brush_size(),
        }
    }

    /// History depth notification
    pub fn history_event(&self) -> EngineToUi {
        EngineToUi::HistoryChanged {
            snapshots: self.history.len(),
            can_undo: self.can_undo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tool;
    use doodle_ipc::ToolKind;

    #[test]
    fn test_select_color_command_switches_eraser() {
        let mut session = PaintSession::new(10, 10, 11).unwrap();
        session
            .apply_command(&PaintCommand::SelectTool {
                tool: ToolKind::Eraser,
            })
            .unwrap();
        let effect = session
            .apply_command(&PaintCommand::SelectColor {
                color: "#4ECDC4".to_string(),
            })
            .unwrap();

        assert_eq!(session.tools().tool(), Tool::Brush);
        assert_eq!(
            effect,
            CommandEffect::Applied(vec![EngineToUi::ToolChanged {
                tool: ToolKind::Brush,
                color: "#4ECDC4".to_string(),
                brush_size: 10,
            }])
        );
    }

    #[test]
    fn test_bad_color_command() {
        let mut session = PaintSession::new(10, 10, 11).unwrap();
        let result = session.apply_command(&PaintCommand::SelectColor {
            color: "blue".to_string(),
        });
        assert!(matches!(result, Err(PaintError::InvalidColor(_))));
    }

    #[test]
    fn test_clear_and_undo_report_history() {
        let mut session = PaintSession::new(10, 10, 11).unwrap();
        let effect = session.apply_command(&PaintCommand::Clear).unwrap();
        assert_eq!(
            effect,
            CommandEffect::Applied(vec![EngineToUi::HistoryChanged {
                snapshots: 2,
                can_undo: true,
            }])
        );

        let effect = session.apply_command(&PaintCommand::Undo).unwrap();
        assert_eq!(
            effect,
            CommandEffect::Applied(vec![EngineToUi::HistoryChanged {
                snapshots: 1,
                can_undo: false,
            }])
        );
    }

    #[test]
    fn test_external_commands_handed_back() {
        let mut session = PaintSession::new(10, 10, 11).unwrap();
        let effect = session
            .apply_command(&PaintCommand::LoadTopic {
                topic: "robot".to_string(),
                complexity: "moderate".to_string(),
            })
            .unwrap();
        assert_eq!(
            effect,
            CommandEffect::FetchImage {
                topic: "robot".to_string(),
                complexity: "moderate".to_string(),
            }
        );

        let effect = session
            .apply_command(&PaintCommand::Export {
                path: "out.png".to_string(),
            })
            .unwrap();
        assert_eq!(
            effect,
            CommandEffect::Export {
                path: "out.png".to_string()
            }
        );
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_inline_image_handed_back() {
        let mut session = PaintSession::new(10, 10, 11).unwrap();
        let effect = session
            .apply_command(&PaintCommand::LoadImage {
                data_uri: "data:image/png;base64,AAAA".to_string(),
            })
            .unwrap();
        assert_eq!(
            effect,
            CommandEffect::DecodeImage {
                data_uri: "data:image/png;base64,AAAA".to_string()
            }
        );
        assert_eq!(session.history().len(), 1);
    }
}
