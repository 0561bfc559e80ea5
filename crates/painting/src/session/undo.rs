//! Undo functionality for the paint session

use tracing::{debug, warn};

use super::{PaintSession, SessionState};

impl PaintSession {
    /// Snapshot the live buffer onto history
    pub(crate) fn push_snapshot(&mut self) {
        let evicted = self.history.push(self.buffer.snapshot());
        debug!(
            "Pushed snapshot ({} in history, {} evicted)",
            self.history.len(),
            evicted
        );
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.state == SessionState::Idle && self.history.can_undo()
    }

    /// Undo the last stroke, fill, clear or image load
    ///
    /// Returns true if the buffer was restored, false at the history floor.
    /// Ignored while a stroke is open. The undone state cannot be redone.
    pub fn undo(&mut self) -> bool {
        if self.state == SessionState::Stroking {
            debug!("Undo: ignored during stroke");
            return false;
        }
        let Some(previous) = self.history.undo() else {
            return false;
        };
        // History snapshots always match the buffer size: resize resets history
        if let Err(e) = self.buffer.restore(previous) {
            warn!("Undo could not restore snapshot: {}", e);
            return false;
        }
        debug!("Undo: {} snapshot(s) left", self.history.len());
        true
    }
}
