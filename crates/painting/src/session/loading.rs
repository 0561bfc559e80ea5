//! Asynchronous image loads
//!
//! Loading a coloring page is the one operation that completes later. The
//! caller takes a [`PendingLoad`] before starting the fetch and hands the
//! result to it when the fetch finishes. The ticket holds only a weak
//! reference, so a session dropped in the meantime is never touched, and
//! every new load supersedes older ones still in flight.

use std::fmt::Display;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::error::PaintError;

use super::surface_ops::LoadStatus;
use super::PaintSession;

/// A session shared between the event loop and load completions
pub type SharedSession = Arc<Mutex<PaintSession>>;

/// Result of handing a finished fetch to its [`PendingLoad`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Canvas replaced and snapshot pushed
    Applied,
    /// Stroke in progress; image applied when it ends
    Queued,
    /// The fetch (or the image) failed; canvas and history untouched
    Failed(PaintError),
    /// A newer load was started; this result was dropped
    Superseded,
    /// The session is gone; nothing happened
    Detached,
}

/// Ticket for one in-flight image load
#[derive(Debug)]
pub struct PendingLoad {
    session: Weak<Mutex<PaintSession>>,
    epoch: u64,
}

impl PaintSession {
    /// Wrap the session for sharing with load completions
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Start an image load. Any load already in flight is superseded, and
    /// so is an image an earlier load queued behind the open stroke.
    pub fn begin_load(session: &SharedSession) -> PendingLoad {
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        guard.load_epoch += 1;
        if guard.queued_image.take().is_some() {
            debug!("Dropped image queued by an earlier load");
        }
        debug!("Image load {} started", guard.load_epoch);
        PendingLoad {
            session: Arc::downgrade(session),
            epoch: guard.load_epoch,
        }
    }
}

impl PendingLoad {
    /// Apply a finished fetch to the session, if it is still around and
    /// this is still the latest load.
    ///
    /// Replacement and history push happen under one lock, so observers see
    /// either the old canvas or the new one.
    pub fn complete<E: Display>(self, result: Result<RgbaImage, E>) -> LoadOutcome {
        let Some(session) = self.session.upgrade() else {
            debug!("Image load {} finished after session teardown", self.epoch);
            return LoadOutcome::Detached;
        };
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);

        if guard.load_epoch != self.epoch {
            debug!(
                "Image load {} superseded by load {}",
                self.epoch, guard.load_epoch
            );
            return LoadOutcome::Superseded;
        }

        let image = match result {
            Ok(image) => image,
            Err(e) => {
                warn!("Image load {} failed: {}", self.epoch, e);
                return LoadOutcome::Failed(PaintError::ImageLoad(e.to_string()));
            }
        };

        match guard.load_image(image) {
            Ok(LoadStatus::Applied) => LoadOutcome::Applied,
            Ok(LoadStatus::Queued) => LoadOutcome::Queued,
            Err(e) => LoadOutcome::Failed(e),
        }
    }

    /// Whether the session this load targets still exists
    pub fn is_attached(&self) -> bool {
        self.session.strong_count() > 0
    }
}
