//! Bounded snapshot history
//!
//! A sliding window of full-buffer snapshots, oldest first. The first
//! snapshot is the floor state and is never undone past. There is no redo:
//! once a snapshot is discarded by undo it is gone.

use std::collections::VecDeque;

use tracing::debug;

use crate::surface::Snapshot;

/// Sliding window of buffer snapshots
#[derive(Debug)]
pub struct HistoryManager {
    /// Snapshots, oldest at the front
    snapshots: VecDeque<Snapshot>,
    /// Maximum number of snapshots kept (at least 1)
    capacity: usize,
}

impl HistoryManager {
    /// Create an empty history holding at most `capacity` snapshots
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a history whose floor is `initial`
    pub fn with_initial(capacity: usize, initial: Snapshot) -> Self {
        let mut history = Self::new(capacity);
        history.push(initial);
        history
    }

    /// Append a snapshot, evicting the oldest when over capacity.
    /// Returns the number of snapshots evicted.
    pub fn push(&mut self, snapshot: Snapshot) -> usize {
        self.snapshots.push_back(snapshot);
        let mut evicted = 0;
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            debug!("History full, evicted {} oldest snapshot(s)", evicted);
        }
        evicted
    }

    /// Discard the newest snapshot and return the one now current.
    ///
    /// With fewer than two snapshots there is nothing to undo and None is
    /// returned without changing anything.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.snapshots.len() < 2 {
            debug!("Undo: at history floor");
            return None;
        }
        self.snapshots.pop_back();
        self.snapshots.back()
    }

    /// The newest snapshot
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    /// Drop everything and start over with `floor` as the only snapshot
    pub fn reset(&mut self, floor: Snapshot) {
        self.snapshots.clear();
        self.snapshots.push_back(floor);
    }

    /// Whether `undo` would do anything
    pub fn can_undo(&self) -> bool {
        self.snapshots.len() >= 2
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Heap bytes held by snapshot pixel data
    pub fn byte_len(&self) -> usize {
        self.snapshots.iter().map(Snapshot::byte_len).sum()
    }
}
