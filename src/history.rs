//! Bounded snapshot history backing single-step undo.
//!
//! Every mutating operation pushes a deep copy of the shape before it changes anything.
//! Undo pops the most recent copy back. The stack keeps at most `MAX_UNDO_HISTORY`
//! snapshots and drops the oldest one when that bound is exceeded.

use crate::constants::MAX_UNDO_HISTORY;
use crate::types::Shape;

/// The state captured before a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The shape as it was
    pub shape: Shape,
    /// Whether a dilation was in effect at capture time
    pub has_dilated: bool,
}

/// Stack of snapshots with a fixed capacity.
#[derive(Debug, Clone, Default)]
pub struct ShapeHistory {
    snapshots: Vec<Snapshot>,
}

impl ShapeHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Pushes a snapshot, evicting the oldest one if the history is over capacity.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);

        if self.snapshots.len() > MAX_UNDO_HISTORY {
            self.snapshots.remove(0);
        }
    }

    /// Pops the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    /// The most recent snapshot, without removing it.
    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Returns true if there is a snapshot to undo to.
    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if no snapshots are stored.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Removes every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
