// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for the fallback search.
//!
//! Every write to search state is recorded here as `(slot, old value)`. A
//! checkpoint is just the trail length; rewinding to it replays the recorded
//! old values in reverse order, so backtracking costs one step per write.
//!
//! Values are stored as `u64`. Optional indices are encoded as `0` for `None`
//! and `index + 1` for `Some(index)` (see [`encode`] and [`decode`]).

/// A single entry in the trail, recording one state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrailEntry {
    /// Slot of the value being tracked
    slot: usize,
    /// The value before the change
    old_value: u64,
}

/// Undo log for search state.
///
/// # Memory Model
///
/// - DYNAMIC: the trail is mutable state that changes during search
/// - Each SearchContext owns its own trail, so independent runs never share one
#[derive(Debug, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
    /// Position below which rewinding is not allowed.
    frozen: usize,
}

impl Trail {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a trail with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            frozen: 0,
        }
    }

    /// Current position, usable as a checkpoint for [`Trail::rewind_to`].
    pub fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    /// Freeze the trail at the current position.
    ///
    /// Later rewinds stop here, so changes made before the freeze are permanent.
    pub fn freeze(&mut self) {
        self.frozen = self.entries.len();
    }

    /// Position of the freeze point (0 if never frozen).
    pub fn frozen_at(&self) -> usize {
        self.frozen
    }

    /// Record that `slot` held `old_value` before being overwritten.
    pub(crate) fn record_change(&mut self, slot: usize, old_value: u64) {
        self.entries.push(TrailEntry { slot, old_value });
    }

    /// Undo changes until the trail is back at `checkpoint`.
    ///
    /// `restore(slot, old_value)` is called for each undone change, newest
    /// first. Stops at the freeze point. Returns false if the freeze point
    /// prevented reaching `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize, mut restore: impl FnMut(usize, u64)) -> bool {
        let target = checkpoint.max(self.frozen);
        while self.entries.len() > target {
            if let Some(entry) = self.entries.pop() {
                restore(entry.slot, entry.old_value);
            }
        }
        target == checkpoint
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Encode an optional index for trail storage.
pub fn encode(value: Option<usize>) -> u64 {
    match value {
        None => 0,
        Some(index) => index as u64 + 1,
    }
}

/// Decode a value written by [`encode`].
pub fn decode(value: u64) -> Option<usize> {
    value.checked_sub(1).map(|index| index as usize)
}
