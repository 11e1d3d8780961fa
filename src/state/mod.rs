// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier 2: DYNAMIC state (mutable, tracked on trail).
//!
//! The fallback search keeps two relations over roster positions:
//!
//! - the **committed** choices: givers whose receiver has been fixed by the
//!   search, with the inverse map receiver → giver;
//! - a **tentative** perfect matching of the whole allowed-gift graph that
//!   agrees with every committed choice. Its existence is the proof that the
//!   current partial assignment can still be completed.
//!
//! All values live in one flat `Vec<u64>` so that each write can be recorded
//! on the [`Trail`] as `(slot, old value)` and undone on backtrack.

pub mod statistics;

use crate::trail::{decode, encode, Trail};

/// One of the per-participant relations held in [`DynamicState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// giver → committed receiver
    Committed = 0,
    /// receiver → committed giver
    CommittedBy = 1,
    /// giver → receiver in the tentative matching
    Mate = 2,
    /// receiver → giver in the tentative matching
    MatedBy = 3,
}

const LINKS: usize = 4;

/// Mutable search state for one fallback run.
#[derive(Debug)]
pub struct DynamicState {
    participants: usize,
    /// `LINKS` regions of `participants` slots, then the committed count.
    cells: Vec<u64>,
}

impl DynamicState {
    /// Empty state for `participants` participants: nothing committed, no matching.
    pub fn new(participants: usize) -> Self {
        Self {
            participants,
            cells: vec![0; LINKS * participants + 1],
        }
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    fn slot(&self, link: Link, index: usize) -> usize {
        assert!(
            index < self.participants,
            "Participant index out of bounds: {}",
            index
        );
        link as usize * self.participants + index
    }

    fn count_slot(&self) -> usize {
        LINKS * self.participants
    }

    /// Read one link.
    pub fn get(&self, link: Link, index: usize) -> Option<usize> {
        decode(self.cells[self.slot(link, index)])
    }

    /// Write one link, recording the old value on the trail.
    pub fn set(&mut self, trail: &mut Trail, link: Link, index: usize, value: Option<usize>) {
        let slot = self.slot(link, index);
        let new_value = encode(value);
        if self.cells[slot] != new_value {
            trail.record_change(slot, self.cells[slot]);
            self.cells[slot] = new_value;
        }
    }

    /// Number of givers with a committed receiver.
    pub fn committed_count(&self) -> usize {
        self.cells[self.count_slot()] as usize
    }

    /// Commit `giver → receiver` (trail-tracked).
    ///
    /// Only records the choice; keeping the tentative matching consistent is
    /// the job of [`crate::propagation::commit`].
    pub fn commit(&mut self, trail: &mut Trail, giver: usize, receiver: usize) {
        debug_assert!(self.get(Link::Committed, giver).is_none());
        debug_assert!(self.get(Link::CommittedBy, receiver).is_none());
        self.set(trail, Link::Committed, giver, Some(receiver));
        self.set(trail, Link::CommittedBy, receiver, Some(giver));

        let slot = self.count_slot();
        trail.record_change(slot, self.cells[slot]);
        self.cells[slot] += 1;
    }

    pub fn is_committed(&self, giver: usize) -> bool {
        self.get(Link::Committed, giver).is_some()
    }

    pub fn is_taken(&self, receiver: usize) -> bool {
        self.get(Link::CommittedBy, receiver).is_some()
    }

    /// Put back a value recorded on the trail.
    pub fn restore(&mut self, slot: usize, old_value: u64) {
        self.cells[slot] = old_value;
    }

    /// Committed receivers by giver, if every giver is committed.
    pub fn committed_receivers(&self) -> Option<Vec<usize>> {
        (0..self.participants)
            .map(|giver| self.get(Link::Committed, giver))
            .collect()
    }
}
