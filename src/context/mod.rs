// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining MEMO and DYNAMIC state.
//!
//! The SearchContext is the core data structure passed to every predicate:
//! - Tier 1 (MEMO): the immutable allowed-gift graph
//! - Tier 2 (DYNAMIC): committed choices and the tentative matching, with
//!   trail-based backtracking
//!
//! Each SearchContext is built for a single roster and owns all of its
//! mutable state, so independent rosters can be matched concurrently.

use crate::memo::AllowedGiftGraph;
use crate::roster::Roster;
use crate::state::statistics::Statistics;
use crate::state::{DynamicState, Link};
use crate::trail::Trail;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Search context for one fallback run.
///
/// # Memory Model
///
/// ```text
/// SearchContext {
///     memo: AllowedGiftGraph,    // Tier 1: Immutable
///     trail: Trail,              // Tier 2: Mutable, owned
///     state: DynamicState,       // Tier 2: Mutable, owned
///     statistics: Statistics,    // Counters, never rewound
///     rng: ChaCha8Rng,           // Candidate ordering, never rewound
/// }
/// ```
#[derive(Debug)]
pub struct SearchContext {
    /// Immutable allowed-gift graph (Tier 1)
    pub memo: AllowedGiftGraph,
    /// Trail for O(1) backtracking (Tier 2)
    pub trail: Trail,
    /// Mutable search state (Tier 2)
    pub state: DynamicState,
    /// Search counters
    pub statistics: Statistics,
    /// Seeded source for candidate ordering
    pub rng: ChaCha8Rng,
}

impl SearchContext {
    /// Create a search context for a roster.
    pub fn new(roster: &Roster, seed: u64) -> Self {
        Self::with_memo(AllowedGiftGraph::new(roster), seed)
    }

    /// Create a search context from a prebuilt graph.
    pub fn with_memo(memo: AllowedGiftGraph, seed: u64) -> Self {
        let participants = memo.len();
        Self {
            memo,
            // Each commitment writes a handful of slots; repairs add a few per path step.
            trail: Trail::with_capacity(8 * participants),
            state: DynamicState::new(participants),
            statistics: Statistics::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of participants.
    pub fn participants(&self) -> usize {
        self.memo.len()
    }

    /// Undo all state changes made after `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        let state = &mut self.state;
        self.trail
            .rewind_to(checkpoint, |slot, old_value| state.restore(slot, old_value));
    }

    /// Number of allowed receivers of `giver` not yet committed to another giver.
    pub fn open_receiver_count(&self, giver: usize) -> usize {
        self.memo
            .receivers(giver)
            .iter()
            .filter(|&&receiver| !self.state.is_taken(receiver))
            .count()
    }

    /// Allowed receivers of `giver` not yet committed to another giver, in roster order.
    pub fn open_receivers(&self, giver: usize) -> Vec<usize> {
        self.memo
            .receivers(giver)
            .iter()
            .copied()
            .filter(|&receiver| !self.state.is_taken(receiver))
            .collect()
    }

    /// Receiver of `giver` in the tentative matching.
    pub fn mate(&self, giver: usize) -> Option<usize> {
        self.state.get(Link::Mate, giver)
    }
}
