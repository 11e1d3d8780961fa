// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Secret Santa matching with group exclusions.
//!
//! Given participants partitioned into groups (families, teams, ...), find a
//! giver → receiver assignment where everyone gives once, receives once, and
//! never gives to themself or to someone in their own group. Or prove that no
//! such assignment exists.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! Computed once per run from the [`Roster`]:
//! - The allowed-gift graph (giver → every receiver outside their group)
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! Search state for the fallback, tracked on the trail:
//! - Trail - records state changes for O(1) backtracking
//! - Committed giver → receiver choices
//! - A tentative perfect matching that certifies the choices can be completed
//!
//! # Matching
//!
//! A run proceeds in three phases:
//!
//! 1. **Feasibility**: a pigeonhole check over group sizes rejects rosters
//!    where one group holds more than half of the participants
//! 2. **Resampling**: draw random permutations until one satisfies every
//!    exclusion, up to an attempt budget
//! 3. **Fallback**: a backtracking search over the allowed-gift graph that
//!    either builds an assignment or proves none exists
//!
//! # Example
//!
//! ```
//! use gift_match::{generate, MatchOptions, MatchingOutcome, Roster};
//!
//! let roster = Roster::build([
//!     ("ann", "north"),
//!     ("bob", "north"),
//!     ("cat", "south"),
//!     ("dan", "south"),
//!     ("eve", "east"),
//!     ("fay", "east"),
//! ])
//! .unwrap();
//!
//! match generate(&roster, &MatchOptions::default().with_seed(2024)) {
//!     MatchingOutcome::Matched { assignment, .. } => {
//!         assert_eq!(assignment.len(), 6);
//!         assert!(assignment.verify(&roster).is_ok());
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

pub mod assignment;
pub mod context;
pub mod engine;
pub mod feasibility;
pub mod matcher;
pub mod memo;
pub mod predicates;
pub mod propagation;
pub mod resample;
pub mod roster;
pub mod state;
pub mod trail;
pub mod wishlist;

// Re-export commonly used types
pub use assignment::{Assignment, AssignmentViolation};
pub use context::SearchContext;
pub use engine::{Predicate, PredicateResult, SearchEngine};
pub use feasibility::{Infeasibility, Verdict};
pub use matcher::{
    count_assignments, generate, generate_with_rng, FallbackMode, MatchError, MatchOptions,
    MatchingOutcome, Strategy, DEFAULT_ATTEMPT_BUDGET,
};
pub use roster::{Participant, Roster, ValidationError};
pub use trail::Trail;
pub use wishlist::{reveal, Reveal, Wishlist, WishlistBook};
