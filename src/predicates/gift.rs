// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! GiftPredicate - commits one giver → receiver pair per round.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::propagation;
use rand::seq::SliceRandom;
use tracing::trace;

/// GiftPredicate builds the assignment one giver at a time.
///
/// Runs for up to n rounds, committing one giver per round. Uses a fail-fast
/// heuristic: always picks the uncommitted giver with the fewest open
/// receivers (ties go to the earliest roster position).
///
/// # Algorithm
///
/// 1. **try_pred(round)**:
///    - Find the most constrained uncommitted giver
///    - If none is left → Success (assignment complete)
///    - Shuffle its open receivers with the context RNG
///    - Return Choices(number of open receivers)
///
/// 2. **retry_pred(round, choice)**:
///    - Commit the giver to the chosen receiver
///    - Repair the tentative matching; if that fails, the choice cannot be
///      completed → Failure (engine tries the next receiver)
///    - Otherwise SuccessSamePredicate
///
/// The tentative matching guarantees at least one receiver per round succeeds,
/// so the search only ever backtracks within a round.
#[derive(Debug)]
pub struct GiftPredicate {
    /// Giver chosen at each round.
    givers_in_order: Vec<usize>,
    /// Candidate receivers, in trial order, at each round.
    candidates: Vec<Vec<usize>>,
}

impl GiftPredicate {
    pub fn new(participants: usize) -> Self {
        Self {
            givers_in_order: Vec::with_capacity(participants),
            candidates: Vec::with_capacity(participants),
        }
    }
}

impl Predicate for GiftPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult {
        let Some(giver) = choose_next_giver(ctx) else {
            return PredicateResult::Success;
        };

        let mut candidates = ctx.open_receivers(giver);
        if candidates.is_empty() {
            return PredicateResult::Failure;
        }
        candidates.shuffle(&mut ctx.rng);

        // Deeper rounds are recomputed whenever this round is revisited.
        self.givers_in_order.truncate(round);
        self.candidates.truncate(round);
        self.givers_in_order.push(giver);
        let count = candidates.len();
        self.candidates.push(candidates);

        PredicateResult::Choices(count)
    }

    fn retry_pred(&mut self, ctx: &mut SearchContext, round: usize, choice: usize) -> PredicateResult {
        let giver = self.givers_in_order[round];
        let receiver = self.candidates[round][choice];

        match propagation::commit(ctx, giver, receiver) {
            Ok(()) => PredicateResult::SuccessSamePredicate,
            Err(failure) => {
                trace!(giver, receiver, %failure, "choice rejected");
                PredicateResult::Failure
            }
        }
    }

    fn name(&self) -> &str {
        "Gift"
    }
}

/// Choose the uncommitted giver with the fewest open receivers (fail-fast heuristic).
fn choose_next_giver(ctx: &SearchContext) -> Option<usize> {
    let mut min_count = usize::MAX;
    let mut best_giver = None;

    for giver in 0..ctx.participants() {
        if ctx.state.is_committed(giver) {
            continue;
        }

        let count = ctx.open_receiver_count(giver);
        if count < min_count {
            min_count = count;
            best_giver = Some(giver);
        }
    }

    best_giver
}
