// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! InitializePredicate - installs the first perfect matching.
//!
//! This predicate runs exactly once at the start of the search. It computes a
//! perfect matching of the allowed-gift graph and freezes the trail, so the
//! rest of the search never backtracks past it.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::propagation;
use tracing::debug;

/// InitializePredicate sets up the tentative matching.
///
/// Fails if the allowed-gift graph has no perfect matching, in which case
/// the whole search exhausts immediately: the roster is infeasible.
#[derive(Debug)]
pub struct InitializePredicate;

impl Predicate for InitializePredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult {
        assert_eq!(
            round, 0,
            "InitializePredicate must be called exactly once with round=0"
        );

        if let Err(failure) = propagation::setup_matching(ctx) {
            debug!(%failure, "no perfect matching in allowed-gift graph");
            return PredicateResult::Failure;
        }
        ctx.trail.freeze();

        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "Initialize"
    }
}
