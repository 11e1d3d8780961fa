// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! This module contains the predicates used by the fallback search.
//!
//! # Organization
//!
//! - `initialize`: InitializePredicate, installs the first perfect matching
//! - `gift`: GiftPredicate, commits one giver per round
//! - Built-in predicates: `FailPredicate`, `SuspendPredicate`
//!
//! # Programs
//!
//! Finding one assignment:
//!
//! ```text
//! Initialize → Gift → count Solutions → Suspend
//! ```
//!
//! Counting every assignment replaces `Suspend` with `Fail`, which forces the
//! engine to backtrack through all remaining choices.

pub mod gift;
pub mod initialize;

pub use gift::GiftPredicate;
pub use initialize::InitializePredicate;

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// This predicate always fails, forcing backtracking. Use it to end a program
/// that should explore every alternative, e.g. to count solutions.
///
/// # Example
///
/// ```
/// use gift_match::context::SearchContext;
/// use gift_match::engine::EngineBuilder;
/// use gift_match::predicates::{FailPredicate, GiftPredicate, InitializePredicate};
/// use gift_match::roster::Roster;
/// use gift_match::state::statistics::{Counters, Statistics};
///
/// let roster = Roster::build([("a", "1"), ("b", "2"), ("c", "3")]).unwrap();
/// let mut ctx = SearchContext::new(&roster, 0);
/// let engine = EngineBuilder::new()
///     .add(Box::new(InitializePredicate))
///     .add(Box::new(GiftPredicate::new(roster.len())))
///     .add(Statistics::counting_predicate(Counters::Solutions, None))
///     .terminal(Box::new(FailPredicate))
///     .build();
///
/// assert!(engine.search(&mut ctx).is_none());
/// // The two 3-cycles.
/// assert_eq!(ctx.statistics.get(Counters::Solutions), 2);
/// ```
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl TerminalPredicate for FailPredicate {}

/// Predicate that suspends execution, handing the current state to the caller.
///
/// Ends a program that wants the first solution only.
#[derive(Debug)]
pub struct SuspendPredicate;

impl Predicate for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl TerminalPredicate for SuspendPredicate {}
