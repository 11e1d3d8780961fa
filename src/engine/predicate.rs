// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The step interface of the search engine.
//!
//! A program is a list of predicates run left to right. Each one either moves
//! the search forward, rejects the current partial assignment, or opens a
//! choice point the engine explores one alternative at a time.
//!
//! # Example
//!
//! A predicate that offers each open receiver of giver 0 in turn:
//!
//! ```
//! use gift_match::context::SearchContext;
//! use gift_match::engine::{Predicate, PredicateResult};
//! use gift_match::propagation;
//!
//! #[derive(Debug, Default)]
//! struct FirstGiver(Vec<usize>);
//!
//! impl Predicate for FirstGiver {
//!     fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
//!         self.0 = ctx.open_receivers(0);
//!         PredicateResult::Choices(self.0.len())
//!     }
//!
//!     fn retry_pred(&mut self, ctx: &mut SearchContext, _round: usize, choice: usize) -> PredicateResult {
//!         match propagation::commit(ctx, 0, self.0[choice]) {
//!             Ok(()) => PredicateResult::Success,
//!             Err(_) => PredicateResult::Failure,
//!         }
//!     }
//! }
//! ```

use crate::context::SearchContext;
use std::fmt::Debug;

/// What a predicate tells the engine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResult {
    /// Advance to the next predicate.
    Success,

    /// Run this predicate again at `round + 1` (one round per giver).
    SuccessSamePredicate,

    /// Dead end: backtrack.
    Failure,

    /// `retry_pred` is called with choice `0..n` until one succeeds.
    Choices(usize),

    /// Hand control back to the caller; `search` resumes from here.
    Suspend,
}

/// Marker for predicates allowed at the end of a program: they fail or suspend, never succeed.
pub trait TerminalPredicate: Predicate {}

/// One step of a search program.
///
/// State changes go through trailed writes on [`SearchContext`]; the engine
/// rewinds to the step's checkpoint before each call, so every choice sees
/// the state `try_pred` left behind and nothing from earlier choices.
pub trait Predicate: Debug {
    /// First visit at `round`, which counts `SuccessSamePredicate` results from 0.
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult;

    /// Explore `choice` after `try_pred` returned `Choices`. Must not return
    /// `Choices` or `Suspend`.
    #[allow(unused)]
    fn retry_pred(&mut self, ctx: &mut SearchContext, round: usize, choice: usize) -> PredicateResult {
        panic!("{}::retry_pred should never be called", self.name());
    }

    /// Name used in log lines.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
