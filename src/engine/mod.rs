// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backtracking engine for predicate programs.
//!
//! A program is a fixed list of predicates. The engine keeps a stack with one
//! entry per active step (predicate, round, and the choice being explored)
//! plus the trail length when the step began. Backtracking pops entries and
//! rewinds the trail, so predicates never undo their own writes.
//!
//! A run ends in one of two ways: it suspends with a complete assignment in
//! the context, or it exhausts every branch. There is no third "finished"
//! state, which is why [`EngineBuilder`] only builds programs closed by a
//! [`TerminalPredicate`].
//!
//! # Example
//!
//! ```
//! use gift_match::context::SearchContext;
//! use gift_match::engine::EngineBuilder;
//! use gift_match::predicates::{GiftPredicate, InitializePredicate, SuspendPredicate};
//! use gift_match::roster::Roster;
//!
//! let roster = Roster::build([("a", "x"), ("b", "x"), ("c", "y"), ("d", "y")]).unwrap();
//! let mut ctx = SearchContext::new(&roster, 42);
//! let engine = EngineBuilder::new()
//!     .add(Box::new(InitializePredicate))
//!     .add(Box::new(GiftPredicate::new(roster.len())))
//!     .terminal(Box::new(SuspendPredicate))
//!     .build();
//!
//! // Suspended: a complete assignment is in the context
//! assert!(engine.search(&mut ctx).is_some());
//! assert_eq!(ctx.state.committed_count(), 4);
//! ```

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use crate::context::SearchContext;

/// One active step of the program.
#[derive(Debug)]
struct StackEntry {
    predicate_index: usize,
    round: usize,
    /// Set once `try_pred` returned `Choices`.
    in_choice_mode: bool,
    /// Next choice to hand to `retry_pred`.
    current_choice: usize,
    num_choices: usize,
    /// `try_pred` has run; a deterministic step is never re-run.
    tried: bool,
    trail_checkpoint: usize,
}

impl StackEntry {
    fn new(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            tried: false,
            trail_checkpoint,
        }
    }
}

/// A built program together with its execution stack.
pub struct SearchEngine {
    predicates: Vec<Box<dyn Predicate>>,
    stack: Vec<StackEntry>,
    try_count: u64,
    retry_count: u64,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.predicates.iter().map(|p| p.name()).collect();
        f.debug_struct("SearchEngine")
            .field("predicates", &names)
            .field("depth", &self.stack.len())
            .field("try_count", &self.try_count)
            .field("retry_count", &self.retry_count)
            .finish()
    }
}

impl SearchEngine {
    fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            stack: Vec::new(),
            try_count: 0,
            retry_count: 0,
        }
    }

    /// Run the search to the next suspension point.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if suspended - the solution is in `ctx`, and calling
    ///   `search` again resumes by backtracking into the most recent choice
    /// - `None` if exhausted (backtracked past first predicate)
    ///
    /// # Panics
    ///
    /// Panics if a predicate returns `Success` from the last position, or if
    /// `retry_pred` returns `Choices` or `Suspend`. Both are programming errors.
    pub fn search(mut self, ctx: &mut SearchContext) -> Option<Self> {
        if self.stack.is_empty() {
            if self.predicates.is_empty() {
                return None; // Empty is exhausted
            }
            self.stack.push(StackEntry::new(0, 0, ctx.trail.len()));
        } else {
            // Resuming: the suspending predicate is done, backtrack past it.
            self.stack.pop();
        }

        loop {
            let Some(entry) = self.stack.last_mut() else {
                return None; // Search exhausted (all choices failed)
            };

            let checkpoint = entry.trail_checkpoint;
            ctx.rewind_to(checkpoint);

            if !entry.in_choice_mode {
                if entry.tried {
                    // Deterministic step with no alternatives left: keep backtracking.
                    self.stack.pop();
                    continue;
                }
                entry.tried = true;
                let pred_idx = entry.predicate_index;
                let round = entry.round;
                self.try_count += 1;
                let result = self.predicates[pred_idx].try_pred(ctx, round);

                match result {
                    PredicateResult::Success => self.push_next_predicate(ctx),
                    PredicateResult::SuccessSamePredicate => self.push_same_predicate(ctx),
                    PredicateResult::Failure => {
                        self.stack.pop();
                    }
                    PredicateResult::Choices(n) => {
                        if let Some(entry) = self.stack.last_mut() {
                            entry.in_choice_mode = true;
                            entry.current_choice = 0;
                            entry.num_choices = n;
                            entry.trail_checkpoint = ctx.trail.len();
                        }
                    }
                    PredicateResult::Suspend => return Some(self),
                }
            } else {
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }

                let pred_idx = entry.predicate_index;
                let round = entry.round;
                let choice = entry.current_choice;
                entry.current_choice += 1;
                self.retry_count += 1;
                let result = self.predicates[pred_idx].retry_pred(ctx, round, choice);

                match result {
                    PredicateResult::Success => self.push_next_predicate(ctx),
                    PredicateResult::SuccessSamePredicate => self.push_same_predicate(ctx),
                    PredicateResult::Failure => {
                        // Try next choice (loop continues)
                    }
                    PredicateResult::Choices(_) | PredicateResult::Suspend => {
                        panic!("retry_pred returned invalid result: {:?}", result);
                    }
                }
            }
        }
    }

    /// Push a new stack entry for the next predicate in sequence.
    fn push_next_predicate(&mut self, ctx: &SearchContext) {
        let next_index = self.stack.last().map_or(0, |e| e.predicate_index + 1);

        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 All programs must terminate with a FAIL or SUSPEND predicate."
            );
        }

        self.stack
            .push(StackEntry::new(next_index, 0, ctx.trail.len()));
    }

    /// Push a new stack entry for the same predicate with incremented round.
    fn push_same_predicate(&mut self, ctx: &SearchContext) {
        let (pred_index, next_round) = self
            .stack
            .last()
            .map_or((0, 0), |e| (e.predicate_index, e.round + 1));

        self.stack
            .push(StackEntry::new(pred_index, next_round, ctx.trail.len()));
    }

    /// Get statistics about the search.
    ///
    /// Returns (try_count, retry_count) showing how many times predicates
    /// were tried and retried.
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}

/// Builder for predicate programs.
///
/// Programs must end with a [`TerminalPredicate`]: only the value returned by
/// [`EngineBuilder::terminal`] can be built.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

/// A program whose last predicate is terminal.
#[derive(Debug)]
pub struct TerminatedProgram {
    predicates: Vec<Box<dyn Predicate>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate.
    pub fn add(mut self, predicate: Box<dyn Predicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Append the terminal predicate, closing the program.
    pub fn terminal<T: TerminalPredicate + 'static>(mut self, predicate: Box<T>) -> TerminatedProgram {
        self.predicates.push(predicate);
        TerminatedProgram {
            predicates: self.predicates,
        }
    }
}

impl TerminatedProgram {
    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.predicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::{FailPredicate, SuspendPredicate};
    use crate::roster::Roster;
    use crate::state::Link;

    fn ctx() -> SearchContext {
        let roster = Roster::build([("a", "x"), ("b", "y"), ("c", "z")]).unwrap();
        SearchContext::new(&roster, 0)
    }

    /// Test predicate that always succeeds.
    #[derive(Debug)]
    struct AlwaysSucceed;

    impl Predicate for AlwaysSucceed {
        fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            PredicateResult::Success
        }
    }

    /// Writes `choice` into Mate[round] for each of `n` choices, over `rounds` rounds.
    #[derive(Debug)]
    struct WriteChoice {
        rounds: usize,
        n: usize,
    }

    impl Predicate for WriteChoice {
        fn try_pred(&mut self, _ctx: &mut SearchContext, round: usize) -> PredicateResult {
            if round == self.rounds {
                PredicateResult::Success
            } else {
                PredicateResult::Choices(self.n)
            }
        }

        fn retry_pred(&mut self, ctx: &mut SearchContext, round: usize, choice: usize) -> PredicateResult {
            assert_eq!(ctx.state.get(Link::Mate, round), None, "state not rewound");
            ctx.state.set(&mut ctx.trail, Link::Mate, round, Some(choice));
            PredicateResult::SuccessSamePredicate
        }
    }

    #[test]
    fn test_simple_success_with_suspend() {
        let mut ctx = ctx();
        let engine = EngineBuilder::new()
            .add(Box::new(AlwaysSucceed))
            .terminal(Box::new(SuspendPredicate))
            .build();

        let engine = engine.search(&mut ctx);
        assert!(engine.is_some()); // Suspended - engine returned
        let engine = engine.unwrap();
        assert_eq!(engine.statistics(), (2, 0)); // AlwaysSucceed + Suspend, no retries
    }

    #[test]
    fn test_immediate_failure() {
        let mut ctx = ctx();
        let engine = EngineBuilder::new()
            .terminal(Box::new(FailPredicate))
            .build();

        assert!(engine.search(&mut ctx).is_none()); // Exhausted - engine consumed
    }

    #[test]
    fn test_empty_predicates() {
        let mut ctx = ctx();
        let engine = SearchEngine::new(vec![]);
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_resume_enumerates_every_branch() {
        let mut ctx = ctx();
        let mut engine = EngineBuilder::new()
            .add(Box::new(WriteChoice { rounds: 2, n: 3 }))
            .terminal(Box::new(SuspendPredicate))
            .build();

        let mut seen = Vec::new();
        while let Some(suspended) = engine.search(&mut ctx) {
            seen.push((
                ctx.state.get(Link::Mate, 0).unwrap(),
                ctx.state.get(Link::Mate, 1).unwrap(),
            ));
            engine = suspended;
        }

        assert_eq!(seen.len(), 9);
        assert_eq!(seen[0], (0, 0));
        assert_eq!(seen[8], (2, 2));
        // Exhausting the search rewinds every write.
        assert!(ctx.trail.is_empty());
    }

    #[test]
    fn test_fail_terminal_explores_everything() {
        let mut ctx = ctx();
        let engine = EngineBuilder::new()
            .add(Box::new(WriteChoice { rounds: 2, n: 2 }))
            .terminal(Box::new(FailPredicate))
            .build();

        assert!(engine.search(&mut ctx).is_none());
        assert_eq!(ctx.state.get(Link::Mate, 0), None);
    }

    #[test]
    #[should_panic(expected = "Invalid predicate sequence")]
    fn test_invalid_program_without_terminal() {
        let mut ctx = ctx();
        let engine = SearchEngine::new(vec![Box::new(AlwaysSucceed)]);
        let _ = engine.search(&mut ctx);
    }
}
