// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Matching engine: the single entry point used by callers.
//!
//! One matching run moves through these states:
//!
//! ```text
//! START → FEASIBILITY_CHECK → INFEASIBLE
//!                           → RESAMPLING → SUCCESS
//!                                        → FALLBACK_SEARCH → SUCCESS
//!                                                          → INFEASIBLE
//! ```
//!
//! With [`FallbackMode::Disabled`], an exhausted fast path ends the run with
//! [`MatchingOutcome::Exhausted`] instead of entering the fallback. That is
//! the only way `Exhausted` is ever produced.
//!
//! A run is pure computation over an immutable roster and a random source. It
//! keeps no state between calls.

pub mod options;

pub use options::{FallbackMode, MatchOptions, DEFAULT_ATTEMPT_BUDGET};

use crate::assignment::Assignment;
use crate::context::SearchContext;
use crate::engine::{EngineBuilder, SearchEngine, TerminalPredicate};
use crate::feasibility::{self, Infeasibility, Verdict};
use crate::memo::AllowedGiftGraph;
use crate::predicates::{FailPredicate, GiftPredicate, InitializePredicate, SuspendPredicate};
use crate::resample::{resample, Resampled};
use crate::roster::Roster;
use crate::state::statistics::{Counters, Statistics};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info, info_span};

/// Which strategy produced an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The fast path, after this many attempts.
    Resampling { attempts: usize },
    /// The constructive fallback search.
    Fallback,
}

/// Outcome of one matching run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchingOutcome {
    /// A valid assignment.
    Matched {
        assignment: Assignment,
        strategy: Strategy,
    },
    /// Proven impossible for this roster's group structure.
    Infeasible(Infeasibility),
    /// Fast-path budget spent with the fallback disabled; nothing proven.
    Exhausted { attempts: usize },
}

/// Failure side of [`MatchingOutcome`], for callers that prefer `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("no valid assignment exists: {0}")]
    Infeasible(#[from] Infeasibility),

    #[error(
        "no assignment found in {attempts} random attempts; \
         enable the fallback search or raise the attempt budget"
    )]
    Exhausted { attempts: usize },
}

impl MatchingOutcome {
    /// The assignment, if the run succeeded.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            MatchingOutcome::Matched { assignment, .. } => Some(assignment),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<Assignment, MatchError> {
        match self {
            MatchingOutcome::Matched { assignment, .. } => Ok(assignment),
            MatchingOutcome::Infeasible(reason) => Err(MatchError::Infeasible(reason)),
            MatchingOutcome::Exhausted { attempts } => Err(MatchError::Exhausted { attempts }),
        }
    }
}

/// Match a roster, seeding the random source from `options.random_seed`
/// (or from entropy when no seed is given).
///
/// # Example
///
/// ```
/// use gift_match::{generate, MatchOptions, Roster};
///
/// let roster = Roster::build([("a", "1"), ("b", "1"), ("c", "2"), ("d", "2")]).unwrap();
/// let outcome = generate(&roster, &MatchOptions::default().with_seed(7));
/// let assignment = outcome.into_result().unwrap();
/// assert!(assignment.verify(&roster).is_ok());
/// ```
pub fn generate(roster: &Roster, options: &MatchOptions) -> MatchingOutcome {
    let mut rng = match options.random_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    generate_with_rng(roster, options, &mut rng)
}

/// Match a roster using the supplied random source.
///
/// `options.random_seed` is ignored here; the caller owns the randomness.
pub fn generate_with_rng<R: Rng + ?Sized>(
    roster: &Roster,
    options: &MatchOptions,
    rng: &mut R,
) -> MatchingOutcome {
    let span = info_span!(
        "generate",
        participants = roster.len(),
        groups = roster.group_count()
    );
    let _enter = span.enter();

    if let Verdict::Infeasible(reason) = feasibility::screen(roster) {
        info!(%reason, "roster rejected by feasibility check");
        return MatchingOutcome::Infeasible(reason);
    }

    let graph = AllowedGiftGraph::new(roster);
    match resample(&graph, options.attempt_budget, &mut *rng) {
        Resampled::Found {
            receivers,
            attempts,
        } => {
            info!(attempts, "fast path found an assignment");
            return matched(roster, &receivers, Strategy::Resampling { attempts });
        }
        Resampled::Exhausted { attempts } => {
            if options.fallback == FallbackMode::Disabled {
                info!(attempts, "fast path exhausted and fallback disabled");
                return MatchingOutcome::Exhausted { attempts };
            }
            info!(attempts, "fast path exhausted, running fallback search");
        }
    }

    match fallback_search(graph, rng.gen()) {
        Ok(receivers) => {
            info!("fallback search found an assignment");
            matched(roster, &receivers, Strategy::Fallback)
        }
        Err(reason) => {
            info!(%reason, "fallback search proved the roster infeasible");
            MatchingOutcome::Infeasible(reason)
        }
    }
}

fn matched(roster: &Roster, receivers: &[usize], strategy: Strategy) -> MatchingOutcome {
    let assignment = Assignment::from_positions(roster, receivers);
    debug_assert_eq!(assignment.verify(roster), Ok(()));
    MatchingOutcome::Matched {
        assignment,
        strategy,
    }
}

/// The search program: initialize the matching, commit every giver, then stop.
fn program<T: TerminalPredicate + 'static>(participants: usize, terminal: T) -> SearchEngine {
    EngineBuilder::new()
        .add(Box::new(InitializePredicate))
        .add(Box::new(GiftPredicate::new(participants)))
        .add(Statistics::counting_predicate(Counters::Solutions, None))
        .terminal(Box::new(terminal))
        .build()
}

/// Constructive fallback: find one assignment or prove none exists.
///
/// Returns `receivers[giver]` by roster position. The search is exhaustive,
/// so exhaustion is a proof of infeasibility, never a timeout.
pub fn fallback_search(graph: AllowedGiftGraph, seed: u64) -> Result<Vec<usize>, Infeasibility> {
    let participants = graph.len();
    let mut ctx = SearchContext::with_memo(graph, seed);

    let result = program(participants, SuspendPredicate).search(&mut ctx);
    log_statistics(&ctx.statistics);

    match result {
        Some(engine) => {
            let (tries, retries) = engine.statistics();
            debug!(tries, retries, "fallback search suspended on a solution");
            Ok(ctx
                .state
                .committed_receivers()
                .expect("a suspended search has every giver committed"))
        }
        None => {
            let matched = feasibility::maximum_matching(&ctx.memo)
                .iter()
                .flatten()
                .count();
            Err(Infeasibility::NoPerfectMatching {
                matched,
                total: participants,
            })
        }
    }
}

/// Count every valid assignment of a roster.
///
/// Exhaustive enumeration with the fallback's predicate program; the count
/// grows factorially, so this is a diagnostic for small rosters.
pub fn count_assignments(roster: &Roster) -> u64 {
    let mut ctx = SearchContext::new(roster, 0);
    let exhausted = program(roster.len(), FailPredicate).search(&mut ctx);
    debug_assert!(exhausted.is_none());
    log_statistics(&ctx.statistics);
    ctx.statistics.get(Counters::Solutions)
}

fn log_statistics(statistics: &Statistics) {
    debug!(
        solutions = statistics.get(Counters::Solutions),
        commitments = statistics.get(Counters::Commitments),
        repairs = statistics.get(Counters::Repairs),
        failed_repairs = statistics.get(Counters::FailedRepairs),
        "search statistics"
    );
}
