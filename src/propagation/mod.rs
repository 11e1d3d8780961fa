// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Matching propagation for the fallback search.
//!
//! The search keeps a tentative perfect matching of the allowed-gift graph
//! that agrees with every committed choice. It is the certificate that the
//! partial assignment can still be completed, and it makes failure detection
//! immediate instead of discovered deep in the search tree.
//!
//! # Algorithm Overview
//!
//! When giver `g` is committed to receiver `r`:
//! 1. If `g` is already matched to `r`, nothing else changes.
//! 2. Otherwise `g` takes `r` from its current holder `h`, and `g`'s old
//!    receiver `r'` becomes free. Now exactly `h` and `r'` are unmatched.
//! 3. Search one alternating path from `h` to a free receiver, moving only
//!    uncommitted givers. If found, flip it and the matching is perfect again.
//! 4. If no path exists, no completion contains `g → r` (Berge's lemma):
//!    fail, and the engine rewinds every write.
//!
//! Each commitment costs at most one O(E) path search, so a full fallback run
//! is O(n · E).

pub mod errors;

pub use errors::PropagationFailure;

use crate::context::SearchContext;
use crate::feasibility;
use crate::state::statistics::Counters;
use crate::state::Link;

/// Install a perfect matching of the allowed-gift graph as the tentative matching.
///
/// Fails if the graph has none, which proves the roster infeasible.
pub fn setup_matching(ctx: &mut SearchContext) -> Result<(), PropagationFailure> {
    let matching = feasibility::maximum_matching(&ctx.memo);
    let total = matching.len();
    let matched = matching.iter().flatten().count();
    if matched < total || total == 0 {
        return Err(PropagationFailure::NoPerfectMatching { matched, total });
    }

    for (giver, receiver) in matching.into_iter().enumerate() {
        ctx.state.set(&mut ctx.trail, Link::Mate, giver, receiver);
        if let Some(receiver) = receiver {
            ctx.state
                .set(&mut ctx.trail, Link::MatedBy, receiver, Some(giver));
        }
    }
    Ok(())
}

/// Commit `giver → receiver` and repair the tentative matching.
///
/// The caller must only offer open, allowed receivers of an uncommitted giver.
pub fn commit(
    ctx: &mut SearchContext,
    giver: usize,
    receiver: usize,
) -> Result<(), PropagationFailure> {
    debug_assert!(ctx.memo.allows(giver, receiver));
    debug_assert!(!ctx.state.is_committed(giver));
    debug_assert!(!ctx.state.is_taken(receiver));

    ctx.statistics.increment_counter(Counters::Commitments);
    ctx.state.commit(&mut ctx.trail, giver, receiver);

    let previous = ctx.state.get(Link::Mate, giver);
    if previous == Some(receiver) {
        return Ok(());
    }

    let displaced = ctx.state.get(Link::MatedBy, receiver);
    ctx.state.set(&mut ctx.trail, Link::Mate, giver, Some(receiver));
    ctx.state
        .set(&mut ctx.trail, Link::MatedBy, receiver, Some(giver));
    if let Some(previous) = previous {
        ctx.state.set(&mut ctx.trail, Link::MatedBy, previous, None);
    }

    let Some(displaced) = displaced else {
        return Ok(());
    };
    ctx.state.set(&mut ctx.trail, Link::Mate, displaced, None);
    ctx.statistics.increment_counter(Counters::Repairs);

    let mut visited = vec![false; ctx.participants()];
    if augment(ctx, displaced, &mut visited) {
        Ok(())
    } else {
        ctx.statistics.increment_counter(Counters::FailedRepairs);
        Err(PropagationFailure::NoAugmentingPath {
            giver: displaced,
            depth: ctx.state.committed_count(),
        })
    }
}

/// Find an alternating path from unmatched `giver` to a free receiver and flip it.
///
/// Receivers already committed to a giver are never moved.
fn augment(ctx: &mut SearchContext, giver: usize, visited: &mut [bool]) -> bool {
    for index in 0..ctx.memo.receivers(giver).len() {
        let receiver = ctx.memo.receivers(giver)[index];
        if visited[receiver] || ctx.state.is_taken(receiver) {
            continue;
        }
        visited[receiver] = true;

        let free = match ctx.state.get(Link::MatedBy, receiver) {
            None => true,
            Some(holder) => augment(ctx, holder, visited),
        };
        if free {
            ctx.state.set(&mut ctx.trail, Link::Mate, giver, Some(receiver));
            ctx.state
                .set(&mut ctx.trail, Link::MatedBy, receiver, Some(giver));
            return true;
        }
    }
    false
}

/// Whether the tentative matching is a perfect matching consistent with all commitments.
pub fn matching_is_consistent(ctx: &SearchContext) -> bool {
    (0..ctx.participants()).all(|giver| {
        let Some(receiver) = ctx.state.get(Link::Mate, giver) else {
            return false;
        };
        ctx.memo.allows(giver, receiver)
            && ctx.state.get(Link::MatedBy, receiver) == Some(giver)
            && ctx
                .state
                .get(Link::Committed, giver)
                .map_or(true, |committed| committed == receiver)
    })
}
