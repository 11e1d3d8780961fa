// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Feasibility checking.
//!
//! Two checks live here:
//!
//! - [`screen`]: a pigeonhole test over group sizes, O(number of groups).
//! - [`has_perfect_matching`]: the general bipartite test on the
//!   allowed-gift graph, using augmenting paths.
//!
//! # Why the screen is exact for group exclusions
//!
//! By Hall's theorem an assignment exists iff every set `S` of givers can
//! reach at least `|S|` receivers. If `S` contains givers from two different
//! groups, every participant is outside at least one of those groups, so `S`
//! reaches all `n` participants. Otherwise `S` lies inside a single group `G`
//! and reaches exactly `n - |G|` participants, and the tightest such set is
//! `G` itself. Hence an assignment exists iff `2·|G| <= n` for the largest
//! group `G`. A roster with one participant fails this (its only group has
//! size 1 and `n - 1 = 0`).
//!
//! The screen is still only a pre-filter for the search: the fallback proves
//! infeasibility on its own, from the graph, without relying on it.

use crate::memo::AllowedGiftGraph;
use crate::roster::Roster;
use thiserror::Error;

/// Proof that no valid assignment exists for a roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Infeasibility {
    /// Fewer than two participants: nobody has a non-self receiver.
    #[error("{total} participant(s): at least two are needed")]
    TooFewParticipants { total: usize },

    /// One group holds more than half of the roster.
    #[error(
        "group {group:?} has {size} of {total} participants; \
         a group may hold at most half of the roster"
    )]
    DominantGroup {
        group: String,
        size: usize,
        total: usize,
    },

    /// The allowed-gift graph has no perfect matching.
    #[error("only {matched} of {total} participants can be given a receiver")]
    NoPerfectMatching { matched: usize, total: usize },
}

/// Outcome of a feasibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Feasible,
    Infeasible(Infeasibility),
}

impl Verdict {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Verdict::Feasible)
    }
}

/// Pigeonhole screen over group sizes.
///
/// Runs in time proportional to the number of groups. Pure: the same roster
/// always yields the same verdict.
pub fn screen(roster: &Roster) -> Verdict {
    let total = roster.len();
    if total < 2 {
        return Verdict::Infeasible(Infeasibility::TooFewParticipants { total });
    }
    match roster.largest_group() {
        Some((group, size)) if 2 * size > total => {
            Verdict::Infeasible(Infeasibility::DominantGroup {
                group: roster.group_name(group).to_string(),
                size,
                total,
            })
        }
        _ => Verdict::Feasible,
    }
}

/// Compute a maximum matching of the allowed-gift graph.
///
/// Returns `receiver_of[giver]`. Uses one augmenting-path search per giver
/// (Kuhn's algorithm), O(n · E).
pub fn maximum_matching(graph: &AllowedGiftGraph) -> Vec<Option<usize>> {
    let n = graph.len();
    let mut receiver_of = vec![None; n];
    let mut giver_of = vec![None; n];

    for giver in 0..n {
        let mut visited = vec![false; n];
        augment(graph, giver, &mut visited, &mut receiver_of, &mut giver_of);
    }

    receiver_of
}

/// Whether every giver can be matched to a distinct allowed receiver.
pub fn has_perfect_matching(graph: &AllowedGiftGraph) -> bool {
    maximum_matching(graph).iter().all(Option::is_some)
}

/// Check the graph directly, reporting how far a matching gets.
pub fn check_graph(graph: &AllowedGiftGraph) -> Verdict {
    let matched = maximum_matching(graph).iter().flatten().count();
    if matched == graph.len() && !graph.is_empty() {
        Verdict::Feasible
    } else {
        Verdict::Infeasible(Infeasibility::NoPerfectMatching {
            matched,
            total: graph.len(),
        })
    }
}

fn augment(
    graph: &AllowedGiftGraph,
    giver: usize,
    visited: &mut [bool],
    receiver_of: &mut [Option<usize>],
    giver_of: &mut [Option<usize>],
) -> bool {
    for &receiver in graph.receivers(giver) {
        if visited[receiver] {
            continue;
        }
        visited[receiver] = true;
        let free = match giver_of[receiver] {
            None => true,
            Some(other) => augment(graph, other, visited, receiver_of, giver_of),
        };
        if free {
            receiver_of[giver] = Some(receiver);
            giver_of[receiver] = Some(giver);
            return true;
        }
    }
    false
}
