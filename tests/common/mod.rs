// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use gift_match::context::SearchContext;
use gift_match::{propagation, Predicate, PredicateResult, Roster};

/// Build a roster from `(id, group)` pairs, panicking on invalid input.
pub fn roster(entries: &[(&str, &str)]) -> Roster {
    Roster::build(entries.iter().copied()).unwrap()
}

/// A roster with one group per entry of `sizes`; ids are `"g{group}p{member}"`.
pub fn families(sizes: &[usize]) -> Roster {
    let entries: Vec<(String, String)> = sizes
        .iter()
        .enumerate()
        .flat_map(|(group, &size)| {
            (0..size).map(move |member| (format!("g{group}p{member}"), format!("family{group}")))
        })
        .collect();
    Roster::build(entries).unwrap()
}

/// Every valid assignment, as `receivers[giver]` by roster position.
///
/// Enumerates all n! permutations; keep n ≤ 8.
pub fn brute_force(roster: &Roster) -> Vec<Vec<usize>> {
    let n = roster.len();
    assert!(n <= 8, "brute force is limited to 8 participants");
    let mut found = Vec::new();
    let mut receivers = Vec::with_capacity(n);
    let mut used = vec![false; n];
    extend(roster, &mut receivers, &mut used, &mut found);
    found
}

fn extend(
    roster: &Roster,
    receivers: &mut Vec<usize>,
    used: &mut [bool],
    found: &mut Vec<Vec<usize>>,
) {
    let giver = receivers.len();
    if giver == roster.len() {
        found.push(receivers.clone());
        return;
    }
    for receiver in 0..roster.len() {
        if used[receiver] || roster.group_at(receiver) == roster.group_at(giver) {
            continue;
        }
        used[receiver] = true;
        receivers.push(receiver);
        extend(roster, receivers, used, found);
        receivers.pop();
        used[receiver] = false;
    }
}

/// Number of valid assignments by brute force.
pub fn brute_force_count(roster: &Roster) -> u64 {
    brute_force(roster).len() as u64
}

/// A predicate that pins one giver to a specific receiver.
///
/// Placed after InitializePredicate, it restricts the rest of the search to
/// assignments containing the pinned pair.
#[derive(Debug)]
pub struct PinnedGiftPredicate {
    pub giver: usize,
    pub receiver: usize,
}

impl Predicate for PinnedGiftPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        if let Err(failure) = propagation::commit(ctx, self.giver, self.receiver) {
            eprintln!(
                "Could not pin {} to {}, with {}",
                self.giver, self.receiver, &failure
            );
            return PredicateResult::Failure;
        }
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "PinnedGift"
    }
}
