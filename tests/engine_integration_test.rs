// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for the gift search program on the engine.
//!
//! These tests validate that the engine correctly:
//! - Enumerates every assignment exactly once
//! - Resumes after a suspension with the next assignment
//! - Restores state via the trail when a search is exhausted
//! - Composes with extra predicates placed before the gift search

mod common;

use std::collections::HashSet;

use common::{brute_force, brute_force_count, families, PinnedGiftPredicate};
use gift_match::context::SearchContext;
use gift_match::engine::EngineBuilder;
use gift_match::predicates::{
    FailPredicate, GiftPredicate, InitializePredicate, SuspendPredicate,
};
use gift_match::propagation::matching_is_consistent;
use gift_match::state::statistics::{Counters, Statistics};

#[test]
fn test_resume_enumerates_every_assignment_once() {
    let roster = families(&[2, 2, 1]);
    let mut ctx = SearchContext::new(&roster, 17);
    let mut engine = Some(
        EngineBuilder::new()
            .add(Box::new(InitializePredicate))
            .add(Box::new(GiftPredicate::new(roster.len())))
            .terminal(Box::new(SuspendPredicate))
            .build(),
    );

    let mut seen = HashSet::new();
    while let Some(suspended) = engine.take().and_then(|e| e.search(&mut ctx)) {
        let receivers = ctx.state.committed_receivers().unwrap();
        assert!(seen.insert(receivers), "assignment repeated");
        engine = Some(suspended);
    }

    let expected: HashSet<Vec<usize>> = brute_force(&roster).into_iter().collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_exhausted_search_restores_state() {
    let roster = families(&[3, 2, 2]);
    let mut ctx = SearchContext::new(&roster, 4);
    let engine = EngineBuilder::new()
        .add(Box::new(InitializePredicate))
        .add(Box::new(GiftPredicate::new(roster.len())))
        .add(Statistics::counting_predicate(Counters::Solutions, None))
        .terminal(Box::new(FailPredicate))
        .build();

    assert!(engine.search(&mut ctx).is_none());
    assert_eq!(ctx.statistics.get(Counters::Solutions), brute_force_count(&roster));

    // Everything after initialization has been undone.
    assert_eq!(ctx.state.committed_count(), 0);
    assert!(matching_is_consistent(&ctx));
}

#[test]
fn test_pinned_giver() {
    // Derangements of four with 0 → 1 fixed: 1→0 leaves 2 options, 1→2 or 1→3 one each.
    let roster = families(&[1, 1, 1, 1]);
    let mut ctx = SearchContext::new(&roster, 0);
    let engine = EngineBuilder::new()
        .add(Box::new(InitializePredicate))
        .add(Box::new(PinnedGiftPredicate {
            giver: 0,
            receiver: 1,
        }))
        .add(Box::new(GiftPredicate::new(roster.len())))
        .add(Statistics::counting_predicate(Counters::Solutions, None))
        .terminal(Box::new(FailPredicate))
        .build();

    assert!(engine.search(&mut ctx).is_none());
    assert_eq!(ctx.statistics.get(Counters::Solutions), 3);
}

#[test]
fn test_filtered_counter() {
    let roster = families(&[1, 1, 1, 1]);
    let mut ctx = SearchContext::new(&roster, 0);
    let engine = EngineBuilder::new()
        .add(Box::new(InitializePredicate))
        .add(Box::new(GiftPredicate::new(roster.len())))
        .add(Statistics::counting_predicate(
            Counters::Solutions,
            Some(|ctx: &SearchContext| {
                ctx.state
                    .committed_receivers()
                    .is_some_and(|receivers| receivers[0] == 1)
            }),
        ))
        .terminal(Box::new(FailPredicate))
        .build();

    assert!(engine.search(&mut ctx).is_none());
    assert_eq!(ctx.statistics.get(Counters::Solutions), 3);
}

#[test]
fn test_infeasible_roster_fails_at_initialization() {
    let roster = families(&[3, 1]);
    let mut ctx = SearchContext::new(&roster, 0);
    let engine = EngineBuilder::new()
        .add(Box::new(InitializePredicate))
        .add(Box::new(GiftPredicate::new(roster.len())))
        .terminal(Box::new(SuspendPredicate))
        .build();

    assert!(engine.search(&mut ctx).is_none());
    assert_eq!(ctx.statistics.get(Counters::Commitments), 0);
}
