// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fast path: bounded randomized resampling.
//!
//! Draw a uniformly random permutation of the roster, pair roster order with
//! it, and keep it only if every pair is allowed. Repeat up to the attempt
//! budget. Accepted permutations are uniform over all valid assignments,
//! because rejection is the only filter applied.
//!
//! For rosters of many small groups a random permutation is valid often
//! enough that this usually succeeds within a few dozen attempts. It gives no proof either way when it runs out of budget.

use crate::memo::AllowedGiftGraph;
use rand::seq::SliceRandom;
use rand::Rng;

/// Result of a resampling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resampled {
    /// A valid permutation: `receivers[giver]`, by roster position.
    Found { receivers: Vec<usize>, attempts: usize },
    /// The budget ran out.
    Exhausted { attempts: usize },
}

/// Try up to `budget` random permutations.
pub fn resample<R: Rng + ?Sized>(graph: &AllowedGiftGraph, budget: usize, rng: &mut R) -> Resampled {
    let mut receivers: Vec<usize> = (0..graph.len()).collect();

    for attempt in 1..=budget {
        receivers.shuffle(&mut *rng);
        if is_valid(graph, &receivers) {
            return Resampled::Found {
                receivers,
                attempts: attempt,
            };
        }
    }

    Resampled::Exhausted { attempts: budget }
}

/// Whether every giver → receiver pair of a permutation is allowed.
pub fn is_valid(graph: &AllowedGiftGraph, receivers: &[usize]) -> bool {
    receivers
        .iter()
        .enumerate()
        .all(|(giver, &receiver)| graph.allows(giver, receiver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn graph(entries: &[(&str, &str)]) -> AllowedGiftGraph {
        AllowedGiftGraph::new(&Roster::build(entries.iter().copied()).unwrap())
    }

    #[test]
    fn test_finds_valid_permutation() {
        let g = graph(&[("a", "1"), ("b", "1"), ("c", "2"), ("d", "2"), ("e", "3"), ("f", "3")]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        match resample(&g, 1000, &mut rng) {
            Resampled::Found { receivers, attempts } => {
                assert!(is_valid(&g, &receivers));
                assert!(attempts >= 1 && attempts <= 1000);
            }
            other => panic!("expected a permutation, got {:?}", other),
        }
    }

    #[test]
    fn test_exhausts_on_impossible_roster() {
        let g = graph(&[("a", "1"), ("b", "1"), ("c", "1")]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(resample(&g, 50, &mut rng), Resampled::Exhausted { attempts: 50 });
    }

    #[test]
    fn test_zero_budget() {
        let g = graph(&[("a", "1"), ("b", "2")]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(resample(&g, 0, &mut rng), Resampled::Exhausted { attempts: 0 });
    }

    #[test]
    fn test_same_seed_same_result() {
        let g = graph(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")]);
        let first = resample(&g, 1000, &mut ChaCha8Rng::seed_from_u64(11));
        let second = resample(&g, 1000, &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(first, second);
    }

    #[test]
    fn test_is_valid_rejects_fixed_point() {
        let g = graph(&[("a", "1"), ("b", "2"), ("c", "3")]);
        assert!(is_valid(&g, &[1, 2, 0]));
        assert!(!is_valid(&g, &[0, 2, 1]));
    }
}
