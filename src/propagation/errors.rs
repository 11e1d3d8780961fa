// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for matching propagation.

use std::fmt;
use strum_macros::EnumCount as EnumCountMacro;

/// Reasons a partial assignment cannot be completed.
#[derive(Debug, Clone, PartialEq, Eq, EnumCountMacro)]
pub enum PropagationFailure {
    /// The allowed-gift graph itself has no perfect matching.
    NoPerfectMatching { matched: usize, total: usize },

    /// After a commitment, the displaced giver found no alternating path to a
    /// free receiver.
    NoAugmentingPath { giver: usize, depth: usize },
}

impl fmt::Display for PropagationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropagationFailure::NoPerfectMatching { matched, total } => {
                write!(
                    f,
                    "Only {} of {} givers can be matched",
                    matched, total
                )
            }
            PropagationFailure::NoAugmentingPath { giver, depth } => {
                write!(
                    f,
                    "Giver {} cannot be re-matched (depth {})",
                    giver, depth
                )
            }
        }
    }
}
