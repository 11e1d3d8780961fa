// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for roster validation.

use thiserror::Error;

/// Reasons a roster is rejected before any matching is attempted.
///
/// These are always fixable by the caller and are never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The roster has no participants.
    #[error("roster is empty")]
    EmptyRoster,

    /// The same identifier appears more than once.
    #[error("participant {id:?} appears more than once (entries {first} and {second})")]
    DuplicateIdentifier {
        id: String,
        first: usize,
        second: usize,
    },

    /// A participant identifier is the empty string.
    #[error("participant at entry {position} has an empty identifier")]
    EmptyIdentifier { position: usize },

    /// A group identifier is empty, blank, or contains control characters.
    #[error("participant {id:?} has a malformed group identifier {group:?}")]
    MalformedGroup { id: String, group: String },
}
