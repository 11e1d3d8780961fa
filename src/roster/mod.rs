// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Roster model: participants and their group memberships.
//!
//! A [`Roster`] is built fresh for each matching run from `(identifier, group)`
//! pairs. Building validates the input; everything downstream can assume
//! identifiers are unique and every participant belongs to exactly one group.
//!
//! Groups are interned into dense [`GroupId`]s in order of first appearance,
//! and participants are addressed by their position in the roster. The search
//! code works entirely with these indices.
//!
//! # Example
//!
//! ```
//! use gift_match::roster::Roster;
//!
//! let roster = Roster::build([
//!     ("alice", "smith"),
//!     ("bob", "smith"),
//!     ("carol", "jones"),
//! ])
//! .unwrap();
//!
//! assert_eq!(roster.len(), 3);
//! assert_eq!(roster.group_of("bob"), Some("smith"));
//! assert_eq!(roster.largest_group().map(|(_, size)| size), Some(2));
//! ```

pub mod errors;

pub use errors::ValidationError;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One participant: an opaque identifier plus the group they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub group: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: group.into(),
        }
    }
}

/// Dense index of a group within one roster (order of first appearance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(usize);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Validated, immutable collection of participants.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
    /// Group of each participant, by roster position.
    group_index: Vec<GroupId>,
    /// Group names, by GroupId.
    group_names: Vec<String>,
    /// Member count, by GroupId.
    group_sizes: Vec<usize>,
    positions: HashMap<String, usize>,
}

impl Roster {
    /// Build a roster from `(identifier, group)` entries.
    ///
    /// Fails if the roster is empty, an identifier is empty or repeated, or a
    /// group identifier is empty, blank, or contains control characters. No
    /// other normalization is done: identifiers and groups are taken verbatim.
    pub fn build<I, S, G>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, G)>,
        S: Into<String>,
        G: Into<String>,
    {
        Self::from_participants(
            entries
                .into_iter()
                .map(|(id, group)| Participant::new(id, group)),
        )
    }

    /// Build a roster from already-constructed participants.
    pub fn from_participants<I>(participants: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Participant>,
    {
        let participants: Vec<Participant> = participants.into_iter().collect();
        if participants.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }

        let mut positions = HashMap::with_capacity(participants.len());
        let mut group_lookup: HashMap<&str, GroupId> = HashMap::new();
        let mut group_names = Vec::new();
        let mut group_sizes = Vec::new();
        let mut group_index = Vec::with_capacity(participants.len());

        for (position, participant) in participants.iter().enumerate() {
            if participant.id.is_empty() {
                return Err(ValidationError::EmptyIdentifier { position });
            }
            if !is_well_formed_group(&participant.group) {
                return Err(ValidationError::MalformedGroup {
                    id: participant.id.clone(),
                    group: participant.group.clone(),
                });
            }
            if let Some(&first) = positions.get(participant.id.as_str()) {
                return Err(ValidationError::DuplicateIdentifier {
                    id: participant.id.clone(),
                    first,
                    second: position,
                });
            }
            positions.insert(participant.id.clone(), position);

            let group = *group_lookup
                .entry(participant.group.as_str())
                .or_insert_with(|| {
                    group_names.push(participant.group.clone());
                    group_sizes.push(0);
                    GroupId(group_names.len() - 1)
                });
            group_sizes[group.0] += 1;
            group_index.push(group);
        }

        Ok(Self {
            participants,
            group_index,
            group_names,
            group_sizes,
            positions,
        })
    }

    /// Total number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false for a built roster; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participants in roster order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Identifier of the participant at `position`.
    pub fn id(&self, position: usize) -> &str {
        &self.participants[position].id
    }

    /// Roster position of `id`, if present.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Group name of `id`, if present.
    pub fn group_of(&self, id: &str) -> Option<&str> {
        self.position(id)
            .map(|position| self.participants[position].group.as_str())
    }

    /// Dense group index of the participant at `position`.
    pub fn group_at(&self, position: usize) -> GroupId {
        self.group_index[position]
    }

    /// Number of distinct groups.
    pub fn group_count(&self) -> usize {
        self.group_names.len()
    }

    /// Name of a group.
    pub fn group_name(&self, group: GroupId) -> &str {
        &self.group_names[group.0]
    }

    /// Member count of a group.
    pub fn group_size(&self, group: GroupId) -> usize {
        self.group_sizes[group.0]
    }

    /// `(group name, member count)` in order of first appearance.
    pub fn group_counts(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.group_names
            .iter()
            .map(String::as_str)
            .zip(self.group_sizes.iter().copied())
    }

    /// The largest group and its size. Ties go to the group seen first.
    pub fn largest_group(&self) -> Option<(GroupId, usize)> {
        self.group_sizes
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (index, size)| match best {
                Some((_, best_size)) if best_size >= size => best,
                _ => Some((GroupId(index), size)),
            })
    }
}

fn is_well_formed_group(group: &str) -> bool {
    !group.trim().is_empty() && !group.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_counts_groups() {
        let roster = Roster::build([
            ("a", "fam1"),
            ("c", "fam2"),
            ("b", "fam1"),
            ("d", "fam3"),
        ])
        .unwrap();

        assert_eq!(roster.len(), 4);
        assert_eq!(roster.group_count(), 3);
        let counts: Vec<_> = roster.group_counts().collect();
        assert_eq!(counts, vec![("fam1", 2), ("fam2", 1), ("fam3", 1)]);
        assert_eq!(roster.group_at(2), roster.group_at(0));
        assert_ne!(roster.group_at(1), roster.group_at(0));
    }

    #[test]
    fn test_lookup() {
        let roster = Roster::build([("a", "x"), ("b", "y")]).unwrap();
        assert_eq!(roster.position("b"), Some(1));
        assert_eq!(roster.group_of("a"), Some("x"));
        assert_eq!(roster.group_of("zed"), None);
        assert_eq!(roster.id(1), "b");
    }

    #[test]
    fn test_largest_group_tie_goes_to_first() {
        let roster = Roster::build([("a", "x"), ("b", "y"), ("c", "y"), ("d", "x")]).unwrap();
        let (group, size) = roster.largest_group().unwrap();
        assert_eq!(size, 2);
        assert_eq!(roster.group_name(group), "x");
    }

    #[test]
    fn test_empty_roster() {
        let entries: Vec<(&str, &str)> = vec![];
        assert_eq!(Roster::build(entries).unwrap_err(), ValidationError::EmptyRoster);
    }

    #[test]
    fn test_duplicate_identifier() {
        let err = Roster::build([("a", "x"), ("b", "y"), ("a", "z")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateIdentifier {
                id: "a".to_string(),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn test_malformed_groups() {
        for bad in ["", "   ", "fam\n1", "\t"] {
            let err = Roster::build([("a", bad)]).unwrap_err();
            assert!(
                matches!(err, ValidationError::MalformedGroup { .. }),
                "group {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_empty_identifier() {
        let err = Roster::build([("a", "x"), ("", "y")]).unwrap_err();
        assert_eq!(err, ValidationError::EmptyIdentifier { position: 1 });
    }

    #[test]
    fn test_no_normalization() {
        // Case and surrounding spaces are significant.
        let roster = Roster::build([("a", "Fam"), ("b", "fam"), ("c", " fam")]).unwrap();
        assert_eq!(roster.group_count(), 3);
    }
}
