// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Assignments: the giver → receiver mapping handed back to the caller.
//!
//! An [`Assignment`] serializes as a flat JSON object keyed by giver, which is
//! how the surrounding application stores it for the later reveal.

use crate::roster::Roster;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Giver identifier → receiver identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    pairs: BTreeMap<String, String>,
}

/// A broken assignment invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentViolation {
    #[error("{id:?} is not in the roster")]
    UnknownParticipant { id: String },

    #[error("{id:?} has no receiver")]
    MissingGiver { id: String },

    #[error("{receiver:?} receives from more than one giver")]
    DuplicateReceiver { receiver: String },

    #[error("{id:?} is assigned to themself")]
    SelfAssignment { id: String },

    #[error("{giver:?} and {receiver:?} are both in group {group:?}")]
    SameGroup {
        giver: String,
        receiver: String,
        group: String,
    },
}

impl Assignment {
    /// Build from `receivers[giver]` over roster positions.
    pub(crate) fn from_positions(roster: &Roster, receivers: &[usize]) -> Self {
        let pairs = receivers
            .iter()
            .enumerate()
            .map(|(giver, &receiver)| (roster.id(giver).to_string(), roster.id(receiver).to_string()))
            .collect();
        Self { pairs }
    }

    /// Build from stored `(giver, receiver)` pairs, e.g. when loading a saved assignment.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(giver, receiver)| (giver.into(), receiver.into()))
                .collect(),
        }
    }

    /// The receiver assigned to `giver`.
    pub fn receiver_of(&self, giver: &str) -> Option<&str> {
        self.pairs.get(giver).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `(giver, receiver)` pairs ordered by giver.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs
            .iter()
            .map(|(giver, receiver)| (giver.as_str(), receiver.as_str()))
    }

    /// Check the assignment against a roster.
    ///
    /// Holds iff the mapping is a bijection on the roster's identifiers, has
    /// no fixed point, and never pairs two members of the same group.
    pub fn verify(&self, roster: &Roster) -> Result<(), AssignmentViolation> {
        if let Some(giver) = self.pairs.keys().find(|giver| roster.position(giver).is_none()) {
            return Err(AssignmentViolation::UnknownParticipant { id: giver.clone() });
        }

        let mut received = HashSet::with_capacity(roster.len());
        for participant in roster.participants() {
            let giver = participant.id.as_str();
            let receiver = self
                .receiver_of(giver)
                .ok_or_else(|| AssignmentViolation::MissingGiver { id: giver.to_string() })?;
            let receiver_group = roster
                .group_of(receiver)
                .ok_or_else(|| AssignmentViolation::UnknownParticipant {
                    id: receiver.to_string(),
                })?;

            if receiver == giver {
                return Err(AssignmentViolation::SelfAssignment { id: giver.to_string() });
            }
            if receiver_group == participant.group {
                return Err(AssignmentViolation::SameGroup {
                    giver: giver.to_string(),
                    receiver: receiver.to_string(),
                    group: participant.group.clone(),
                });
            }
            if !received.insert(receiver) {
                return Err(AssignmentViolation::DuplicateReceiver {
                    receiver: receiver.to_string(),
                });
            }
        }
        Ok(())
    }
}
