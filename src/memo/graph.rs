// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The allowed-gift graph.
//!
//! Bipartite graph with every participant on both sides: an edge connects
//! giver `g` to receiver `r` iff `r != g` and `group(r) != group(g)`. Since a
//! participant is always in their own group, the second condition implies the
//! first; both are kept explicit in [`AllowedGiftGraph::allows`].

use crate::roster::{GroupId, Roster};

/// Adjacency lists of the allowed-gift graph, indexed by roster position.
#[derive(Debug, Clone)]
pub struct AllowedGiftGraph {
    groups: Vec<GroupId>,
    /// `receivers[g]` lists the allowed receivers of giver `g` in roster order.
    receivers: Vec<Vec<usize>>,
}

impl AllowedGiftGraph {
    /// Build the graph for a roster. O(n²) in the number of participants.
    pub fn new(roster: &Roster) -> Self {
        let n = roster.len();
        let groups: Vec<GroupId> = (0..n).map(|p| roster.group_at(p)).collect();
        let receivers = (0..n)
            .map(|giver| {
                (0..n)
                    .filter(|&receiver| receiver != giver && groups[receiver] != groups[giver])
                    .collect()
            })
            .collect();
        Self { groups, receivers }
    }

    /// Number of participants (nodes on each side).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Allowed receivers of `giver`, in roster order.
    pub fn receivers(&self, giver: usize) -> &[usize] {
        &self.receivers[giver]
    }

    /// Whether `giver` may give to `receiver`.
    pub fn allows(&self, giver: usize, receiver: usize) -> bool {
        giver != receiver && self.groups[giver] != self.groups[receiver]
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.receivers.iter().map(Vec::len).sum()
    }
}
