// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier 1: MEMO data (immutable, computed once per matching run).
//!
//! The only precomputed structure is the allowed-gift graph. It is derived
//! from the roster before any search starts and never changes afterwards, so
//! the fast path, the feasibility check and the fallback can all share it.

pub mod graph;

pub use graph::AllowedGiftGraph;
