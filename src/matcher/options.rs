// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Options for a matching run.
//!
//! `MatchOptions` deserializes with defaults for every missing field, so an
//! embedding application can keep it in its own configuration file:
//!
//! ```
//! use gift_match::{FallbackMode, MatchOptions};
//!
//! let options: MatchOptions = serde_json::from_str(r#"{"random_seed": 2024}"#).unwrap();
//! assert_eq!(options.attempt_budget, 1000);
//! assert_eq!(options.random_seed, Some(2024));
//! assert_eq!(options.fallback, FallbackMode::Guaranteed);
//! ```

use serde::{Deserialize, Serialize};

/// Resampling attempts before switching to the fallback search.
pub const DEFAULT_ATTEMPT_BUDGET: usize = 1000;

/// What to do when the fast path runs out of attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Run the constructive search, which always reaches a verdict.
    #[default]
    Guaranteed,
    /// Stop and report the run as exhausted.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Resampling attempts before the fallback. Zero skips the fast path.
    pub attempt_budget: usize,
    /// Seed for reproducible runs; entropy when absent.
    pub random_seed: Option<u64>,
    pub fallback: FallbackMode,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            random_seed: None,
            fallback: FallbackMode::default(),
        }
    }
}

impl MatchOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_budget(mut self, attempt_budget: usize) -> Self {
        self.attempt_budget = attempt_budget;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackMode) -> Self {
        self.fallback = fallback;
        self
    }
}
