//! Scoring module - chain values and the combo multiplier
//!
//! A chain of length `L` is worth `base_value(L) * multiplier`, where
//! `base_value(3) = base` and every extra member adds `per_extra`. The
//! multiplier starts at 1 for the first cascade step of a turn and grows by
//! one per step, so a chain found later in a cascade is always worth more
//! than the same chain found earlier.

use serde::Deserialize;

use crate::chain::{Chain, MIN_RUN};

/// Default points for a three-token chain
pub const DEFAULT_BASE_SCORE: u32 = 60;

/// Default bonus for every member beyond three
pub const DEFAULT_EXTRA_MEMBER_SCORE: u32 = 60;

/// Tunable chain value table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub base: u32,
    pub per_extra: u32,
}

impl ScoreTable {
    /// Points for a chain of `len` members before the multiplier
    ///
    /// Non-decreasing in `len`; chains shorter than three score nothing.
    pub fn base_value(&self, len: usize) -> u32 {
        if len < MIN_RUN {
            return 0;
        }
        let extra = (len - MIN_RUN) as u32;
        self.base.saturating_add(self.per_extra.saturating_mul(extra))
    }

    pub fn chain_score(&self, len: usize, multiplier: u32) -> u32 {
        self.base_value(len).saturating_mul(multiplier.max(1))
    }

    /// Score every chain in place and return the step total
    pub fn score_chains(&self, chains: &mut [Chain], multiplier: u32) -> u32 {
        chains.iter_mut().fold(0u32, |total, chain| {
            chain.score = self.chain_score(chain.len(), multiplier);
            total.saturating_add(chain.score)
        })
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_SCORE,
            per_extra: DEFAULT_EXTRA_MEMBER_SCORE,
        }
    }
}
