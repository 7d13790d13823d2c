//! Engine error taxonomy
//!
//! Caller mistakes (`OutOfBounds`, `InvalidTile`, `IllegalSwap`,
//! `InvalidState`) never mutate the level. `LevelLoad` and
//! `ShuffleExhausted` are fatal for the current level.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Position, Swap};

/// Why a swap was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    NotAdjacent,
    SameKind,
    EmptySlot,
    NoMatch,
}

impl SwapRejection {
    pub fn message(self) -> &'static str {
        match self {
            SwapRejection::NotAdjacent => "positions are not horizontally or vertically adjacent",
            SwapRejection::SameKind => "both tokens are the same kind",
            SwapRejection::EmptySlot => "one of the cells holds no token",
            SwapRejection::NoMatch => "exchange would not produce a chain",
        }
    }
}

#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("unknown level: {0}")]
    UnknownLevel(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("malformed tile mask: {reason}")]
    BadMask { reason: String },
    #[error("invalid level parameter: {reason}")]
    BadParameter { reason: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("position {0} is not a playable tile")]
    InvalidTile(Position),
    #[error("illegal swap {swap}: {}", reason.message())]
    IllegalSwap { swap: Swap, reason: SwapRejection },
    #[error("{operation} not allowed while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
    #[error(transparent)]
    LevelLoad(#[from] LevelLoadError),
    #[error("no solvable arrangement found after {attempts} shuffle attempts")]
    ShuffleExhausted { attempts: u32 },
}

impl EngineError {
    /// Stable machine-readable code for presentation layers
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::OutOfBounds(_) => "out_of_bounds",
            EngineError::InvalidTile(_) => "invalid_tile",
            EngineError::IllegalSwap { .. } => "illegal_swap",
            EngineError::InvalidState { .. } => "invalid_state",
            EngineError::LevelLoad(_) => "level_load",
            EngineError::ShuffleExhausted { .. } => "shuffle_exhausted",
        }
    }

    /// Fatal errors end the current level; everything else leaves it untouched.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::LevelLoad(_) | EngineError::ShuffleExhausted { .. }
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
