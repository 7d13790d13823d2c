//! Engine tuning configuration.
//!
//! Read from a TOML file. Every key is optional; missing keys (or a missing
//! file) fall back to the defaults below.
//!
//! ```toml
//! kinds = 6
//! levels_dir = "levels"
//!
//! [score]
//! base = 60
//! per_extra = 60
//!
//! [shuffle]
//! max_attempts = 100
//! costs_move = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LevelLoadError;
use crate::scoring::ScoreTable;
use crate::shuffle::DEFAULT_SHUFFLE_ATTEMPTS;
use crate::types::NUM_KINDS;

/// Fewest kinds that still guarantee a chain-free fill
pub const MIN_KINDS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShuffleConfig {
    pub max_attempts: u32,
    /// A player-requested shuffle uses up one move
    pub costs_move: bool,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_SHUFFLE_ATTEMPTS,
            costs_move: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub score: ScoreTable,
    pub shuffle: ShuffleConfig,
    /// Number of token kinds in play (first `kinds` of the palette)
    pub kinds: u8,
    /// Searched for `<name>.json` before the built-in levels
    pub levels_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score: ScoreTable::default(),
            shuffle: ShuffleConfig::default(),
            kinds: NUM_KINDS,
            levels_dir: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, LevelLoadError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, LevelLoadError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(LevelLoadError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), LevelLoadError> {
        if !(MIN_KINDS..=NUM_KINDS).contains(&self.kinds) {
            return Err(LevelLoadError::BadParameter {
                reason: format!(
                    "kinds must be between {} and {}, got {}",
                    MIN_KINDS, NUM_KINDS, self.kinds
                ),
            });
        }
        if self.shuffle.max_attempts == 0 {
            return Err(LevelLoadError::BadParameter {
                reason: "shuffle.max_attempts must be at least 1".into(),
            });
        }
        if self.score.base == 0 {
            return Err(LevelLoadError::BadParameter {
                reason: "score.base must be positive".into(),
            });
        }
        Ok(())
    }
}
