//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains every rule of a Cookie Crunch level: the board
//! layout, token placement, match detection, swap legality, cascade
//! resolution, shuffling, scoring, and the turn state machine. It has no
//! dependencies on rendering, input, or timing, so it runs the same in a
//! terminal, a GUI, or a headless test.
//!
//! # Module Structure
//!
//! - [`layout`]: 9x9 playable/void mask
//! - [`grid`]: token occupancy over a layout
//! - [`fill`]: random placement with optional match avoidance
//! - [`chain`]: horizontal, vertical, and compound chain detection
//! - [`swap`]: swap legality and possible-swap enumeration
//! - [`resolver`]: clearing, gravity, and top-up with movement data
//! - [`shuffle`]: fresh solvable boards with a bounded retry count
//! - [`scoring`]: chain values and combo multiplier
//! - [`level`]: the façade that owns the state and enforces call order
//! - [`catalog`]: built-in and on-disk level definitions
//! - [`config`]: TOML engine tuning
//!
//! # Coordinates
//!
//! Columns and rows run 0..=8. Row 0 is the **bottom** row: gravity moves
//! tokens toward row 0 and new tokens enter above row 8.
//!
//! # Example
//!
//! ```
//! use cookie_crunch_core::{EngineConfig, Level, TurnState};
//!
//! let mut level = Level::load("Level_0", EngineConfig::default(), 12345).unwrap();
//! let swap = level.hint().unwrap();
//! level.perform_swap(swap).unwrap();
//!
//! // resolve the cascade until no chains remain
//! while !level.remove_matches().unwrap().is_empty() {
//!     level.fill_holes().unwrap();
//!     level.top_up_cookies().unwrap();
//! }
//! assert!(level.score() >= 60);
//! assert_eq!(level.moves_left(), 14);
//! assert!(matches!(level.state(), TurnState::AwaitingSwap | TurnState::GameOver(_)));
//! ```

pub mod catalog;
pub mod chain;
pub mod config;
pub mod error;
pub mod fill;
pub mod grid;
pub mod layout;
pub mod level;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod shuffle;
pub mod snapshot;
pub mod swap;

pub use cookie_crunch_types as types;

// Re-export commonly used types for convenience
pub use catalog::{LevelCatalog, LevelDefinition};
pub use chain::{find_chains, Chain, ChainShape};
pub use config::{EngineConfig, ShuffleConfig};
pub use error::{EngineError, EngineResult, LevelLoadError, SwapRejection};
pub use grid::Grid;
pub use layout::Layout;
pub use level::{Level, MatchStep, Outcome, TurnState};
pub use resolver::{FallingToken, NewToken};
pub use rng::SimpleRng;
pub use scoring::ScoreTable;
pub use snapshot::LevelSnapshot;
