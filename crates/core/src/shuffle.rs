//! Shuffle module - fresh solvable boards
//!
//! A shuffle discards every token and refills the layout with match
//! avoidance, then requires at least one possible swap. Unsolvable fills are
//! retried up to a configured bound; running out is fatal for the level.

use tracing::warn;

use crate::chain::has_chain;
use crate::error::{EngineError, EngineResult};
use crate::fill::fill_random;
use crate::grid::Grid;
use crate::layout::Layout;
use crate::rng::SimpleRng;
use crate::swap::detect_possible_swaps;
use crate::types::{Position, Swap, Token};

/// Default retry bound before giving up with `ShuffleExhausted`
pub const DEFAULT_SHUFFLE_ATTEMPTS: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Shuffled {
    pub grid: Grid,
    /// Every token on the new board, row-major
    pub tokens: Vec<Token>,
    /// Non-empty by construction
    pub possible_swaps: Vec<Swap>,
    /// Fills tried, including the accepted one
    pub attempts: u32,
}

/// Produce a chain-free board with at least one possible swap
pub fn shuffle(
    layout: &Layout,
    kind_count: u8,
    max_attempts: u32,
    rng: &mut SimpleRng,
) -> EngineResult<Shuffled> {
    let empty = Grid::new(*layout);
    let positions: Vec<Position> = layout.playable_positions().collect();

    for attempt in 1..=max_attempts {
        let (grid, tokens) = fill_random(&empty, &positions, true, kind_count, rng)?;
        if has_chain(&grid) {
            warn!(attempt, "shuffle produced a chain, retrying");
            continue;
        }
        let possible_swaps = detect_possible_swaps(&grid);
        if possible_swaps.is_empty() {
            warn!(attempt, "shuffle produced a board with no possible swaps, retrying");
            continue;
        }
        return Ok(Shuffled {
            grid,
            tokens,
            possible_swaps,
            attempts: attempt,
        });
    }

    Err(EngineError::ShuffleExhausted {
        attempts: max_attempts,
    })
}
