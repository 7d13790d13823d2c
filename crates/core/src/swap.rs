//! Swap module - swap legality and possible-swap enumeration
//!
//! A swap is legal when both cells are playable and hold tokens, the cells
//! are orthogonally adjacent, the kinds differ, and exchanging them would
//! leave at least one chain on the board. The match check exchanges the pair
//! on a scratch grid, looks for a chain, and exchanges back.

use crate::chain::has_chain;
use crate::error::{EngineError, EngineResult, SwapRejection};
use crate::grid::Grid;
use crate::types::{Position, Swap};

fn reject(swap: Swap, reason: SwapRejection) -> EngineError {
    EngineError::IllegalSwap { swap, reason }
}

/// Check every rule short of the match test
fn precheck(grid: &Grid, swap: Swap) -> EngineResult<()> {
    let a = grid.get(swap.first())?;
    let b = grid.get(swap.second())?;
    if !swap.is_adjacent() {
        return Err(reject(swap, SwapRejection::NotAdjacent));
    }
    match (a, b) {
        (Some(a), Some(b)) if a.kind == b.kind => Err(reject(swap, SwapRejection::SameKind)),
        (Some(_), Some(_)) => Ok(()),
        _ => Err(reject(swap, SwapRejection::EmptySlot)),
    }
}

/// Exchange on `probe`, test for a chain, and exchange back
fn exchange_matches(probe: &mut Grid, swap: Swap) -> EngineResult<bool> {
    probe.exchange(swap)?;
    let matched = has_chain(probe);
    probe.exchange(swap)?;
    Ok(matched)
}

/// Full validation with the precise failure reason
pub fn validate_swap(grid: &Grid, swap: Swap) -> EngineResult<()> {
    precheck(grid, swap)?;
    let mut probe = grid.clone();
    if exchange_matches(&mut probe, swap)? {
        Ok(())
    } else {
        Err(reject(swap, SwapRejection::NoMatch))
    }
}

pub fn is_possible_swap(grid: &Grid, swap: Swap) -> bool {
    validate_swap(grid, swap).is_ok()
}

/// Every legal swap, each unordered pair once, in row-major order of the
/// pair's lower cell (right neighbor before upper neighbor)
pub fn detect_possible_swaps(grid: &Grid) -> Vec<Swap> {
    let mut probe = grid.clone();
    let mut swaps = Vec::new();
    let layout = *grid.layout();

    for p in layout.playable_positions() {
        for q in [p.offset(1, 0), p.offset(0, 1)] {
            if !layout.contains(q) {
                continue;
            }
            let swap = Swap::new(p, q);
            if precheck(grid, swap).is_err() {
                continue;
            }
            if matches!(exchange_matches(&mut probe, swap), Ok(true)) {
                swaps.push(swap);
            }
        }
    }
    swaps
}

/// Cells that `position` can legally be swapped with, per `swaps`
pub fn swap_partners(swaps: &[Swap], position: Position) -> Vec<Position> {
    swaps
        .iter()
        .filter_map(|s| {
            if s.first() == position {
                Some(s.second())
            } else if s.second() == position {
                Some(s.first())
            } else {
                None
            }
        })
        .collect()
}
