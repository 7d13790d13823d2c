//! Random fill for the initial board, shuffles, and top-ups

use crate::chain::creates_run;
use crate::error::EngineResult;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::types::{Position, Token, TokenKind};

/// Fill `positions` (in the given order) with random kinds
///
/// With `avoid_matches` set, a drawn kind that would complete a run of three
/// with tokens already on the grid is rejected and redrawn. Filling an empty
/// grid in row-major order this way never produces a chain as long as at
/// least three kinds are in play. If every kind is excluded at some cell
/// (only possible on a partially filled grid) the cell takes an unrestricted
/// draw and callers that need a quiet board must re-check it.
///
/// Returns the new grid and the tokens placed, in fill order.
pub fn fill_random(
    grid: &Grid,
    positions: &[Position],
    avoid_matches: bool,
    kind_count: u8,
    rng: &mut SimpleRng,
) -> EngineResult<(Grid, Vec<Token>)> {
    let mut next = grid.clone();
    let mut placed = Vec::with_capacity(positions.len());
    let palette = &TokenKind::ALL[..kind_count.clamp(1, TokenKind::ALL.len() as u8) as usize];

    for &p in positions {
        // validates bounds and playability before any draw
        next.get(p)?;

        let restrict = avoid_matches && palette.iter().any(|k| !creates_run(&next, p, *k));
        let kind = loop {
            let kind = rng.next_kind(kind_count);
            if !restrict || !creates_run(&next, p, kind) {
                break kind;
            }
        };

        next.set(p, Some(kind))?;
        placed.push(Token::new(kind, p));
    }

    Ok((next, placed))
}
