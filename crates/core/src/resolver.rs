//! Resolver module - the three mutation steps of a cascade
//!
//! 1. [`clear_chains`]: matched cells become holes
//! 2. [`apply_gravity`]: each column compacts downward, keeping order
//! 3. [`top_up`]: remaining holes receive fresh random tokens
//!
//! Each step takes the current grid by reference and returns the next grid
//! plus the per-column movement data a presentation layer animates. Void
//! cells are skipped: a column is the sequence of its playable cells.

use serde::Serialize;

use crate::chain::Chain;
use crate::error::EngineResult;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::types::{Position, TokenKind, NUM_COLUMNS, NUM_ROWS};

/// A surviving token moved down by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FallingToken {
    pub kind: TokenKind,
    pub from: Position,
    pub to: Position,
}

impl FallingToken {
    /// Rows travelled, counting void cells passed over
    pub fn distance(&self) -> u8 {
        (self.from.row - self.to.row) as u8
    }
}

/// A freshly drawn token entering from above the top row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NewToken {
    pub kind: TokenKind,
    pub position: Position,
    /// Virtual row the token starts from; always `>= NUM_ROWS`
    pub spawn_row: i8,
}

impl NewToken {
    pub fn fall_distance(&self) -> u8 {
        (self.spawn_row - self.position.row) as u8
    }
}

/// Turn every chain member into a hole
pub fn clear_chains(grid: &Grid, chains: &[Chain]) -> EngineResult<Grid> {
    let mut next = grid.clone();
    for chain in chains {
        for &p in &chain.positions {
            next.set(p, None)?;
        }
    }
    Ok(next)
}

/// Compact every column downward
///
/// Returns the settled grid and, for each column where something moved, the
/// moved tokens ordered bottom to top.
pub fn apply_gravity(grid: &Grid) -> EngineResult<(Grid, Vec<Vec<FallingToken>>)> {
    let mut next = grid.clone();
    let mut columns = Vec::new();

    for column in 0..NUM_COLUMNS as i8 {
        let slots = grid.layout().column_slots(column);
        let mut moved = Vec::new();
        let mut write = 0usize;

        for &from in &slots {
            let Some(kind) = grid.kind_at(from) else {
                continue;
            };
            let to = slots[write];
            write += 1;
            if to != from {
                next.set(to, Some(kind))?;
                next.set(from, None)?;
                moved.push(FallingToken { kind, from, to });
            }
        }

        if !moved.is_empty() {
            columns.push(moved);
        }
    }

    Ok((next, columns))
}

/// Fill every remaining hole with a random kind
///
/// Holes are filled top to bottom within each column. The `i`-th new token
/// counted from the bottom of its column spawns at virtual row
/// `NUM_ROWS + i`, so the stack drops in together. No match avoidance:
/// chains formed here are the next cascade step.
pub fn top_up(
    grid: &Grid,
    kind_count: u8,
    rng: &mut SimpleRng,
) -> EngineResult<(Grid, Vec<Vec<NewToken>>)> {
    let mut next = grid.clone();
    let mut columns = Vec::new();

    for column in 0..NUM_COLUMNS as i8 {
        let holes: Vec<Position> = grid
            .layout()
            .column_slots(column)
            .into_iter()
            .filter(|p| grid.kind_at(*p).is_none())
            .collect();
        if holes.is_empty() {
            continue;
        }

        let mut spawned = Vec::with_capacity(holes.len());
        for (i, &position) in holes.iter().enumerate().rev() {
            let kind = rng.next_kind(kind_count);
            next.set(position, Some(kind))?;
            spawned.push(NewToken {
                kind,
                position,
                spawn_row: NUM_ROWS as i8 + i as i8,
            });
        }
        columns.push(spawned);
    }

    Ok((next, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::find_chains;
    use crate::types::NUM_KINDS;

    #[test]
    fn test_clear_chains_makes_holes() {
        let grid = Grid::from_ascii(&[
            "CUCUCUCUC",
            "DODODODOD",
            "CUCUCUCUC",
            "DODODODOD",
            "CUCUCUCUC",
            "DODODODOD",
            "CUCUCUCUC",
            "DODODODOD",
            "MMMUCUCUC",
        ])
        .unwrap();
        let chains = find_chains(&grid);
        let cleared = clear_chains(&grid, &chains).unwrap();
        let holes: Vec<Position> = cleared.holes().collect();
        assert_eq!(
            holes,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_gravity_preserves_order_and_reports_moves() {
        let grid = Grid::from_ascii(&[
            "C........",
            ".........",
            "U........",
            ".........",
            ".........",
            "D........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();
        let (settled, columns) = apply_gravity(&grid).unwrap();

        assert_eq!(settled.kind_at(Position::new(0, 0)), Some(TokenKind::Danish));
        assert_eq!(settled.kind_at(Position::new(0, 1)), Some(TokenKind::Cupcake));
        assert_eq!(settled.kind_at(Position::new(0, 2)), Some(TokenKind::Croissant));
        assert_eq!(settled.kind_at(Position::new(0, 3)), None);

        assert_eq!(columns.len(), 1);
        let moves = &columns[0];
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].from, Position::new(0, 3));
        assert_eq!(moves[0].to, Position::new(0, 0));
        assert_eq!(moves[0].distance(), 3);
        assert_eq!(moves[2].from, Position::new(0, 8));
        assert_eq!(moves[2].distance(), 6);
    }

    #[test]
    fn test_gravity_skips_void_cells() {
        // column 0: void at rows 1 and 2; token at row 4 must land on row 0
        let grid = Grid::from_ascii(&[
            "M........",
            ".........",
            ".........",
            ".........",
            "S........",
            ".........",
            "#........",
            "#........",
            ".........",
        ])
        .unwrap();
        let (settled, columns) = apply_gravity(&grid).unwrap();
        assert_eq!(settled.kind_at(Position::new(0, 0)), Some(TokenKind::SugarCookie));
        assert_eq!(settled.kind_at(Position::new(0, 3)), Some(TokenKind::Macaroon));
        assert_eq!(columns[0][0].distance(), 4);
        assert_eq!(columns[0][1].from, Position::new(0, 8));
        assert!(settled.get(Position::new(0, 1)).is_err());
    }

    #[test]
    fn test_full_column_does_not_move() {
        let grid = Grid::from_ascii(&[
            "CUCUCUCUC",
            "DODODODOD",
            "CUCUCUCUC",
            "DODODODOD",
            "CUCUCUCUC",
            "DODODODOD",
            "CUCUCUCUC",
            "DODODODOD",
            "CUCUCUCUC",
        ])
        .unwrap();
        let (settled, columns) = apply_gravity(&grid).unwrap();
        assert_eq!(settled, grid);
        assert!(columns.is_empty());
    }

    #[test]
    fn test_top_up_fills_every_hole() {
        let grid = Grid::from_ascii(&[
            ".........",
            ".........",
            "#CUCUCUCU",
            "DODODODOD",
            "CUCUCUCUC",
            "DODODODOD",
            "CUCUCUCUC",
            "DODODODOD",
            "CUCUCUCUC",
        ])
        .unwrap();
        let mut rng = SimpleRng::new(3);
        let (full, columns) = top_up(&grid, NUM_KINDS, &mut rng).unwrap();
        assert!(full.is_full());
        assert_eq!(columns.len(), 9);

        // column 0: holes at rows 7 and 8 above a void at row 6
        let col0 = &columns[0];
        assert_eq!(col0.len(), 2);
        assert_eq!(col0[0].position, Position::new(0, 8));
        assert_eq!(col0[0].spawn_row, 10);
        assert_eq!(col0[1].position, Position::new(0, 7));
        assert_eq!(col0[1].spawn_row, 9);
        assert!(col0.iter().all(|t| t.fall_distance() == 2));
    }
}
