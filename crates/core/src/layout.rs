//! Layout module - which cells of the 9x9 board take part in play
//!
//! A layout is immutable once built. Void cells never hold a token and are
//! transparent to matching, gravity, and swaps.

use arrayvec::ArrayVec;

use crate::error::{EngineError, EngineResult};
use crate::types::{Position, Tile, NUM_CELLS, NUM_COLUMNS, NUM_ROWS};

/// Playable/void mask over the fixed board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Row-major mask, bottom row first
    playable: [bool; NUM_CELLS],
}

impl Layout {
    /// Every cell playable
    pub fn full() -> Self {
        Self {
            playable: [true; NUM_CELLS],
        }
    }

    /// Build from a row-major mask, bottom row first
    pub fn from_mask(playable: [bool; NUM_CELLS]) -> Self {
        Self { playable }
    }

    /// Build from rows listed top row first, the way level files are written
    pub fn from_rows_top_down(rows: &[[bool; NUM_COLUMNS as usize]; NUM_ROWS as usize]) -> Self {
        let mut playable = [false; NUM_CELLS];
        for (i, row) in rows.iter().enumerate() {
            let y = NUM_ROWS as usize - 1 - i;
            for (x, cell) in row.iter().enumerate() {
                playable[y * NUM_COLUMNS as usize + x] = *cell;
            }
        }
        Self { playable }
    }

    fn checked_index(position: Position) -> EngineResult<usize> {
        position.index().ok_or(EngineError::OutOfBounds(position))
    }

    pub fn is_playable(&self, position: Position) -> EngineResult<bool> {
        Ok(self.playable[Self::checked_index(position)?])
    }

    /// Lenient form used inside scans: off-board counts as void
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        position.index().is_some_and(|i| self.playable[i])
    }

    pub fn tile(&self, position: Position) -> EngineResult<Tile> {
        if self.is_playable(position)? {
            Ok(Tile::Playable(position))
        } else {
            Ok(Tile::Void(position))
        }
    }

    /// Fail with `OutOfBounds` or `InvalidTile` unless the cell is playable
    pub fn require_playable(&self, position: Position) -> EngineResult<()> {
        if self.is_playable(position)? {
            Ok(())
        } else {
            Err(EngineError::InvalidTile(position))
        }
    }

    /// Up to four playable orthogonal neighbors (left, right, down, up)
    pub fn neighbors(&self, position: Position) -> EngineResult<ArrayVec<Position, 4>> {
        self.require_playable(position)?;
        let mut out = ArrayVec::new();
        for (dc, dr) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let n = position.offset(dc, dr);
            if self.contains(n) {
                out.push(n);
            }
        }
        Ok(out)
    }

    /// Playable cells of one column, bottom to top
    pub fn column_slots(&self, column: i8) -> ArrayVec<Position, { NUM_ROWS as usize }> {
        (0..NUM_ROWS as i8)
            .map(|row| Position::new(column, row))
            .filter(|p| self.contains(*p))
            .collect()
    }

    pub fn playable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(|p| self.contains(*p))
    }

    pub fn playable_count(&self) -> usize {
        self.playable.iter().filter(|p| **p).count()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::full()
    }
}
