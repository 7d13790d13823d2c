//! Grid module - the mutable token container
//!
//! Flat row-major storage over the fixed 9x9 board, bottom row first.
//! Every playable cell holds either a token kind or a hole (`None`).
//! Void cells are always `None` and reject access with `InvalidTile`.
//!
//! Text form (used by tests and debug dumps) lists rows top first:
//! one glyph per kind (see [`TokenKind::glyph`]), `.` for a hole, `#` for void.

use std::fmt;

use crate::error::{EngineError, EngineResult, LevelLoadError, SwapRejection};
use crate::layout::Layout;
use crate::types::{Position, Swap, Token, TokenKind, NUM_CELLS, NUM_COLUMNS, NUM_ROWS};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    layout: Layout,
    cells: [Option<TokenKind>; NUM_CELLS],
}

impl Grid {
    /// Create a grid over `layout` with every playable cell a hole
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            cells: [None; NUM_CELLS],
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn playable_index(&self, position: Position) -> EngineResult<usize> {
        self.layout.require_playable(position)?;
        position.index().ok_or(EngineError::OutOfBounds(position))
    }

    pub fn get(&self, position: Position) -> EngineResult<Option<Token>> {
        let idx = self.playable_index(position)?;
        Ok(self.cells[idx].map(|kind| Token::new(kind, position)))
    }

    /// Place `kind` at `position`, or make it a hole with `None`
    ///
    /// Takes a kind rather than a [`Token`]: a token's position is the cell
    /// it occupies, so the cell supplies it.
    pub fn set(&mut self, position: Position, kind: Option<TokenKind>) -> EngineResult<()> {
        let idx = self.playable_index(position)?;
        self.cells[idx] = kind;
        Ok(())
    }

    /// Kind at a position; off-board, void, and holes all read as `None`
    #[inline]
    pub fn kind_at(&self, position: Position) -> Option<TokenKind> {
        position.index().and_then(|i| self.cells[i])
    }

    /// Exchange the contents of two playable cells
    ///
    /// No rule checks beyond adjacency: applying the same swap twice restores
    /// the grid exactly.
    pub fn exchange(&mut self, swap: Swap) -> EngineResult<()> {
        let a = self.playable_index(swap.first())?;
        let b = self.playable_index(swap.second())?;
        if !swap.is_adjacent() {
            return Err(EngineError::IllegalSwap {
                swap,
                reason: SwapRejection::NotAdjacent,
            });
        }
        self.cells.swap(a, b);
        Ok(())
    }

    /// All tokens in row-major order, bottom row first
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.layout
            .playable_positions()
            .filter_map(|p| self.kind_at(p).map(|kind| Token::new(kind, p)))
    }

    pub fn holes(&self) -> impl Iterator<Item = Position> + '_ {
        self.layout
            .playable_positions()
            .filter(|p| self.kind_at(*p).is_none())
    }

    pub fn is_full(&self) -> bool {
        self.holes().next().is_none()
    }

    /// Remove every token, leaving only holes
    pub fn clear(&mut self) {
        self.cells = [None; NUM_CELLS];
    }

    /// Parse the text form (rows top first)
    pub fn from_ascii(rows: &[&str]) -> Result<Self, LevelLoadError> {
        if rows.len() != NUM_ROWS as usize {
            return Err(LevelLoadError::BadMask {
                reason: format!("expected {} rows, found {}", NUM_ROWS, rows.len()),
            });
        }

        let mut mask = [false; NUM_CELLS];
        let mut cells = [None; NUM_CELLS];
        for (i, line) in rows.iter().enumerate() {
            let row = (NUM_ROWS as usize - 1 - i) as i8;
            let glyphs: Vec<char> = line.chars().collect();
            if glyphs.len() != NUM_COLUMNS as usize {
                return Err(LevelLoadError::BadMask {
                    reason: format!("row {} has {} cells", row, glyphs.len()),
                });
            }
            for (column, glyph) in glyphs.into_iter().enumerate() {
                let idx = Position::new(column as i8, row)
                    .index()
                    .ok_or_else(|| LevelLoadError::BadMask {
                        reason: format!("cell ({}, {}) off board", column, row),
                    })?;
                match glyph {
                    '#' => {}
                    '.' => mask[idx] = true,
                    g => {
                        let kind = TokenKind::ALL
                            .into_iter()
                            .find(|k| k.glyph() == g)
                            .ok_or_else(|| LevelLoadError::BadMask {
                                reason: format!("unknown glyph {:?}", g),
                            })?;
                        mask[idx] = true;
                        cells[idx] = Some(kind);
                    }
                }
            }
        }

        Ok(Self {
            layout: Layout::from_mask(mask),
            cells,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..NUM_ROWS as i8).rev() {
            for column in 0..NUM_COLUMNS as i8 {
                let p = Position::new(column, row);
                let glyph = if !self.layout.contains(p) {
                    '#'
                } else {
                    self.kind_at(p).map_or('.', |k| k.glyph())
                };
                write!(f, "{}", glyph)?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
