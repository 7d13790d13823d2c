//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond equality and small helpers,
//! making them usable in any context (engine logic, presentation, debugging dumps).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed 9x9 grid:
//!
//! - **Columns**: 9 (indexed 0-8, left to right)
//! - **Rows**: 9 (indexed 0-8, **bottom to top**)
//!
//! Row 0 is the bottom row. Gravity pulls tokens toward row 0 and new tokens
//! enter from above row 8.
//!
//! # Examples
//!
//! ```
//! use cookie_crunch_types::{Position, Swap, TokenKind, NUM_COLUMNS, NUM_ROWS};
//!
//! let a = Position::new(3, 4);
//! let b = Position::new(3, 5);
//! assert!(a.is_adjacent(b));
//!
//! // Swaps are unordered
//! assert_eq!(Swap::new(a, b), Swap::new(b, a));
//!
//! assert_eq!(TokenKind::from_str("donut"), Some(TokenKind::Donut));
//! assert_eq!(NUM_COLUMNS, 9);
//! assert_eq!(NUM_ROWS, 9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board width in cells (9 columns)
pub const NUM_COLUMNS: u8 = 9;

/// Board height in cells (9 rows)
pub const NUM_ROWS: u8 = 9;

/// Total number of cells on the board
pub const NUM_CELLS: usize = (NUM_COLUMNS as usize) * (NUM_ROWS as usize);

/// Number of distinct token kinds
pub const NUM_KINDS: u8 = 6;

/// A cell coordinate: (column, row), 0-indexed, row 0 at the bottom.
///
/// Positions are plain coordinates and may lie outside the board; the grid
/// rejects them with an out-of-bounds error instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub column: i8,
    pub row: i8,
}

impl Position {
    pub const fn new(column: i8, row: i8) -> Self {
        Self { column, row }
    }

    /// Check whether the coordinate lies within the 9x9 board
    pub fn in_bounds(self) -> bool {
        self.column >= 0
            && self.column < NUM_COLUMNS as i8
            && self.row >= 0
            && self.row < NUM_ROWS as i8
    }

    /// Flat row-major index, or `None` when out of bounds
    #[inline]
    pub fn index(self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some((self.row as usize) * (NUM_COLUMNS as usize) + (self.column as usize))
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(index: usize) -> Self {
        let width = NUM_COLUMNS as usize;
        Self::new((index % width) as i8, (index / width) as i8)
    }

    /// Shift by `(dc, dr)`; saturates at the `i8` limits, which are off-board
    pub fn offset(self, dc: i8, dr: i8) -> Self {
        Self::new(self.column.saturating_add(dc), self.row.saturating_add(dr))
    }

    /// Horizontally or vertically adjacent (never diagonal)
    pub fn is_adjacent(self, other: Position) -> bool {
        let dc = u16::from(self.column.abs_diff(other.column));
        let dr = u16::from(self.row.abs_diff(other.row));
        dc + dr == 1
    }

    /// Iterate every on-board position in row-major order (bottom row first)
    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_CELLS).map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// The six token kinds
///
/// Kinds carry no ordering semantics in the rules; the declaration order is
/// only used to pick the first `k` kinds when a level restricts the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    Croissant,
    Cupcake,
    Danish,
    Donut,
    Macaroon,
    SugarCookie,
}

impl TokenKind {
    pub const ALL: [TokenKind; NUM_KINDS as usize] = [
        TokenKind::Croissant,
        TokenKind::Cupcake,
        TokenKind::Danish,
        TokenKind::Donut,
        TokenKind::Macaroon,
        TokenKind::SugarCookie,
    ];

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use cookie_crunch_types::TokenKind;
    ///
    /// assert_eq!(TokenKind::from_str("Croissant"), Some(TokenKind::Croissant));
    /// assert_eq!(TokenKind::from_str("sugarcookie"), Some(TokenKind::SugarCookie));
    /// assert_eq!(TokenKind::from_str("bagel"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "croissant" => Some(TokenKind::Croissant),
            "cupcake" => Some(TokenKind::Cupcake),
            "danish" => Some(TokenKind::Danish),
            "donut" => Some(TokenKind::Donut),
            "macaroon" => Some(TokenKind::Macaroon),
            "sugarcookie" => Some(TokenKind::SugarCookie),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Croissant => "croissant",
            TokenKind::Cupcake => "cupcake",
            TokenKind::Danish => "danish",
            TokenKind::Donut => "donut",
            TokenKind::Macaroon => "macaroon",
            TokenKind::SugarCookie => "sugarCookie",
        }
    }

    /// Single-letter glyph used by text dumps of the board
    pub fn glyph(&self) -> char {
        match self {
            TokenKind::Croissant => 'C',
            TokenKind::Cupcake => 'U',
            TokenKind::Danish => 'D',
            TokenKind::Donut => 'O',
            TokenKind::Macaroon => 'M',
            TokenKind::SugarCookie => 'S',
        }
    }

    /// Kind at palette index `i` (0-based); `None` when `i >= NUM_KINDS`
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token occupying a cell. Identity is positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub const fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}

/// A board cell as described by a level layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Playable(Position),
    Void(Position),
}

impl Tile {
    pub fn position(&self) -> Position {
        match *self {
            Tile::Playable(p) | Tile::Void(p) => p,
        }
    }

    pub fn is_playable(&self) -> bool {
        matches!(self, Tile::Playable(_))
    }
}

/// An unordered exchange of two cells
///
/// The pair is normalized on construction (smaller position first in
/// row-major order), so `Swap::new(a, b) == Swap::new(b, a)`. Adjacency is
/// not enforced here; the engine validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Swap {
    a: Position,
    b: Position,
}

impl Swap {
    pub fn new(a: Position, b: Position) -> Self {
        let key = |p: Position| (p.row, p.column);
        if key(a) <= key(b) {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    pub fn first(&self) -> Position {
        self.a
    }

    pub fn second(&self) -> Position {
        self.b
    }

    pub fn positions(&self) -> [Position; 2] {
        [self.a, self.b]
    }

    pub fn is_adjacent(&self) -> bool {
        self.a.is_adjacent(self.b)
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_index_roundtrip() {
        assert_eq!(Position::new(0, 0).index(), Some(0));
        assert_eq!(Position::new(8, 0).index(), Some(8));
        assert_eq!(Position::new(0, 1).index(), Some(9));
        assert_eq!(Position::new(8, 8).index(), Some(80));
        assert_eq!(Position::new(-1, 0).index(), None);
        assert_eq!(Position::new(9, 0).index(), None);
        assert_eq!(Position::new(0, 9).index(), None);

        for p in Position::all() {
            assert_eq!(Position::from_index(p.index().unwrap()), p);
        }
    }

    #[test]
    fn test_adjacency_excludes_diagonals() {
        let p = Position::new(4, 4);
        assert!(p.is_adjacent(Position::new(5, 4)));
        assert!(p.is_adjacent(Position::new(4, 3)));
        assert!(!p.is_adjacent(Position::new(5, 5)));
        assert!(!p.is_adjacent(Position::new(4, 6)));
        assert!(!p.is_adjacent(p));
    }

    #[test]
    fn test_swap_is_unordered() {
        let a = Position::new(2, 3);
        let b = Position::new(3, 3);
        let s = Swap::new(b, a);
        assert_eq!(s, Swap::new(a, b));
        assert_eq!(s.first(), a);
        assert_eq!(s.second(), b);
    }

    #[test]
    fn test_kind_palette() {
        assert_eq!(TokenKind::ALL.len(), NUM_KINDS as usize);
        assert_eq!(TokenKind::from_index(0), Some(TokenKind::Croissant));
        assert_eq!(TokenKind::from_index(6), None);
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let left = Position::new(i8::MIN, 0);
        let right = Position::new(i8::MAX, 0);
        assert!(!left.is_adjacent(right));
        assert!(!Swap::new(left, right).is_adjacent());
        assert!(Position::new(i8::MAX, 5).is_adjacent(Position::new(i8::MAX - 1, 5)));

        let edge = right.offset(1, 0);
        assert_eq!(edge, right);
        assert!(!edge.in_bounds());
        assert_eq!(Position::new(0, i8::MIN).offset(0, -1).index(), None);
    }
}
