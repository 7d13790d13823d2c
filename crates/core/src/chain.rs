//! Chain module - match detection
//!
//! [`find_chains`] scans rows left to right and columns bottom to top for
//! maximal runs of three or more equal kinds, then merges runs that share a
//! cell into a single chain (L, T, and plus shapes). The result depends only
//! on the grid contents: chains are ordered by their lowest cell in
//! row-major order and each chain's cells are sorted the same way.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::grid::Grid;
use crate::types::{Position, TokenKind, NUM_CELLS, NUM_COLUMNS, NUM_ROWS};

/// Minimum run length that forms a chain
pub const MIN_RUN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChainShape {
    Horizontal,
    Vertical,
    /// Perpendicular runs joined at a shared cell (L, T, or plus)
    Compound,
}

/// A group of same-kind tokens eligible for removal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Chain {
    pub kind: TokenKind,
    pub shape: ChainShape,
    /// Member cells, sorted row-major (bottom row first)
    pub positions: Vec<Position>,
    /// Points awarded; zero until the chain is scored
    pub score: u32,
}

impl Chain {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions.binary_search_by_key(&key(position), |p| key(*p)).is_ok()
    }
}

#[inline]
fn key(p: Position) -> (i8, i8) {
    (p.row, p.column)
}

#[derive(Debug)]
struct Run {
    kind: TokenKind,
    horizontal: bool,
    cells: ArrayVec<Position, { NUM_ROWS as usize }>,
}

/// Walk one line of cells and push every maximal run of length >= MIN_RUN
fn collect_runs<I>(grid: &Grid, line: I, horizontal: bool, out: &mut Vec<Run>)
where
    I: Iterator<Item = Position>,
{
    let mut current: Option<Run> = None;
    for p in line {
        let kind = grid.kind_at(p);
        match (&mut current, kind) {
            (Some(run), Some(k)) if run.kind == k => run.cells.push(p),
            _ => {
                if let Some(run) = current.take() {
                    if run.cells.len() >= MIN_RUN {
                        out.push(run);
                    }
                }
                current = kind.map(|k| {
                    let mut cells = ArrayVec::new();
                    cells.push(p);
                    Run {
                        kind: k,
                        horizontal,
                        cells,
                    }
                });
            }
        }
    }
    if let Some(run) = current {
        if run.cells.len() >= MIN_RUN {
            out.push(run);
        }
    }
}

fn find_runs(grid: &Grid) -> Vec<Run> {
    let mut runs = Vec::new();
    for row in 0..NUM_ROWS as i8 {
        let line = (0..NUM_COLUMNS as i8).map(move |c| Position::new(c, row));
        collect_runs(grid, line, true, &mut runs);
    }
    for column in 0..NUM_COLUMNS as i8 {
        let line = (0..NUM_ROWS as i8).map(move |r| Position::new(column, r));
        collect_runs(grid, line, false, &mut runs);
    }
    runs
}

fn root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Detect every chain on the grid
pub fn find_chains(grid: &Grid) -> Vec<Chain> {
    let runs = find_runs(grid);
    if runs.is_empty() {
        return Vec::new();
    }

    // Union runs that share a cell. Runs of one orientation never overlap,
    // so a single owner per cell is enough to find every crossing.
    let mut parent: Vec<usize> = (0..runs.len()).collect();
    let mut owner: [Option<usize>; NUM_CELLS] = [None; NUM_CELLS];
    for (i, run) in runs.iter().enumerate() {
        for p in &run.cells {
            let Some(idx) = p.index() else { continue };
            match owner[idx] {
                Some(j) => {
                    let (a, b) = (root(&mut parent, i), root(&mut parent, j));
                    if a != b {
                        parent[a.max(b)] = a.min(b);
                    }
                }
                None => owner[idx] = Some(i),
            }
        }
    }

    let mut chains: Vec<Chain> = Vec::new();
    let mut chain_of_root: Vec<Option<usize>> = vec![None; runs.len()];
    for (i, run) in runs.iter().enumerate() {
        let r = root(&mut parent, i);
        let slot = match chain_of_root[r] {
            Some(slot) => slot,
            None => {
                chains.push(Chain {
                    kind: run.kind,
                    shape: if run.horizontal {
                        ChainShape::Horizontal
                    } else {
                        ChainShape::Vertical
                    },
                    positions: Vec::new(),
                    score: 0,
                });
                chain_of_root[r] = Some(chains.len() - 1);
                chains.len() - 1
            }
        };
        let chain = &mut chains[slot];
        let same_axis = matches!(
            (chain.shape, run.horizontal),
            (ChainShape::Horizontal, true) | (ChainShape::Vertical, false)
        );
        if !same_axis {
            chain.shape = ChainShape::Compound;
        }
        chain.positions.extend(run.cells.iter().copied());
    }

    for chain in &mut chains {
        chain.positions.sort_by_key(|p| key(*p));
        chain.positions.dedup();
    }
    chains.sort_by_key(|c| c.positions.first().map(|p| key(*p)));
    chains
}

/// Fast check: does any run of MIN_RUN or more exist?
pub fn has_chain(grid: &Grid) -> bool {
    let lines = (0..NUM_ROWS as i8)
        .map(|row| (Position::new(0, row), (1, 0), NUM_COLUMNS))
        .chain((0..NUM_COLUMNS as i8).map(|col| (Position::new(col, 0), (0, 1), NUM_ROWS)));

    for (start, (dc, dr), len) in lines {
        let mut streak = 0usize;
        let mut last = None;
        let mut p = start;
        for _ in 0..len {
            let kind = grid.kind_at(p);
            if kind.is_some() && kind == last {
                streak += 1;
            } else {
                streak = usize::from(kind.is_some());
            }
            if streak >= MIN_RUN {
                return true;
            }
            last = kind;
            p = p.offset(dc, dr);
        }
    }
    false
}

/// Would placing `kind` at `position` complete a run of MIN_RUN or more with
/// the tokens already on the grid?
pub fn creates_run(grid: &Grid, position: Position, kind: TokenKind) -> bool {
    let count = |dc: i8, dr: i8| {
        let mut n = 0usize;
        let mut p = position.offset(dc, dr);
        while grid.kind_at(p) == Some(kind) {
            n += 1;
            p = p.offset(dc, dr);
        }
        n
    };
    1 + count(-1, 0) + count(1, 0) >= MIN_RUN || 1 + count(0, -1) + count(0, 1) >= MIN_RUN
}
