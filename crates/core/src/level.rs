//! Level module - the engine façade and turn state machine
//!
//! This module ties together all engine components: layout, grid, match
//! detection, swaps, cascade resolution, shuffling, and scoring. The caller
//! drives one turn with a fixed call order:
//!
//! ```text
//! perform_swap -> remove_matches -> fill_holes -> top_up_cookies -> remove_matches -> ...
//! ```
//!
//! until `remove_matches` reports no chains, which ends the turn, spends a
//! move, and evaluates the outcome. Calls out of that order fail with
//! `InvalidState` and leave the level untouched.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{LevelCatalog, LevelDefinition};
use crate::chain::{find_chains, Chain};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, LevelLoadError};
use crate::grid::Grid;
use crate::layout::Layout;
use crate::resolver::{apply_gravity, clear_chains, top_up, FallingToken, NewToken};
use crate::rng::SimpleRng;
use crate::shuffle::shuffle;
use crate::snapshot::LevelSnapshot;
use crate::swap::{detect_possible_swaps, swap_partners, validate_swap};
use crate::types::{Position, Swap, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Won,
    Lost,
}

/// Externally visible turn state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "outcome")]
pub enum TurnState {
    AwaitingSwap,
    Resolving,
    GameOver(Outcome),
}

/// Which call the cascade expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingSwap,
    Matching,
    Falling,
    Refilling,
    GameOver(Outcome),
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::AwaitingSwap => "awaiting a swap",
            Phase::Matching => "awaiting remove_matches",
            Phase::Falling => "awaiting fill_holes",
            Phase::Refilling => "awaiting top_up_cookies",
            Phase::GameOver(_) => "the game is over",
        }
    }
}

/// Result of one `remove_matches` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchStep {
    /// Removed chains with their scores; empty when the turn ended
    pub chains: Vec<Chain>,
    /// Multiplier applied to this step
    pub multiplier: u32,
    /// Sum of the chain scores
    pub score: u32,
}

impl MatchStep {
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Level {
    definition: LevelDefinition,
    config: EngineConfig,
    rng: SimpleRng,
    seed: u32,
    grid: Grid,
    score: u32,
    moves_left: u32,
    combo_multiplier: u32,
    phase: Phase,
    possible_swaps: Vec<Swap>,
    turn: u32,
}

impl Level {
    /// Create a level and deal the first board
    pub fn new(definition: LevelDefinition, config: EngineConfig, seed: u32) -> EngineResult<Self> {
        config.validate()?;
        let mut level = Self {
            grid: Grid::new(definition.layout),
            moves_left: definition.maximum_moves,
            definition,
            config,
            rng: SimpleRng::new(seed),
            seed,
            score: 0,
            combo_multiplier: 1,
            phase: Phase::AwaitingSwap,
            possible_swaps: Vec::new(),
            turn: 0,
        };
        level.begin_game()?;
        Ok(level)
    }

    /// Start a level from an exact board instead of a random deal
    ///
    /// The grid must use the definition's layout and be completely filled.
    /// Chains already on the board are left for the first turn to clear.
    pub fn with_grid(
        definition: LevelDefinition,
        config: EngineConfig,
        seed: u32,
        grid: Grid,
    ) -> EngineResult<Self> {
        config.validate()?;
        if grid.layout() != &definition.layout {
            return Err(LevelLoadError::BadMask {
                reason: "grid layout differs from the level layout".into(),
            }
            .into());
        }
        if let Some(hole) = grid.holes().next() {
            return Err(LevelLoadError::BadMask {
                reason: format!("grid has a hole at {}", hole),
            }
            .into());
        }

        let possible_swaps = detect_possible_swaps(&grid);
        Ok(Self {
            moves_left: definition.maximum_moves,
            definition,
            config,
            rng: SimpleRng::new(seed),
            seed,
            grid,
            score: 0,
            combo_multiplier: 1,
            phase: Phase::AwaitingSwap,
            possible_swaps,
            turn: 0,
        })
    }

    /// Look up `name` in the catalog configured by `config` and create the level
    pub fn load(name: &str, config: EngineConfig, seed: u32) -> EngineResult<Self> {
        let definition = LevelCatalog::new(config.levels_dir.clone()).load(name)?;
        Self::new(definition, config, seed)
    }

    /// Restart: reset score, moves, multiplier, and deal a fresh board
    ///
    /// Allowed in any state. On `ShuffleExhausted` the level is left as it was.
    pub fn begin_game(&mut self) -> EngineResult<Vec<Token>> {
        let shuffled = shuffle(
            &self.definition.layout,
            self.config.kinds,
            self.config.shuffle.max_attempts,
            &mut self.rng,
        )?;

        self.grid = shuffled.grid;
        self.possible_swaps = shuffled.possible_swaps;
        self.score = 0;
        self.moves_left = self.definition.maximum_moves;
        self.combo_multiplier = 1;
        self.phase = Phase::AwaitingSwap;
        self.turn = 0;

        info!(
            level = %self.definition.name,
            target = self.definition.target_score,
            moves = self.moves_left,
            attempts = shuffled.attempts,
            "begin game"
        );
        Ok(shuffled.tokens)
    }

    fn require_phase(&self, phase: Phase, operation: &'static str) -> EngineResult<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(EngineError::InvalidState {
                operation,
                state: self.phase.name(),
            })
        }
    }

    /// Whether `swap` is legal on the current board
    pub fn is_possible_swap(&self, swap: Swap) -> bool {
        self.validate_swap(swap).is_ok()
    }

    /// Legality check with the precise reason for a refusal
    pub fn validate_swap(&self, swap: Swap) -> EngineResult<()> {
        validate_swap(&self.grid, swap)
    }

    /// Apply a player swap and start resolving the turn
    pub fn perform_swap(&mut self, swap: Swap) -> EngineResult<()> {
        self.require_phase(Phase::AwaitingSwap, "perform_swap")?;
        validate_swap(&self.grid, swap)?;
        self.grid.exchange(swap)?;

        self.turn += 1;
        self.reset_combo_multiplier();
        self.phase = Phase::Matching;
        debug!(turn = self.turn, %swap, "swap performed");
        Ok(())
    }

    fn reset_combo_multiplier(&mut self) {
        self.combo_multiplier = 1;
    }

    /// Detect, score, and clear chains; with no chains, end the turn
    pub fn remove_matches(&mut self) -> EngineResult<MatchStep> {
        self.require_phase(Phase::Matching, "remove_matches")?;

        let mut chains = find_chains(&self.grid);
        let multiplier = self.combo_multiplier;
        if chains.is_empty() {
            self.end_turn();
            return Ok(MatchStep {
                chains,
                multiplier,
                score: 0,
            });
        }

        let step_score = self.config.score.score_chains(&mut chains, multiplier);
        self.grid = clear_chains(&self.grid, &chains)?;
        self.score = self.score.saturating_add(step_score);
        self.combo_multiplier += 1;
        self.phase = Phase::Falling;

        debug!(
            turn = self.turn,
            chains = chains.len(),
            multiplier,
            step_score,
            total = self.score,
            "chains removed"
        );
        Ok(MatchStep {
            chains,
            multiplier,
            score: step_score,
        })
    }

    /// Let the remaining tokens fall; per-column moves, bottom to top
    pub fn fill_holes(&mut self) -> EngineResult<Vec<Vec<FallingToken>>> {
        self.require_phase(Phase::Falling, "fill_holes")?;
        let (grid, columns) = apply_gravity(&self.grid)?;
        self.grid = grid;
        self.phase = Phase::Refilling;
        debug!(
            turn = self.turn,
            fallen = columns.iter().map(Vec::len).sum::<usize>(),
            "holes filled"
        );
        Ok(columns)
    }

    /// Drop new tokens into every remaining hole
    pub fn top_up_cookies(&mut self) -> EngineResult<Vec<Vec<NewToken>>> {
        self.require_phase(Phase::Refilling, "top_up_cookies")?;
        let (grid, columns) = top_up(&self.grid, self.config.kinds, &mut self.rng)?;
        self.grid = grid;
        self.phase = Phase::Matching;
        debug!(
            turn = self.turn,
            spawned = columns.iter().map(Vec::len).sum::<usize>(),
            "topped up"
        );
        Ok(columns)
    }

    fn end_turn(&mut self) {
        self.moves_left = self.moves_left.saturating_sub(1);
        self.detect_possible_swaps();
        self.evaluate_outcome();
        debug!(
            turn = self.turn,
            moves_left = self.moves_left,
            possible_swaps = self.possible_swaps.len(),
            "turn ended"
        );
    }

    fn evaluate_outcome(&mut self) {
        self.phase = if self.score >= self.definition.target_score {
            Phase::GameOver(Outcome::Won)
        } else if self.moves_left == 0 {
            Phase::GameOver(Outcome::Lost)
        } else {
            Phase::AwaitingSwap
        };

        if let Phase::GameOver(outcome) = self.phase {
            info!(
                level = %self.definition.name,
                ?outcome,
                score = self.score,
                moves_left = self.moves_left,
                "game over"
            );
        }
    }

    /// Recompute and cache the set of legal swaps
    pub fn detect_possible_swaps(&mut self) -> &[Swap] {
        self.possible_swaps = detect_possible_swaps(&self.grid);
        &self.possible_swaps
    }

    /// Swaps found by the last detection
    pub fn possible_swaps(&self) -> &[Swap] {
        &self.possible_swaps
    }

    /// The board is waiting for a swap but none is possible
    pub fn needs_shuffle(&self) -> bool {
        self.phase == Phase::AwaitingSwap && self.possible_swaps.is_empty()
    }

    /// Replace every token with a fresh solvable arrangement
    ///
    /// Only between turns. A shuffle requested while swaps were still
    /// available costs a move when configured; shuffling a dead board is free.
    pub fn shuffle(&mut self) -> EngineResult<Vec<Token>> {
        self.require_phase(Phase::AwaitingSwap, "shuffle")?;
        let requested = !self.possible_swaps.is_empty();

        let shuffled = shuffle(
            &self.definition.layout,
            self.config.kinds,
            self.config.shuffle.max_attempts,
            &mut self.rng,
        )?;
        self.grid = shuffled.grid;
        self.possible_swaps = shuffled.possible_swaps;
        info!(requested, attempts = shuffled.attempts, "board shuffled");

        if requested && self.config.shuffle.costs_move {
            self.moves_left = self.moves_left.saturating_sub(1);
            self.evaluate_outcome();
        }
        Ok(shuffled.tokens)
    }

    /// First possible swap in detection order
    pub fn hint(&self) -> Option<Swap> {
        self.possible_swaps.first().copied()
    }

    /// Cells that `position` can legally swap with
    pub fn partners_of(&self, position: Position) -> Vec<Position> {
        swap_partners(&self.possible_swaps, position)
    }

    pub fn state(&self) -> TurnState {
        match self.phase {
            Phase::AwaitingSwap => TurnState::AwaitingSwap,
            Phase::Matching | Phase::Falling | Phase::Refilling => TurnState::Resolving,
            Phase::GameOver(outcome) => TurnState::GameOver(outcome),
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &Layout {
        &self.definition.layout
    }

    pub fn definition(&self) -> &LevelDefinition {
        &self.definition
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn target_score(&self) -> u32 {
        self.definition.target_score
    }

    pub fn maximum_moves(&self) -> u32 {
        self.definition.maximum_moves
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            level: self.definition.name.clone(),
            seed: self.seed,
            board: self.grid.to_string().lines().map(str::to_string).collect(),
            score: self.score,
            target_score: self.definition.target_score,
            moves_left: self.moves_left,
            combo_multiplier: self.combo_multiplier,
            state: self.state(),
            possible_swaps: self.possible_swaps.clone(),
        }
    }
}
