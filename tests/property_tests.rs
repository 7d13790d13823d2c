//! Seed sweeps over the engine's core guarantees

use std::collections::BTreeSet;

use cookie_crunch::core::chain::has_chain;
use cookie_crunch::core::fill::fill_random;
use cookie_crunch::core::resolver::apply_gravity;
use cookie_crunch::core::shuffle::{shuffle, DEFAULT_SHUFFLE_ATTEMPTS};
use cookie_crunch::core::swap::{detect_possible_swaps, is_possible_swap};
use cookie_crunch::core::{find_chains, EngineConfig, Grid, Level, LevelCatalog, SimpleRng, TurnState};
use cookie_crunch::types::{Position, Swap, TokenKind, NUM_COLUMNS, NUM_KINDS};

const SEEDS: std::ops::Range<u32> = 1..60;

fn quiet_grid(level: &str, seed: u32) -> Grid {
    let layout = LevelCatalog::default().load(level).unwrap().layout;
    let positions: Vec<Position> = layout.playable_positions().collect();
    let mut rng = SimpleRng::new(seed);
    fill_random(&Grid::new(layout), &positions, true, NUM_KINDS, &mut rng)
        .unwrap()
        .0
}

fn noisy_grid(seed: u32) -> Grid {
    let grid = Grid::new(Default::default());
    let positions: Vec<Position> = Position::all().collect();
    let mut rng = SimpleRng::new(seed);
    fill_random(&grid, &positions, false, 4, &mut rng).unwrap().0
}

fn adjacent_pairs() -> impl Iterator<Item = Swap> {
    Position::all().flat_map(|p| {
        [p.offset(1, 0), p.offset(0, 1)]
            .into_iter()
            .filter(|q| q.in_bounds())
            .map(move |q| Swap::new(p, q))
    })
}

#[test]
fn test_avoiding_fill_never_has_chains() {
    for name in LevelCatalog::builtin_names() {
        for seed in SEEDS {
            let grid = quiet_grid(name, seed);
            assert!(grid.is_full());
            assert!(find_chains(&grid).is_empty(), "{} seed {}", name, seed);
        }
    }
}

#[test]
fn test_possible_swap_iff_exchange_matches() {
    for seed in SEEDS {
        let grid = quiet_grid("Level_2", seed);
        for swap in adjacent_pairs() {
            let mut probe = grid.clone();
            // pairs touching a void cell
            if probe.exchange(swap).is_err() {
                continue;
            }
            let matched = !find_chains(&probe).is_empty();
            assert_eq!(is_possible_swap(&grid, swap), matched, "seed {} {}", seed, swap);

            probe.exchange(swap).unwrap();
            assert_eq!(probe, grid);
        }
    }
}

#[test]
fn test_same_kind_neighbors_never_swap() {
    for seed in SEEDS {
        let grid = noisy_grid(seed);
        for swap in adjacent_pairs() {
            if grid.kind_at(swap.first()) == grid.kind_at(swap.second()) {
                assert!(!is_possible_swap(&grid, swap));
            }
        }
    }
}

/// Chain cell sets, independent of kind and order
fn chain_sets(grid: &Grid, mirror: bool) -> BTreeSet<Vec<(i8, i8)>> {
    find_chains(grid)
        .into_iter()
        .map(|c| {
            let mut cells: Vec<(i8, i8)> = c
                .positions
                .iter()
                .map(|p| {
                    let column = if mirror {
                        NUM_COLUMNS as i8 - 1 - p.column
                    } else {
                        p.column
                    };
                    (column, p.row)
                })
                .collect();
            cells.sort_unstable();
            cells
        })
        .collect()
}

#[test]
fn test_chains_do_not_depend_on_scan_order() {
    for seed in SEEDS {
        let grid = noisy_grid(seed);
        assert_eq!(find_chains(&grid), find_chains(&grid.clone()));

        // mirroring the board left to right mirrors the chains
        let text = grid.to_string();
        let mirrored_rows: Vec<String> = text.lines().map(|l| l.chars().rev().collect()).collect();
        let rows: Vec<&str> = mirrored_rows.iter().map(String::as_str).collect();
        let mirrored = Grid::from_ascii(&rows).unwrap();

        assert_eq!(chain_sets(&grid, false), chain_sets(&mirrored, true));
    }
}

#[test]
fn test_gravity_compacts_and_keeps_order() {
    for seed in SEEDS {
        let mut grid = quiet_grid("Level_4", seed);
        let mut rng = SimpleRng::new(seed ^ 0xbeef);
        let playable: Vec<Position> = grid.layout().playable_positions().collect();
        for _ in 0..25 {
            if let Some(p) = rng.choose(&playable) {
                grid.set(p, None).unwrap();
            }
        }

        let (settled, _) = apply_gravity(&grid).unwrap();
        for column in 0..NUM_COLUMNS as i8 {
            let slots = grid.layout().column_slots(column);
            let before: Vec<TokenKind> = slots.iter().filter_map(|p| grid.kind_at(*p)).collect();
            let after: Vec<Option<TokenKind>> = slots.iter().map(|p| settled.kind_at(*p)).collect();

            let (filled, empty) = after.split_at(before.len());
            assert_eq!(filled.iter().copied().collect::<Option<Vec<_>>>(), Some(before));
            assert!(empty.iter().all(Option::is_none), "seed {} column {}", seed, column);
        }
    }
}

#[test]
fn test_shuffle_always_leaves_a_move() {
    for name in LevelCatalog::builtin_names() {
        let layout = LevelCatalog::default().load(name).unwrap().layout;
        for seed in SEEDS {
            let shuffled =
                shuffle(&layout, NUM_KINDS, DEFAULT_SHUFFLE_ATTEMPTS, &mut SimpleRng::new(seed))
                    .unwrap();
            assert!(!has_chain(&shuffled.grid));
            assert!(!detect_possible_swaps(&shuffled.grid).is_empty());
        }
    }
}

#[test]
fn test_needs_shuffle_iff_no_possible_swaps() {
    for seed in 1..20 {
        let mut level = Level::load("Level_1", EngineConfig::default(), seed).unwrap();
        while level.state() == TurnState::AwaitingSwap {
            assert_eq!(level.needs_shuffle(), level.possible_swaps().is_empty());
            assert_eq!(level.possible_swaps(), detect_possible_swaps(level.grid()).as_slice());

            let Some(swap) = level.hint() else {
                level.shuffle().unwrap();
                assert!(!level.possible_swaps().is_empty());
                continue;
            };
            level.perform_swap(swap).unwrap();
            while !level.remove_matches().unwrap().is_empty() {
                level.fill_holes().unwrap();
                level.top_up_cookies().unwrap();
            }
        }
        assert!(matches!(level.state(), TurnState::GameOver(_)));
    }
}
