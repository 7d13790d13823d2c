//! Headless Cookie Crunch runner (default binary).
//!
//! Loads a level, plays it to the end by always taking the first possible
//! swap, and prints the final board and outcome. Shuffles when the board
//! runs out of moves. Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cookie_crunch::core::{EngineConfig, Level, LevelCatalog, TurnState};

#[derive(Debug, Parser)]
#[command(name = "cookie-crunch", about = "Autoplay a Cookie Crunch level")]
struct Args {
    /// Level name, e.g. Level_0
    #[arg(short, long, default_value = "Level_0")]
    level: String,

    /// RNG seed; the same seed replays the same game
    #[arg(short, long, default_value_t = 1)]
    seed: u32,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final snapshot as JSON instead of text
    #[arg(long)]
    json: bool,

    /// List the built-in levels and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.list {
        for name in LevelCatalog::builtin_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let mut level = Level::load(&args.level, config, args.seed)
        .with_context(|| format!("loading level {}", args.level))?;
    autoplay(&mut level)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&level.snapshot())?);
    } else {
        println!("{}", level.grid());
        println!();
        println!(
            "{:?}: score {} / {}, moves left {}",
            level.state(),
            level.score(),
            level.target_score(),
            level.moves_left()
        );
    }
    Ok(())
}

fn autoplay(level: &mut Level) -> Result<()> {
    while level.state() == TurnState::AwaitingSwap {
        let Some(swap) = level.hint() else {
            warn!("no possible swaps, shuffling");
            level.shuffle().context("shuffling a dead board")?;
            continue;
        };

        level.perform_swap(swap)?;
        let mut cascade = 0;
        loop {
            let step = level.remove_matches()?;
            if step.is_empty() {
                break;
            }
            cascade += 1;
            level.fill_holes()?;
            level.top_up_cookies()?;
        }
        info!(
            %swap,
            cascade,
            score = level.score(),
            moves_left = level.moves_left(),
            "turn played"
        );
    }
    Ok(())
}
