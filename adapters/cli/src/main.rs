#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Grid Rescue in a terminal.

mod app;
mod input;
mod render;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use grid_rescue_core::{Command, CounterStore, GridConfig, DEFAULT_GRID_DIMENSION};
use grid_rescue_system_tally::JsonFileCounters;

use crate::{
    app::{boot_world, Game},
    input::{Input, HELP},
};

/// Command-line options for the Grid Rescue terminal client.
#[derive(Debug, Parser)]
#[command(name = "grid-rescue")]
#[command(about = "Steer the fire truck through the obstacles to the fire")]
struct Args {
    /// Number of grid columns (3 to 10).
    #[arg(long, default_value_t = DEFAULT_GRID_DIMENSION)]
    columns: u32,
    /// Number of grid rows (3 to 10).
    #[arg(long, default_value_t = DEFAULT_GRID_DIMENSION)]
    rows: u32,
    /// Requested obstacle count; defaults to the density ceiling.
    #[arg(long)]
    obstacles: Option<u32>,
    /// Seed for reproducible layouts.
    #[arg(long)]
    seed: Option<u64>,
    /// File the visit, play and win counters are kept in.
    #[arg(long, default_value = "grid-rescue-counters.json")]
    counters: PathBuf,
}

impl Args {
    fn grid_config(&self) -> GridConfig {
        let base = GridConfig::new(self.columns, self.rows, 0);
        base.with_obstacle_count(self.obstacles.unwrap_or_else(|| base.obstacle_ceiling()))
    }
}

/// Entry point for the Grid Rescue command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let counters = JsonFileCounters::open(&args.counters)
        .with_context(|| format!("failed to open counters at {}", args.counters.display()))?;
    tracing::debug!(path = %counters.path().display(), "loaded counters");
    let mut game = Game::new(boot_world(args.grid_config(), args.seed), counters);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", render::LEGEND)?;
    writeln!(stdout, "{}", render::board(game.world(), false))?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read player input")?;
        match input::parse(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => writeln!(stdout, "{HELP}")?,
            Ok(Input::Idle) => game.refresh(),
            Ok(Input::Step(direction)) => game.step(direction),
            Ok(Input::Start) => game.submit(Command::Start),
            Ok(Input::Stop) => game.submit(Command::Stop),
            Ok(Input::Reset) => game.submit(Command::Reset),
            Ok(Input::Resize { columns, rows }) => {
                game.submit(Command::ConfigureGrid { columns, rows });
            }
            Ok(Input::Obstacles(count)) => game.submit(Command::SetObstacleCount { count }),
            Err(error) => {
                writeln!(stdout, "{error}")?;
                continue;
            }
        }

        if game.is_resolving() {
            writeln!(stdout, "{}", render::board(game.world(), true))?;
            stdout.flush()?;
            game.finish_resolving(|_| {
                write!(stdout, ".")?;
                stdout.flush()
            })?;
            writeln!(stdout)?;
        }

        for cue in game.take_cues() {
            writeln!(stdout, "{cue}")?;
        }
        writeln!(stdout, "{}", render::board(game.world(), false))?;
    }

    let counters = game.counters().counters();
    writeln!(
        stdout,
        "games played: {}  fires out: {}",
        counters.games_played_count, counters.games_won_count
    )?;
    Ok(())
}
