//! Strictly Games - Unified CLI
//!
//! Play, check and replay Rush Hour levels from the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use strictly_games::{GameConfig, LevelLoader, replay_commands, run_play};
use strictly_rush_hour::{Board, CollisionMode, LevelDefinition};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            level,
            config,
            levels_dir,
            collision,
            celebration_delay_ms,
        } => run_play_command(config, level, levels_dir, collision, celebration_delay_ms),
        Command::Check { file } => run_check(&file),
        Command::Show { file, json } => run_show(&file, json),
        Command::Replay {
            file,
            moves,
            collision,
            json,
        } => run_replay(&file, &moves, collision, json),
        Command::Schema => run_schema(),
    }
}

/// Play levels at the terminal
#[instrument(skip_all, fields(config = %config_path.display()))]
fn run_play_command(
    config_path: PathBuf,
    level: Option<u32>,
    levels_dir: Option<PathBuf>,
    collision: Option<CollisionMode>,
    celebration_delay_ms: Option<u64>,
) -> Result<()> {
    let mut config = GameConfig::load_or_default(&config_path)?;
    if let Some(level) = level {
        config = config.with_start_level(level);
    }
    if let Some(dir) = levels_dir {
        config = config.with_levels_dir(dir);
    }
    if let Some(mode) = collision {
        config = config.with_collision(mode);
    }
    if let Some(ms) = celebration_delay_ms {
        config = config.with_celebration_delay_ms(ms);
    }
    info!(?config, "Starting play");

    let stdin = std::io::stdin();
    let summary = run_play(&config, stdin.lock(), std::io::stdout())?;
    info!(solved = summary.solved().len(), completed = summary.completed(), "Play finished");
    Ok(())
}

/// Validate a level file
#[instrument(fields(file = %file.display()))]
fn run_check(file: &Path) -> Result<()> {
    let level = LevelLoader::load_file(file)?;
    println!("{}: level {} is valid", file.display(), level.id());
    Ok(())
}

/// Draw a level's starting board
#[instrument(fields(file = %file.display()))]
fn run_show(file: &Path, json: bool) -> Result<()> {
    let level = LevelLoader::load_file(file)?;
    let board = Board::from_level(&level)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&board.snapshot())?);
    } else {
        print!("{}", board.display());
    }
    Ok(())
}

/// Replay moves against a level
#[instrument(skip(moves), fields(file = %file.display(), count = moves.len()))]
fn run_replay(file: &Path, moves: &[String], collision: CollisionMode, json: bool) -> Result<()> {
    let level = LevelLoader::load_file(file)?;
    let report = replay_commands(level, collision, moves)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for step in report.steps() {
        match step.outcome().rejection() {
            Some(reason) => println!("{:<10} blocked: {}", step.command(), reason),
            None => println!("{:<10} ok", step.command()),
        }
    }
    print!("{}", report.board().display());
    println!(
        "{} after {} moves",
        if *report.won() { "Solved" } else { "Unsolved" },
        report.moves()
    );
    Ok(())
}

/// Print the JSON schema of the level format
fn run_schema() -> Result<()> {
    let schema = schemars::schema_for!(LevelDefinition);
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{}", json);
    Ok(())
}
