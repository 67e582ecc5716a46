//! Command-line interface for strictly_games.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_rush_hour::CollisionMode;

/// Strictly Games - Rush Hour puzzles with checked moves
#[derive(Parser, Debug)]
#[command(name = "strictly_games")]
#[command(about = "Sliding-block puzzles in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play levels interactively
    Play {
        /// Level to start on (overrides config)
        #[arg(short, long)]
        level: Option<u32>,

        /// Path to config file
        #[arg(short, long, default_value = strictly_games::DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Directory containing level{n}.json files (overrides config)
        #[arg(long)]
        levels_dir: Option<PathBuf>,

        /// Collision checking: footprint or swept (overrides config)
        #[arg(long)]
        collision: Option<CollisionMode>,

        /// Pause after a win, in milliseconds (overrides config)
        #[arg(long)]
        celebration_delay_ms: Option<u64>,
    },

    /// Validate a level file
    Check {
        /// Level file to check
        file: PathBuf,
    },

    /// Draw a level's starting board
    Show {
        /// Level file to draw
        file: PathBuf,

        /// Print the board snapshot as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Replay moves against a level (e.g. `X:4:2` or `A:+1`)
    Replay {
        /// Level file to replay
        file: PathBuf,

        /// Moves to apply in order
        #[arg(required = true, allow_hyphen_values = true)]
        moves: Vec<String>,

        /// Collision checking: footprint or swept
        #[arg(long, default_value_t = CollisionMode::Footprint)]
        collision: CollisionMode,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the JSON schema of the level format
    Schema,
}
