//! Strictly Games - terminal host for Rush Hour puzzles
//!
//! Wraps the pure puzzle logic in [`strictly_rush_hour`] with everything a
//! player needs at a terminal.
//!
//! # Architecture
//!
//! - **Config**: TOML configuration with defaults and CLI overrides
//! - **Loader**: numbered level files from a levels directory
//! - **Commands**: line-based input parsed into slides
//! - **Render**: text observer that redraws the board
//! - **Play**: interactive loop with level navigation, plus scripted replay
//!
//! # Example
//!
//! ```no_run
//! use strictly_games::{GameConfig, run_play};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load_or_default("strictly_games.toml")?;
//! let stdin = std::io::stdin();
//! let summary = run_play(&config, stdin.lock(), std::io::stdout())?;
//! println!("Solved {} levels", summary.solved().len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod commands;
mod config;
mod loader;
mod play;
mod render;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, GameConfig};

// Crate-level exports - Level loading
pub use loader::{LevelLoadError, LevelLoader};

// Crate-level exports - Input
pub use commands::{CommandError, HELP, PlayerCommand};

// Crate-level exports - Rendering
pub use render::TextRenderer;

// Crate-level exports - Play
pub use play::{PlaySummary, ReplayReport, ReplayStep, parse_move_token, replay_commands, run_play};
