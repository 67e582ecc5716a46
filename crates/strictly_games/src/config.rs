//! Game configuration for the terminal host.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strictly_rush_hour::CollisionMode;
use tracing::{debug, info, instrument};

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "strictly_games.toml";

/// Host configuration, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Directory holding `level{n}.json` files.
    #[serde(default = "default_levels_dir")]
    levels_dir: PathBuf,

    /// Collision checking for slides.
    #[serde(default)]
    collision: CollisionMode,

    /// Pause after a win before the next level loads.
    #[serde(default = "default_celebration_delay_ms")]
    celebration_delay_ms: u64,

    /// Level number to start on.
    #[serde(default = "default_start_level")]
    start_level: u32,
}

#[instrument]
fn default_levels_dir() -> PathBuf {
    PathBuf::from("levels")
}

#[instrument]
fn default_celebration_delay_ms() -> u64 {
    1000
}

#[instrument]
fn default_start_level() -> u32 {
    1
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels_dir: default_levels_dir(),
            collision: CollisionMode::default(),
            celebration_delay_ms: default_celebration_delay_ms(),
            start_level: default_start_level(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.start_level == 0 {
            return Err(ConfigError::new("start_level counts from 1"));
        }

        info!(
            levels_dir = %config.levels_dir.display(),
            collision = %config.collision,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    ///
    /// A file that exists but cannot be parsed is still an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the levels directory.
    pub fn with_levels_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.levels_dir = dir.into();
        self
    }

    /// Overrides the collision mode.
    pub fn with_collision(mut self, mode: CollisionMode) -> Self {
        self.collision = mode;
        self
    }

    /// Overrides the celebration delay.
    pub fn with_celebration_delay_ms(mut self, ms: u64) -> Self {
        self.celebration_delay_ms = ms;
        self
    }

    /// Overrides the starting level.
    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = level;
        self
    }

    /// Celebration delay as a duration.
    pub fn celebration_delay(&self) -> Duration {
        Duration::from_millis(self.celebration_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: GameConfig = toml::from_str("collision = \"swept\"").unwrap();
        assert_eq!(config.collision(), &CollisionMode::Swept);
        assert_eq!(config.levels_dir(), &PathBuf::from("levels"));
        assert_eq!(config.celebration_delay(), Duration::from_millis(1000));
        assert_eq!(config.start_level(), &1);
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::default()
            .with_levels_dir("puzzles")
            .with_collision(CollisionMode::Swept)
            .with_celebration_delay_ms(0)
            .with_start_level(3);
        assert_eq!(config.levels_dir(), &PathBuf::from("puzzles"));
        assert_eq!(config.collision(), &CollisionMode::Swept);
        assert_eq!(config.celebration_delay(), Duration::ZERO);
        assert_eq!(config.start_level(), &3);
    }

    #[test]
    fn test_unknown_collision_mode_is_rejected() {
        assert!(toml::from_str::<GameConfig>("collision = \"ghost\"").is_err());
    }
}
