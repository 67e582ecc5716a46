//! Level loading from the levels directory.

use derive_more::{Display, Error};
use std::path::{Path, PathBuf};
use strictly_rush_hour::{Board, LevelDefinition};
use tracing::{debug, info, instrument, warn};

/// Reads numbered level files (`level1.json`, `level2.json`, ...) from a directory.
#[derive(Debug, Clone)]
pub struct LevelLoader {
    dir: PathBuf,
}

impl LevelLoader {
    /// Creates a loader over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this loader reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of level `number`.
    pub fn path_for(&self, number: u32) -> PathBuf {
        self.dir.join(format!("level{}.json", number))
    }

    /// Whether level `number` exists on disk.
    pub fn exists(&self, number: u32) -> bool {
        self.path_for(number).is_file()
    }

    /// Loads and validates level `number`.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load(&self, number: u32) -> Result<LevelDefinition, LevelLoadError> {
        Self::load_file(self.path_for(number))
    }

    /// Loads and validates a level from any path.
    ///
    /// Fails on I/O errors, malformed JSON and definitions that would not
    /// make a valid board.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_file(path: impl AsRef<Path>) -> Result<LevelDefinition, LevelLoadError> {
        let path = path.as_ref();
        debug!("Reading level file");
        let content = std::fs::read_to_string(path).map_err(|e| {
            warn!(error = %e, "Level file unreadable");
            LevelLoadError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let level = LevelDefinition::from_json(&content).map_err(|e| {
            LevelLoadError::new(format!("Invalid level {}: {}", path.display(), e))
        })?;

        Board::from_level(&level).map_err(|e| {
            warn!(error = %e, "Level failed validation");
            LevelLoadError::new(format!("Invalid level {}: {}", path.display(), e))
        })?;

        info!(level = %level.id(), cars = level.cars().len(), "Level loaded");
        Ok(level)
    }
}

/// Level loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Level load error: {} at {}:{}", message, file, line)]
pub struct LevelLoadError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LevelLoadError {
    /// Creates a new level loading error.
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
