//! Observable session phases and the win summary.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use super::level::LevelId;

/// Phase of a puzzle session.
///
/// `Loading → Ready → Won`, with reset returning to `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Level received but not yet turned into a board.
    Loading,
    /// Board accepts slides.
    Ready,
    /// Hero reached the exit; the board is frozen until reset.
    Won,
}

/// What a solved puzzle reports to whoever navigates onwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SolvedSummary {
    /// Level that was solved.
    level: LevelId,
    /// Accepted slides it took.
    moves: usize,
}

impl SolvedSummary {
    pub(crate) fn new(level: LevelId, moves: usize) -> Self {
        Self { level, moves }
    }
}

impl std::fmt::Display for SolvedSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Level {} solved in {} moves", self.level, self.moves)
    }
}
