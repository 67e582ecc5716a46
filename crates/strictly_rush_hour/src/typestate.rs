//! Phase-specific typestate structs for puzzles.
//!
//! Each phase is its own type. A [`PuzzleSolved`] has no way to accept a
//! slide; getting one back into play means restarting it.

use std::sync::Arc;

use super::action::{MoveError, Slide};
use super::contracts::SlideContract;
#[cfg(debug_assertions)]
use super::contracts::Contract;
use super::level::{LevelDefinition, LevelError};
use super::phases::SolvedSummary;
use super::rules::{self, CollisionMode, Rejection};
use super::Board;
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle being loaded: a level definition that has not been validated yet.
#[derive(Debug, Clone)]
pub struct PuzzleSetup {
    level: Arc<LevelDefinition>,
    mode: CollisionMode,
}

impl PuzzleSetup {
    /// Creates a setup phase for `level`.
    pub fn new(level: LevelDefinition) -> Self {
        Self::from_shared(Arc::new(level))
    }

    pub(crate) fn from_shared(level: Arc<LevelDefinition>) -> Self {
        Self {
            level,
            mode: CollisionMode::default(),
        }
    }

    /// Chooses how slides are checked for collisions.
    pub fn with_collision_mode(mut self, mode: CollisionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the level definition.
    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    /// Validates the level and builds the board (consumes setup, returns in-progress).
    #[instrument(skip(self), fields(level = %self.level.id(), mode = %self.mode))]
    pub fn start(self) -> Result<PuzzleInProgress, LevelError> {
        let board = Board::from_level(&self.level)?;
        if rules::has_won(&board) {
            warn!("Level starts with the hero at the exit");
            return Err(LevelError::AlreadySolved(self.level.id().clone()));
        }
        info!(pieces = board.all_pieces().len(), "Puzzle ready");
        Ok(PuzzleInProgress {
            level: self.level,
            board,
            history: Vec::new(),
            mode: self.mode,
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle in play: accepts slides.
#[derive(Debug, Clone)]
pub struct PuzzleInProgress {
    pub(crate) level: Arc<LevelDefinition>,
    pub(crate) board: Board,
    pub(crate) history: Vec<Slide>,
    pub(crate) mode: CollisionMode,
}

impl PuzzleInProgress {
    /// Attempts a slide, consuming self and returning the next state.
    ///
    /// Validate-then-commit: the board is only touched once the contract
    /// preconditions and the movement rules have both accepted the slide.
    /// Postconditions are checked in debug builds.
    #[instrument(skip(self), fields(level = %self.level.id(), slide = %slide))]
    pub fn slide(self, slide: Slide) -> SlideResult {
        let verdict = SlideContract::admit(&self.board, &slide)
            .map(|piece| rules::check_move(&self.board, piece, slide.target, self.mode));

        match verdict {
            Err(error) => {
                warn!(%error, "Slide refused");
                SlideResult::Refused { game: self, error }
            }
            Ok(Err(reason)) => {
                debug!(%reason, "Slide blocked");
                SlideResult::Blocked { game: self, reason }
            }
            Ok(Ok(())) => self.commit(slide),
        }
    }

    fn commit(mut self, slide: Slide) -> SlideResult {
        #[cfg(debug_assertions)]
        let before = self.board.clone();

        if let Err(error) = self.board.apply_move(&slide.piece, slide.target) {
            return SlideResult::Refused { game: self, error };
        }

        #[cfg(debug_assertions)]
        if let Err(error) = SlideContract::post(&before, &self.board) {
            warn!(%error, "Postcondition failed; slide rolled back");
            self.board = before;
            return SlideResult::Refused { game: self, error };
        }

        self.history.push(slide);

        if rules::has_won(&self.board) {
            info!(moves = self.history.len(), "Hero reached the exit");
            return SlideResult::Solved(PuzzleSolved {
                level: self.level,
                board: self.board,
                history: self.history,
                mode: self.mode,
            });
        }

        SlideResult::Moved(self)
    }

    /// Puts every piece back where the level started it and clears the history.
    #[instrument(skip(self), fields(level = %self.level.id()))]
    pub fn reset(mut self) -> Result<Self, MoveError> {
        self.board.reset(&self.level)?;
        self.history.clear();
        Ok(self)
    }

    /// Applies slides in order.
    ///
    /// Blocked slides are skipped, as they would be in play. Stops at the
    /// first refused slide or once the puzzle is solved.
    #[instrument(skip(self, slides), fields(count = slides.len()))]
    pub fn replay(self, slides: &[Slide]) -> SlideResult {
        let mut game = self;
        for slide in slides {
            match game.slide(slide.clone()) {
                SlideResult::Moved(next) | SlideResult::Blocked { game: next, .. } => game = next,
                done => return done,
            }
        }
        SlideResult::Moved(game)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the accepted slides so far.
    pub fn history(&self) -> &[Slide] {
        &self.history
    }

    /// Returns the level definition.
    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    /// Returns the collision mode.
    pub fn collision_mode(&self) -> CollisionMode {
        self.mode
    }
}

// ─────────────────────────────────────────────────────────────
//  Solved Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle solved: the hero is at the exit and the board is frozen.
#[derive(Debug, Clone)]
pub struct PuzzleSolved {
    level: Arc<LevelDefinition>,
    board: Board,
    history: Vec<Slide>,
    mode: CollisionMode,
}

impl PuzzleSolved {
    /// Returns the final board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the winning slide sequence.
    pub fn history(&self) -> &[Slide] {
        &self.history
    }

    /// Summary for the win notification.
    pub fn summary(&self) -> SolvedSummary {
        SolvedSummary::new(self.level.id().clone(), self.history.len())
    }

    /// Restarts from the starting layout (consumes solved, returns in-progress).
    #[instrument(skip(self), fields(level = %self.level.id()))]
    pub fn restart(self) -> Result<PuzzleInProgress, MoveError> {
        PuzzleInProgress {
            level: self.level,
            board: self.board,
            history: self.history,
            mode: self.mode,
        }
        .reset()
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of attempting a slide.
#[derive(Debug)]
pub enum SlideResult {
    /// Slide applied; puzzle continues.
    Moved(PuzzleInProgress),
    /// Slide not legal; board unchanged.
    Blocked {
        /// Unchanged game.
        game: PuzzleInProgress,
        /// Why it was blocked.
        reason: Rejection,
    },
    /// Slide applied and the hero reached the exit.
    Solved(PuzzleSolved),
    /// Request broke a precondition; board unchanged.
    Refused {
        /// Unchanged game.
        game: PuzzleInProgress,
        /// Contract violation.
        error: MoveError,
    },
}
