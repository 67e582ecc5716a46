//! Puzzle session: the stateful front door hosts talk to.
//!
//! A session owns one level and walks it through `Loading → Ready → Won`.
//! Hosts issue move requests and get a [`MoveOutcome`] back; anything that
//! redraws listens through a [`PuzzleObserver`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::action::{MoveError, Slide};
use super::level::{LevelDefinition, LevelError};
use super::phases::{Phase, SolvedSummary};
use super::rules::{self, CollisionMode, Rejection};
use super::typestate::{PuzzleInProgress, PuzzleSetup, PuzzleSolved, SlideResult};
use super::{Board, BoardSnapshot, Cell, PieceId};

/// Receives board changes from a session.
pub trait PuzzleObserver {
    /// Called after load, after every accepted move and after reset.
    fn board_changed(&mut self, snapshot: &BoardSnapshot);

    /// Called once when the hero reaches the exit.
    fn solved(&mut self, _summary: &SolvedSummary) {}
}

impl PuzzleObserver for () {
    fn board_changed(&mut self, _snapshot: &BoardSnapshot) {}
}

/// Result of a move request that made it past the contract checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    accepted: bool,
    won: bool,
    rejection: Option<Rejection>,
}

impl MoveOutcome {
    fn applied(won: bool) -> Self {
        Self {
            accepted: true,
            won,
            rejection: None,
        }
    }

    fn rejected(reason: Rejection, won: bool) -> Self {
        Self {
            accepted: false,
            won,
            rejection: Some(reason),
        }
    }

    /// Whether the board changed.
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Whether the puzzle is solved after this request.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Why the move was not applied.
    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }
}

#[derive(Debug)]
enum SessionState {
    Loading(PuzzleSetup),
    Ready(PuzzleInProgress),
    Won(PuzzleSolved),
}

/// One level in play.
#[derive(Debug)]
pub struct PuzzleSession<O = ()> {
    level: Arc<LevelDefinition>,
    mode: CollisionMode,
    state: SessionState,
    observer: O,
}

impl PuzzleSession {
    /// Creates a session in the loading phase with no observer.
    pub fn new(level: LevelDefinition) -> Self {
        Self::with_observer(level, ())
    }

    /// Creates a session and loads it straight away.
    pub fn start(level: LevelDefinition) -> Result<Self, LevelError> {
        let mut session = Self::new(level);
        session.load()?;
        Ok(session)
    }
}

impl<O: PuzzleObserver> PuzzleSession<O> {
    /// Creates a session in the loading phase that reports to `observer`.
    #[instrument(skip(level, observer), fields(level = %level.id()))]
    pub fn with_observer(level: LevelDefinition, observer: O) -> Self {
        let level = Arc::new(level);
        Self {
            state: SessionState::Loading(PuzzleSetup::from_shared(Arc::clone(&level))),
            level,
            mode: CollisionMode::default(),
            observer,
        }
    }

    /// Chooses how slides are checked for collisions.
    ///
    /// Only takes effect before the level is loaded.
    pub fn with_collision_mode(mut self, mode: CollisionMode) -> Self {
        self.state = match self.state {
            SessionState::Loading(setup) => {
                self.mode = mode;
                SessionState::Loading(setup.with_collision_mode(mode))
            }
            loaded => {
                warn!(%mode, "Collision mode ignored after load");
                loaded
            }
        };
        self
    }

    /// Validates the level and builds the board.
    ///
    /// Does nothing if the level is already loaded. On error the session
    /// stays in the loading phase.
    #[instrument(skip(self), fields(level = %self.level.id()))]
    pub fn load(&mut self) -> Result<(), LevelError> {
        let setup = match &self.state {
            SessionState::Loading(setup) => setup.clone(),
            _ => {
                debug!("Level already loaded");
                return Ok(());
            }
        };
        self.state = SessionState::Ready(setup.start()?);
        self.notify_board();
        Ok(())
    }

    /// Requests that `piece` move its anchor to (`col`, `row`).
    pub fn request_move(
        &mut self,
        piece: impl Into<PieceId>,
        col: i32,
        row: i32,
    ) -> Result<MoveOutcome, MoveError> {
        self.slide(Slide::new(piece.into(), Cell::new(col, row)))
    }

    /// Requests that `piece` slide `delta` cells along its own axis.
    pub fn request_shift(
        &mut self,
        piece: impl Into<PieceId>,
        delta: i32,
    ) -> Result<MoveOutcome, MoveError> {
        let piece = piece.into();
        let board = self.board().ok_or(MoveError::NotReady)?;
        let current = board
            .piece(&piece)
            .ok_or_else(|| MoveError::InvalidReference(piece.clone()))?;
        let target = current.anchor().offset(current.orientation(), delta);
        self.slide(Slide::new(piece, target))
    }

    /// Submits a slide.
    ///
    /// Contract violations come back as `Err`. Legal and blocked moves both
    /// come back as `Ok`; only an accepted one changes the board.
    #[instrument(skip(self), fields(level = %self.level.id(), slide = %slide))]
    pub fn slide(&mut self, slide: Slide) -> Result<MoveOutcome, MoveError> {
        let placeholder = self.placeholder();
        let (state, outcome) = match std::mem::replace(&mut self.state, placeholder) {
            SessionState::Loading(setup) => {
                (SessionState::Loading(setup), Err(MoveError::NotReady))
            }
            SessionState::Won(solved) => {
                debug!("Board is frozen");
                (
                    SessionState::Won(solved),
                    Ok(MoveOutcome::rejected(Rejection::Frozen, true)),
                )
            }
            SessionState::Ready(game) => match game.slide(slide) {
                SlideResult::Moved(game) => {
                    (SessionState::Ready(game), Ok(MoveOutcome::applied(false)))
                }
                SlideResult::Blocked { game, reason } => (
                    SessionState::Ready(game),
                    Ok(MoveOutcome::rejected(reason, false)),
                ),
                SlideResult::Solved(solved) => {
                    (SessionState::Won(solved), Ok(MoveOutcome::applied(true)))
                }
                SlideResult::Refused { game, error } => (SessionState::Ready(game), Err(error)),
            },
        };
        self.state = state;

        if let Ok(outcome) = &outcome
            && outcome.accepted()
        {
            self.notify_board();
            if outcome.won() {
                self.notify_solved();
            }
        }
        outcome
    }

    /// Restores the starting layout and clears the move history.
    ///
    /// Works from both the ready and won phases. Calling it twice in a row
    /// leaves the same board as calling it once.
    #[instrument(skip(self), fields(level = %self.level.id()))]
    pub fn reset(&mut self) -> Result<(), MoveError> {
        let placeholder = self.placeholder();
        let restored = match std::mem::replace(&mut self.state, placeholder) {
            SessionState::Loading(setup) => {
                self.state = SessionState::Loading(setup);
                return Err(MoveError::NotReady);
            }
            SessionState::Ready(game) => game.reset(),
            SessionState::Won(solved) => solved.restart(),
        };

        match restored {
            Ok(game) => {
                self.state = SessionState::Ready(game);
                info!("Puzzle reset");
                self.notify_board();
                Ok(())
            }
            Err(error) => {
                warn!(%error, "Reset failed; session returned to loading");
                Err(error)
            }
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::Loading(_) => Phase::Loading,
            SessionState::Ready(_) => Phase::Ready,
            SessionState::Won(_) => Phase::Won,
        }
    }

    /// Whether the hero has reached the exit.
    pub fn is_won(&self) -> bool {
        matches!(self.state, SessionState::Won(_))
    }

    /// The board, once loaded.
    pub fn board(&self) -> Option<&Board> {
        match &self.state {
            SessionState::Loading(_) => None,
            SessionState::Ready(game) => Some(game.board()),
            SessionState::Won(solved) => Some(solved.board()),
        }
    }

    /// Immutable copy of the board for renderers, once loaded.
    pub fn snapshot(&self) -> Option<BoardSnapshot> {
        self.board().map(Board::snapshot)
    }

    /// Accepted slides since load or the last reset.
    pub fn history(&self) -> &[Slide] {
        match &self.state {
            SessionState::Loading(_) => &[],
            SessionState::Ready(game) => game.history(),
            SessionState::Won(solved) => solved.history(),
        }
    }

    /// Number of accepted slides since load or the last reset.
    pub fn moves(&self) -> usize {
        self.history().len()
    }

    /// Level this session plays.
    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    /// Collision mode used for slides.
    pub fn collision_mode(&self) -> CollisionMode {
        self.mode
    }

    /// Anchors `piece` can currently slide to. Empty once the puzzle is won.
    pub fn legal_targets(&self, piece: &PieceId) -> Result<Vec<Cell>, MoveError> {
        let game = match &self.state {
            SessionState::Loading(_) => return Err(MoveError::NotReady),
            SessionState::Won(_) => return Ok(Vec::new()),
            SessionState::Ready(game) => game,
        };
        let piece = game
            .board()
            .piece(piece)
            .ok_or_else(|| MoveError::InvalidReference(piece.clone()))?;
        Ok(rules::reachable_anchors(game.board(), piece))
    }

    /// Summary of the win, once solved.
    pub fn summary(&self) -> Option<SolvedSummary> {
        match &self.state {
            SessionState::Won(solved) => Some(solved.summary()),
            _ => None,
        }
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the session and hands back its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    fn placeholder(&self) -> SessionState {
        SessionState::Loading(
            PuzzleSetup::from_shared(Arc::clone(&self.level)).with_collision_mode(self.mode),
        )
    }

    fn notify_board(&mut self) {
        if let Some(snapshot) = self.snapshot() {
            self.observer.board_changed(&snapshot);
        }
    }

    fn notify_solved(&mut self) {
        if let Some(summary) = self.summary() {
            info!(%summary, "Puzzle solved");
            self.observer.solved(&summary);
        }
    }
}
