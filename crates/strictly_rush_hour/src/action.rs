//! First-class slide actions.
//!
//! A slide is the player's intent, a piece and the anchor it should end on.
//! It is validated before it touches the board.

use serde::{Deserialize, Serialize};

use super::types::{Cell, Orientation, PieceId};

/// Request to move a piece's anchor to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Slide {
    /// Piece to move.
    pub piece: PieceId,
    /// Requested anchor.
    pub target: Cell,
}

impl Slide {
    /// Shorthand for a slide to (`col`, `row`).
    pub fn to(piece: impl Into<PieceId>, col: i32, row: i32) -> Self {
        Self::new(piece.into(), Cell::new(col, row))
    }
}

impl std::fmt::Display for Slide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.piece, self.target)
    }
}

/// Error raised when a request breaks the caller's side of the contract.
///
/// Blocked or out-of-range slides are not errors; they come back as a
/// [`Rejection`](crate::Rejection) inside the move outcome.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The piece id is not on the board.
    #[display("Piece {} is not on the board", _0)]
    InvalidReference(PieceId),

    /// The target changes the coordinate the piece cannot move along.
    #[display("Piece {} is {} and cannot move to {}", piece, orientation, target)]
    OffAxis {
        /// Piece that was asked to move.
        piece: PieceId,
        /// Its orientation.
        orientation: Orientation,
        /// Requested anchor.
        target: Cell,
    },

    /// Moves were requested before the level was loaded.
    #[display("Puzzle has not been loaded")]
    NotReady,

    /// A postcondition failed after a move was applied.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
