//! Move validation: boundary, axis and collision checks.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::super::{Board, Cell, Orientation, Piece, PieceId};
use crate::geometry;

/// How much of a slide's path is checked for collisions.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CollisionMode {
    /// Only the final footprint must be free. A multi-cell slide may pass
    /// over another piece.
    #[default]
    Footprint,
    /// Every intermediate anchor between start and target must be free.
    Swept,
}

/// Why a slide was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// Target column or row below zero.
    #[display("Target {} has a negative coordinate", _0)]
    NegativeCoordinate(Cell),

    /// Target moves the piece across its axis.
    #[display("Piece {} cannot leave its {} axis", piece, orientation)]
    OffAxis {
        /// Piece asked to move.
        piece: PieceId,
        /// Its orientation.
        orientation: Orientation,
    },

    /// Target pushes the piece past the far edge.
    #[display("Piece {} would cross the board edge at {}", piece, target)]
    BeyondEdge {
        /// Piece asked to move.
        piece: PieceId,
        /// Requested anchor.
        target: Cell,
    },

    /// Target footprint (or path) hits another piece.
    #[display("Piece {} would collide with {} at {}", piece, with, cell)]
    Collision {
        /// Piece asked to move.
        piece: PieceId,
        /// Piece in the way.
        with: PieceId,
        /// Contested cell.
        cell: Cell,
    },

    /// The puzzle is solved and the board no longer takes moves.
    #[display("Puzzle is already solved")]
    Frozen,
}

/// Decides whether `piece` may move its anchor to `target`.
///
/// Pure: the board is not modified. Checks run in order: negative
/// coordinates, axis consistency, far edge (with the hero's exit exception),
/// then collisions according to `mode`.
#[instrument(skip(board, piece), fields(piece = %piece.id()))]
pub fn check_move(
    board: &Board,
    piece: &Piece,
    target: Cell,
    mode: CollisionMode,
) -> Result<(), Rejection> {
    if target.col < 0 || target.row < 0 {
        return Err(Rejection::NegativeCoordinate(target));
    }

    let axis = piece.orientation();
    if target.across(axis) != piece.anchor().across(axis) {
        return Err(Rejection::OffAxis {
            piece: piece.id().clone(),
            orientation: axis,
        });
    }

    check_far_edge(board, piece, target)?;

    let verdict = match mode {
        CollisionMode::Footprint => check_footprint(board, piece, target),
        CollisionMode::Swept => check_path(board, piece, target),
    };
    if let Err(reason) = &verdict {
        debug!(%reason, "Move rejected");
    }
    verdict
}

/// Boolean legality with final-footprint collision checking.
pub fn is_legal(board: &Board, piece: &Piece, target: Cell) -> bool {
    check_move(board, piece, target, CollisionMode::Footprint).is_ok()
}

/// Anchors `piece` can reach by sliding without passing through anything.
///
/// Returned nearest-first in each direction, backwards before forwards.
/// The current anchor is not included.
#[instrument(skip(board, piece), fields(piece = %piece.id()))]
pub fn reachable_anchors(board: &Board, piece: &Piece) -> Vec<Cell> {
    let axis = piece.orientation();
    let mut anchors = Vec::new();
    for step in [-1, 1] {
        let mut target = piece.anchor().offset(axis, step);
        while check_move(board, piece, target, CollisionMode::Footprint).is_ok() {
            anchors.push(target);
            target = target.offset(axis, step);
        }
    }
    anchors
}

/// Far-edge check. The hero, when lined up with the exit, may run past the
/// edge until it has left the board entirely.
fn check_far_edge(board: &Board, piece: &Piece, target: Cell) -> Result<(), Rejection> {
    let axis = piece.orientation();
    let size = i64::from(board.size());
    let along = i64::from(target.along(axis));

    // Widened so a target near i32::MAX cannot wrap back onto the board.
    if along + i64::from(piece.length()) <= size {
        return Ok(());
    }
    if piece.is_hero() && board.exit().admits(piece) && along <= size {
        debug!(target = %target, "Hero slides through the exit");
        return Ok(());
    }
    Err(Rejection::BeyondEdge {
        piece: piece.id().clone(),
        target,
    })
}

/// Checks every anchor after the current one up to and including `target`.
fn check_path(board: &Board, piece: &Piece, target: Cell) -> Result<(), Rejection> {
    let axis = piece.orientation();
    let to = target.along(axis);
    let mut along = piece.anchor().along(axis);
    let step = (to - along).signum();
    while along != to {
        along += step;
        check_footprint(board, piece, target.with_along(axis, along))?;
    }
    Ok(())
}

/// Collision check of `piece` anchored at `anchor` against every other
/// piece at its current position.
fn check_footprint(board: &Board, piece: &Piece, anchor: Cell) -> Result<(), Rejection> {
    let footprint: Vec<Cell> = piece.footprint_at(anchor).collect();
    for other in board.all_pieces().iter().filter(|p| p.id() != piece.id()) {
        if let Some(cell) = geometry::first_overlap(&footprint, other.footprint()) {
            return Err(Rejection::Collision {
                piece: piece.id().clone(),
                with: other.id().clone(),
                cell,
            });
        }
    }
    Ok(())
}
