//! Within-bounds invariant, with the hero's exit exception.

use super::super::{Board, geometry};
use super::Invariant;

/// Invariant: every piece lies on the board.
///
/// The hero is exempt once it is lined up with the exit and has pushed past
/// the exit edge; that is the solved position, not a corruption.
pub struct WithinBoundsInvariant;

impl Invariant<Board> for WithinBoundsInvariant {
    fn holds(board: &Board) -> bool {
        let size = board.size();
        board.all_pieces().iter().all(|piece| {
            let on_board = piece.footprint().all(|cell| geometry::within_bounds(cell, size));
            let exiting = piece.is_hero()
                && board.exit().admits(piece)
                && piece.anchor().along(piece.orientation()) <= i32::from(size);
            on_board || exiting
        })
    }

    fn description() -> &'static str {
        "Pieces stay on the board (the hero may leave through the exit)"
    }
}
