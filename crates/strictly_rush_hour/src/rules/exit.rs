//! Win detection.

use super::super::{Board, Exit, Piece};
use tracing::instrument;

/// Returns true once the hero's leading edge has reached the exit edge.
///
/// For a length-2 hero on a 6×6 board with a right exit this is `col >= 4`.
#[instrument(skip(board))]
pub fn has_won(board: &Board) -> bool {
    hero_reaches_exit(board.hero(), board.size(), board.exit())
}

/// Win predicate for a single piece: lined up with the exit and its far end
/// at or past the exit edge.
pub fn hero_reaches_exit(hero: &Piece, size: u8, exit: Exit) -> bool {
    exit.admits(hero)
        && hero.anchor().along(exit.axis()) + i32::from(hero.length()) >= i32::from(size)
}
