//! No-overlap invariant: two pieces never share a cell.

use super::super::{Board, Cell};
use super::Invariant;
use std::collections::HashSet;

/// Invariant: every cell is covered by at most one piece.
pub struct NoOverlapInvariant;

impl Invariant<Board> for NoOverlapInvariant {
    fn holds(board: &Board) -> bool {
        let mut covered: HashSet<Cell> = HashSet::new();
        board
            .all_pieces()
            .iter()
            .flat_map(|piece| piece.footprint())
            .all(|cell| covered.insert(cell))
    }

    fn description() -> &'static str {
        "No two pieces occupy the same cell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CarDefinition, Exit, LevelDefinition, LevelId, Orientation};

    fn board() -> Board {
        let level = LevelDefinition::new(
            LevelId::Number(1),
            6,
            Exit::Right { row: 2 },
            vec![
                CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
                CarDefinition::new("A", Orientation::Vertical, 2, 2, 1),
            ],
        );
        Board::from_level(&level).unwrap()
    }

    #[test]
    fn test_loaded_board_holds() {
        assert!(NoOverlapInvariant::holds(&board()));
    }

    #[test]
    fn test_stacked_pieces_violate() {
        let mut board = board();
        board.apply_move(&"X".into(), Cell::new(1, 2)).unwrap();
        assert!(!NoOverlapInvariant::holds(&board));
    }
}
