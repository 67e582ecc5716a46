//! Single-hero invariant.

use super::super::Board;
use super::Invariant;

/// Invariant: exactly one piece is the hero, and it is the one the board tracks.
pub struct SingleHeroInvariant;

impl Invariant<Board> for SingleHeroInvariant {
    fn holds(board: &Board) -> bool {
        board.all_pieces().iter().filter(|p| p.is_hero()).count() == 1 && board.hero().is_hero()
    }

    fn description() -> &'static str {
        "Exactly one piece is the hero"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CarDefinition, Exit, LevelDefinition, LevelId, Orientation};

    #[test]
    fn test_second_hero_violates() {
        let level = LevelDefinition::new(
            LevelId::Number(1),
            6,
            Exit::Right { row: 2 },
            vec![
                CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
                CarDefinition::new("A", Orientation::Vertical, 2, 4, 0),
            ],
        );
        let mut board = Board::from_level(&level).unwrap();
        assert!(SingleHeroInvariant::holds(&board));

        board.pieces[1].is_hero = true;
        assert!(!SingleHeroInvariant::holds(&board));
    }
}
