//! First-class board invariants.
//!
//! Invariants are logical properties that hold at load time and after every
//! accepted slide. They are testable on their own and are composed into the
//! postcondition of [`SlideContract`](crate::SlideContract).

#[cfg(kani)]
mod verification;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of two and three invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod no_overlap;
pub mod single_hero;
pub mod within_bounds;

pub use no_overlap::NoOverlapInvariant;
pub use single_hero::SingleHeroInvariant;
pub use within_bounds::WithinBoundsInvariant;

/// All board invariants as a composable set.
pub type RushHourInvariants = (NoOverlapInvariant, WithinBoundsInvariant, SingleHeroInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, CarDefinition, Cell, Exit, LevelDefinition, LevelId, Orientation};

    fn board() -> Board {
        let level = LevelDefinition::new(
            LevelId::Number(1),
            6,
            Exit::Right { row: 2 },
            vec![
                CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
                CarDefinition::new("A", Orientation::Vertical, 3, 3, 0),
            ],
        );
        Board::from_level(&level).unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_loaded_board() {
        assert!(RushHourInvariants::check_all(&board()).is_ok());
    }

    #[test]
    fn test_invariant_set_collects_every_violation() {
        let mut board = board();
        // Drive A off the bottom edge and onto the hero's row at the same time.
        board.pieces[1].anchor = Cell::new(0, 1);
        board.pieces[1].length = 6;
        board.pieces[0].is_hero = false;

        let violations = RushHourInvariants::check_all(&board).unwrap_err();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (NoOverlapInvariant, SingleHeroInvariant);
        assert!(TwoInvariants::check_all(&board()).is_ok());
    }
}
