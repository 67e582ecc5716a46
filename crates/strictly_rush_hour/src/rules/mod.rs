//! Puzzle rules.
//!
//! Pure functions over a [`Board`](crate::Board): whether a slide is legal and
//! whether the hero has reached the exit. Rules never mutate the board, which
//! keeps them composable into the contract checks.

pub mod exit;
pub mod movement;

pub use exit::{has_won, hero_reaches_exit};
pub use movement::{CollisionMode, Rejection, check_move, is_legal, reachable_anchors};
