//! Strictly Rush Hour - type-safe sliding-block puzzle logic
//!
//! Pieces sit on a square grid and slide along their own axis. One of them,
//! the hero, has to reach the exit on the board's edge. This crate holds the
//! rules and state; drawing and input belong to the host.
//!
//! # Architecture
//!
//! - **Level**: JSON level definitions and load-time validation
//! - **Board**: validated piece layout with rendering snapshots
//! - **Rules**: pure legality and win predicates
//! - **Contracts**: slide preconditions, and postconditions built from invariants
//! - **Typestate**: setup, in-progress and solved phases as distinct types
//! - **Session**: stateful front door with observers for renderers
//!
//! # Example
//!
//! ```
//! use strictly_rush_hour::{LevelDefinition, PuzzleSession};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let level = LevelDefinition::from_json(
//!     r#"{"id": 1, "exitRow": 2, "cars": [
//!         {"id": "X", "type": "h", "len": 2, "col": 0, "row": 2, "isHero": true},
//!         {"id": "A", "type": "v", "len": 2, "col": 2, "row": 1}
//!     ]}"#,
//! )?;
//! let mut session = PuzzleSession::start(level)?;
//! session.request_move("A", 2, 3)?;
//! let outcome = session.request_move("X", 4, 2)?;
//! assert!(outcome.won());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod contracts;
mod geometry;
mod input;
mod level;
mod phases;
mod session;
mod types;
mod typestate;

#[cfg(kani)]
mod kani_support;

pub mod invariants;
pub mod rules;

// Crate-level exports - Core types
pub use types::{Cell, Exit, Orientation, Piece, PieceId};

// Crate-level exports - Levels
pub use level::{CarDefinition, DEFAULT_BOARD_SIZE, LevelDefinition, LevelError, LevelId};

// Crate-level exports - Board
pub use board::{Board, BoardSnapshot};

// Crate-level exports - Actions and contracts
pub use action::{MoveError, Slide};
pub use contracts::{Contract, PieceExists, ShapePreserved, SlideContract, StaysOnAxis};

// Crate-level exports - Rules
pub use rules::{
    CollisionMode, Rejection, check_move, has_won, hero_reaches_exit, is_legal,
    reachable_anchors,
};

// Crate-level exports - Invariants
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, NoOverlapInvariant, RushHourInvariants,
    SingleHeroInvariant, WithinBoundsInvariant,
};

// Crate-level exports - Phases and typestate
pub use phases::{Phase, SolvedSummary};
pub use typestate::{PuzzleInProgress, PuzzleSetup, PuzzleSolved, SlideResult};

// Crate-level exports - Session
pub use session::{MoveOutcome, PuzzleObserver, PuzzleSession};

// Crate-level exports - Pointer input
pub use input::{cells_from_pixels, drag_slide, drag_target};
