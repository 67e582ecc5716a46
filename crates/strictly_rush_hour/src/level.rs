//! Level definitions: the input format puzzles are built from.
//!
//! A level is plain data. It is validated when a [`Board`](crate::Board) is
//! built from it, and kept unchanged afterwards so a puzzle can be reset
//! without loading it again.

use derive_getters::Getters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::types::{Cell, Exit, Orientation, PieceId};

/// Board size used when a level does not state one.
pub const DEFAULT_BOARD_SIZE: u8 = 6;

#[instrument]
fn default_size() -> u8 {
    DEFAULT_BOARD_SIZE
}

/// Level identifier as written in level files (a number or a name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LevelId {
    /// Numbered level.
    Number(u32),
    /// Named level.
    Name(String),
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelId::Number(n) => write!(f, "{}", n),
            LevelId::Name(name) => write!(f, "{}", name),
        }
    }
}

/// One car as declared in a level file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Getters)]
#[serde(rename_all = "camelCase")]
pub struct CarDefinition {
    /// Unique piece id.
    id: PieceId,
    /// `"h"` or `"v"`.
    #[serde(rename = "type")]
    orientation: Orientation,
    /// Cells covered.
    len: u8,
    /// Anchor column.
    col: i32,
    /// Anchor row.
    row: i32,
    /// Marks the piece that must reach the exit.
    #[serde(default)]
    is_hero: bool,
    /// Display colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl CarDefinition {
    /// Creates a non-hero car without a colour.
    pub fn new(
        id: impl Into<PieceId>,
        orientation: Orientation,
        len: u8,
        col: i32,
        row: i32,
    ) -> Self {
        Self {
            id: id.into(),
            orientation,
            len,
            col,
            row,
            is_hero: false,
            color: None,
        }
    }

    /// Marks this car as the hero.
    pub fn hero(mut self) -> Self {
        self.is_hero = true;
        self
    }

    /// Sets the display colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Starting anchor cell.
    pub fn anchor(&self) -> Cell {
        Cell::new(self.col, self.row)
    }
}

/// A complete level: board size, exit, and starting layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Getters)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    /// Level identifier.
    id: LevelId,
    /// Board edge length; defaults to 6.
    #[serde(default = "default_size")]
    size: u8,
    /// Exit row on the right edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exit_row: Option<i32>,
    /// Exit column on the bottom edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exit_col: Option<i32>,
    /// Cars in declaration order.
    cars: Vec<CarDefinition>,
}

impl LevelDefinition {
    /// Creates a level definition.
    pub fn new(id: LevelId, size: u8, exit: Exit, cars: Vec<CarDefinition>) -> Self {
        let (exit_row, exit_col) = match exit {
            Exit::Right { row } => (Some(row), None),
            Exit::Bottom { col } => (None, Some(col)),
        };
        Self {
            id,
            size,
            exit_row,
            exit_col,
            cars,
        }
    }

    /// Parses a level from its JSON form.
    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self =
            serde_json::from_str(json).map_err(|e| LevelError::Parse(e.to_string()))?;
        debug!(level = %level.id, cars = level.cars.len(), "Parsed level definition");
        Ok(level)
    }

    /// Exit configuration.
    ///
    /// Exactly one of `exitRow` / `exitCol` must be set.
    pub fn exit(&self) -> Result<Exit, LevelError> {
        match (self.exit_row, self.exit_col) {
            (Some(row), None) => Ok(Exit::Right { row }),
            (None, Some(col)) => Ok(Exit::Bottom { col }),
            _ => Err(LevelError::AmbiguousExit),
        }
    }

    /// Looks up a car by id.
    pub fn car(&self, id: &PieceId) -> Option<&CarDefinition> {
        self.cars.iter().find(|car| &car.id == id)
    }
}

/// Reasons a level definition cannot become a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LevelError {
    /// The JSON could not be decoded.
    #[display("Level could not be parsed: {}", _0)]
    Parse(String),

    /// Board size of zero.
    #[display("Board size must be positive")]
    InvalidSize,

    /// Neither or both of `exitRow` and `exitCol` were given.
    #[display("Level must set exactly one of exitRow or exitCol")]
    AmbiguousExit,

    /// Exit lane outside the board.
    #[display("Exit lane {} lies outside a board of size {}", lane, size)]
    ExitOutOfRange {
        /// Requested lane.
        lane: i32,
        /// Board size.
        size: u8,
    },

    /// Two cars share an id.
    #[display("Piece {} is declared more than once", _0)]
    DuplicatePiece(PieceId),

    /// Car shorter than two cells.
    #[display("Piece {} has length {}; pieces need at least 2 cells", piece, length)]
    PieceTooShort {
        /// Offending piece.
        piece: PieceId,
        /// Declared length.
        length: u8,
    },

    /// Car not fully on the board.
    #[display("Piece {} leaves the board at {}", piece, cell)]
    OutOfBounds {
        /// Offending piece.
        piece: PieceId,
        /// First cell outside the board.
        cell: Cell,
    },

    /// Two cars cover the same cell.
    #[display("Pieces {} and {} overlap at {}", first, second, cell)]
    Overlap {
        /// Earlier piece.
        first: PieceId,
        /// Later piece.
        second: PieceId,
        /// Shared cell.
        cell: Cell,
    },

    /// No car is marked as the hero.
    #[display("Level has no hero piece")]
    NoHero,

    /// More than one car is marked as the hero.
    #[display("Level has {} hero pieces; exactly one is required", _0)]
    MultipleHeroes(usize),

    /// The hero cannot drive out of the exit.
    #[display("Hero {} is not lined up with the exit ({})", piece, exit)]
    HeroOffExitLane {
        /// The hero.
        piece: PieceId,
        /// Configured exit.
        exit: Exit,
    },

    /// The hero already touches the exit in the starting layout.
    #[display("Level {} starts already solved", _0)]
    AlreadySolved(LevelId),
}

impl std::error::Error for LevelError {}
