//! Core domain types for rush hour puzzles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry;

/// Axis a piece is confined to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumIter,
)]
pub enum Orientation {
    /// Occupies a single row and slides left or right.
    #[serde(rename = "h")]
    #[strum(serialize = "horizontal")]
    Horizontal,
    /// Occupies a single column and slides up or down.
    #[serde(rename = "v")]
    #[strum(serialize = "vertical")]
    Vertical,
}

impl Orientation {
    /// Returns the other orientation.
    pub fn orthogonal(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A grid cell addressed by column and row.
///
/// Coordinates are signed so that requested targets left of or above the
/// board can be represented and rejected rather than wrapped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_new::new,
)]
pub struct Cell {
    /// Column index (x), growing to the right.
    pub col: i32,
    /// Row index (y), growing downwards.
    pub row: i32,
}

impl Cell {
    /// Coordinate along the given axis (column for horizontal, row for vertical).
    pub fn along(self, axis: Orientation) -> i32 {
        match axis {
            Orientation::Horizontal => self.col,
            Orientation::Vertical => self.row,
        }
    }

    /// Coordinate across the given axis.
    pub fn across(self, axis: Orientation) -> i32 {
        self.along(axis.orthogonal())
    }

    /// Returns this cell shifted by `delta` along `axis`.
    ///
    /// Saturates at the `i32` range, which lies far outside any board, so an
    /// oversized shift lands on a target the rules reject.
    pub fn offset(self, axis: Orientation, delta: i32) -> Self {
        match axis {
            Orientation::Horizontal => Self::new(self.col.saturating_add(delta), self.row),
            Orientation::Vertical => Self::new(self.col, self.row.saturating_add(delta)),
        }
    }

    /// Returns this cell with its coordinate along `axis` replaced.
    pub fn with_along(self, axis: Orientation, value: i32) -> Self {
        match axis {
            Orientation::Horizontal => Self::new(value, self.row),
            Orientation::Vertical => Self::new(self.col, value),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Opaque piece identifier, unique within a puzzle.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Single character used when drawing the piece on a text grid.
    pub fn label(&self) -> char {
        self.0.chars().next().unwrap_or('?')
    }
}

impl From<&str> for PieceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A car on the board.
///
/// Orientation and length are fixed at construction; only the anchor moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) orientation: Orientation,
    pub(crate) length: u8,
    pub(crate) anchor: Cell,
    pub(crate) is_hero: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) color: Option<String>,
}

impl Piece {
    pub(crate) fn new(
        id: PieceId,
        orientation: Orientation,
        length: u8,
        anchor: Cell,
        is_hero: bool,
        color: Option<String>,
    ) -> Self {
        Self {
            id,
            orientation,
            length,
            anchor,
            is_hero,
            color,
        }
    }

    /// Returns the piece identifier.
    pub fn id(&self) -> &PieceId {
        &self.id
    }

    /// Returns the axis the piece slides along.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the number of cells the piece covers.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Returns the anchor (lowest-index occupied cell).
    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    /// Returns true for the piece that has to reach the exit.
    pub fn is_hero(&self) -> bool {
        self.is_hero
    }

    /// Display colour, if the level gave one.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Cells covered at the current anchor.
    pub fn footprint(&self) -> impl Iterator<Item = Cell> {
        self.footprint_at(self.anchor)
    }

    /// Cells the piece would cover if anchored at `anchor`.
    pub fn footprint_at(&self, anchor: Cell) -> impl Iterator<Item = Cell> {
        geometry::occupied_cells(self.orientation, self.length, anchor)
    }

    /// Returns true if the piece currently covers `cell`.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.footprint().any(|c| c == cell)
    }

    pub(crate) fn set_anchor(&mut self, anchor: Cell) {
        self.anchor = anchor;
    }
}

/// Where the hero leaves the board.
///
/// Both edges sit on the far side of their axis, so the hero always exits by
/// increasing its anchor coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "edge", rename_all = "lowercase")]
pub enum Exit {
    /// Opening in the right edge at the given row.
    Right {
        /// Exit row.
        row: i32,
    },
    /// Opening in the bottom edge at the given column.
    Bottom {
        /// Exit column.
        col: i32,
    },
}

impl Exit {
    /// Axis the hero must travel along to leave.
    pub fn axis(self) -> Orientation {
        match self {
            Exit::Right { .. } => Orientation::Horizontal,
            Exit::Bottom { .. } => Orientation::Vertical,
        }
    }

    /// Row (right exit) or column (bottom exit) of the opening.
    pub fn lane(self) -> i32 {
        match self {
            Exit::Right { row } => row,
            Exit::Bottom { col } => col,
        }
    }

    /// Returns true if `piece` is aligned with the exit and sits in its lane.
    pub fn admits(self, piece: &Piece) -> bool {
        piece.orientation() == self.axis() && piece.anchor().across(self.axis()) == self.lane()
    }
}

impl std::fmt::Display for Exit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exit::Right { row } => write!(f, "right edge, row {}", row),
            Exit::Bottom { col } => write!(f, "bottom edge, column {}", col),
        }
    }
}
