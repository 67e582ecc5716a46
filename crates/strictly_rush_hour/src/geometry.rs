//! Grid geometry: which cells a piece covers.

use super::types::{Cell, Orientation};

/// Cells covered by a piece of `length` anchored at `anchor`.
///
/// The anchor is the lowest-index cell; the rest follow along `orientation`.
/// Works for hypothetical anchors as well as current ones.
pub fn occupied_cells(
    orientation: Orientation,
    length: u8,
    anchor: Cell,
) -> impl Iterator<Item = Cell> {
    (0..i32::from(length)).map(move |i| anchor.offset(orientation, i))
}

/// Returns true if `cell` lies on an N×N board.
pub fn within_bounds(cell: Cell, size: u8) -> bool {
    let size = i32::from(size);
    (0..size).contains(&cell.col) && (0..size).contains(&cell.row)
}

/// First cell shared by two footprints, if any.
pub fn first_overlap(a: &[Cell], b: impl IntoIterator<Item = Cell>) -> Option<Cell> {
    b.into_iter().find(|cell| a.contains(cell))
}
