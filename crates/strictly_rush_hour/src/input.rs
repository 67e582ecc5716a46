//! Pointer drag translation.
//!
//! Hosts with a pointer report drags in pixels. These helpers turn a drag
//! into whole-cell slides along the piece's axis, rounding halves upward.

use tracing::instrument;

use super::action::Slide;
use super::types::{Cell, Orientation, Piece};

/// Whole cells covered by a pixel delta, rounded half up.
///
/// Returns zero for a non-finite delta or a cell size that is not positive.
#[instrument]
pub fn cells_from_pixels(delta: f64, cell_size: f64) -> i32 {
    if !delta.is_finite() || !cell_size.is_finite() || cell_size <= 0.0 {
        return 0;
    }
    let cells = (delta / cell_size + 0.5).floor();
    cells.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Anchor a drag of (`dx`, `dy`) pixels would move `piece` to.
///
/// Only the component along the piece's axis counts.
#[instrument(skip(piece), fields(piece = %piece.id()))]
pub fn drag_target(piece: &Piece, dx: f64, dy: f64, cell_size: f64) -> Cell {
    let delta = match piece.orientation() {
        Orientation::Horizontal => dx,
        Orientation::Vertical => dy,
    };
    piece
        .anchor()
        .offset(piece.orientation(), cells_from_pixels(delta, cell_size))
}

/// Slide request for a completed drag.
#[instrument(skip(piece), fields(piece = %piece.id()))]
pub fn drag_slide(piece: &Piece, dx: f64, dy: f64, cell_size: f64) -> Slide {
    Slide::new(piece.id().clone(), drag_target(piece, dx, dy, cell_size))
}
