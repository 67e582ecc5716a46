//! Kani proof harnesses for footprint geometry.

#[cfg(kani)]
mod proofs {
    use crate::geometry::{occupied_cells, within_bounds};
    use crate::{Cell, Orientation};

    /// A footprint stays on a 6×6 board exactly when its far end does.
    #[kani::proof]
    #[kani::unwind(8)]
    fn verify_footprint_bounds_match_far_edge() {
        let orientation: Orientation = kani::any();
        let anchor: Cell = kani::any();
        let length: u8 = kani::any();
        kani::assume((2..=4).contains(&length));
        kani::assume((0..6).contains(&anchor.col) && (0..6).contains(&anchor.row));

        let on_board = occupied_cells(orientation, length, anchor).all(|c| within_bounds(c, 6));
        let far_edge = anchor.along(orientation) + i32::from(length);
        assert_eq!(on_board, far_edge <= 6);
    }
}
