//! Kani arbitrary implementations for puzzle types.

use super::{Cell, Orientation};

impl kani::Arbitrary for Orientation {
    fn any() -> Self {
        if kani::any() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

impl kani::Arbitrary for Cell {
    fn any() -> Self {
        Cell::new(kani::any(), kani::any())
    }
}
