//! Plate layout engine and case-layer builders.
//!
//! The switch-bearing layers (`switch`, `reinforcing`, `top`) walk the
//! normalized layout with a running cursor and cut one opening per key; the
//! case layers (`bottom`, `closed`, `open`) build outlines, mounting holes,
//! feet, and USB openings.

pub mod case;
pub mod cursor;
pub mod plate;
pub mod switch_plate;

pub use case::{build_bottom_layer, build_closed_layer, build_open_layer, layout_sandwich_holes};
pub use cursor::Cursor;
pub use plate::init_plate;
pub use switch_plate::{build_switch_layer, BuiltLayer};
