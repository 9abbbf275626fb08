//! 2D geometry layer: closed-polyline primitives, boolean regions, and the
//! linear sketch handle the plate builders cut against.

pub mod primitives;
pub mod region;
pub mod sketch;

pub use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
pub use region::Region;
pub use sketch::Sketch;
