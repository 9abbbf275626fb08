//! Shared geometry primitives: points, rotations, kerf offsets.

pub mod kerf;
pub mod point;

pub use kerf::{inset, outset};
pub use point::Point;

/// Rotate `p` by `angle_deg` counterclockwise around `origin`.
pub fn rotate_point(p: (f64, f64), angle_deg: f64, origin: (f64, f64)) -> (f64, f64) {
    let a = angle_deg.to_radians();
    let (s, c) = a.sin_cos();
    let dx = p.0 - origin.0;
    let dy = p.1 - origin.1;
    (origin.0 + dx * c - dy * s, origin.1 + dx * s + dy * c)
}

/// Rotate every point in `points` around `origin`.
pub fn rotate_points(points: &[(f64, f64)], angle_deg: f64, origin: (f64, f64)) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|&p| rotate_point(p, angle_deg, origin))
        .collect()
}
