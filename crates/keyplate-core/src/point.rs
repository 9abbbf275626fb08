use serde::{Deserialize, Serialize};

use crate::rotate_point;

/// A planar point with an attached rotation (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees.
    pub r: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    #[must_use]
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Shift this point by `delta`, interpreted in its rotated frame.
    pub fn shift(&mut self, delta: (f64, f64)) -> &mut Self {
        let rotated = rotate_point(delta, self.r, (0.0, 0.0));
        self.x += rotated.0;
        self.y += rotated.1;
        self
    }

    /// Rotate this point by `angle_deg` around `origin` and update its rotation.
    pub fn rotate(&mut self, angle_deg: f64, origin: (f64, f64)) -> &mut Self {
        let p = rotate_point((self.x, self.y), angle_deg, origin);
        self.x = p.0;
        self.y = p.1;
        self.r += angle_deg;
        self
    }
}
