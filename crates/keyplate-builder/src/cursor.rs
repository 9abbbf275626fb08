use keyplate_geometry::Sketch;

/// Engine cursor state, threaded through a layer build: `origin` is the
/// cumulative displacement from the plate center, `x_off` the signed
/// horizontal carry used to return to column zero at each row wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cursor {
    pub origin: (f64, f64),
    pub x_off: f64,
}

impl Cursor {
    /// Move the sketch cursor and record how far we are from the plate center.
    #[must_use]
    pub fn center(&mut self, sketch: Sketch, dx: f64, dy: f64) -> Sketch {
        self.origin.0 += dx;
        self.origin.1 += dy;
        sketch.center(dx, dy)
    }

    /// Move back to the plate center and clear the recorded displacement.
    #[must_use]
    pub fn recenter(&mut self, sketch: Sketch) -> Sketch {
        let sketch = sketch.center(-self.origin.0, -self.origin.1);
        self.origin = (0.0, 0.0);
        sketch
    }
}
