use cavalier_contours::polyline::Polyline;

use crate::primitives::{circle, polygon, rectangle, rounded_rectangle};
use crate::region::Region;

/// A plate being built: one owner, every operation consumes and returns the
/// handle. Profiles drawn at the current cursor accumulate until
/// [`Sketch::cut_thru_all`] commits them as through-cuts.
#[derive(Debug, Clone)]
pub struct Sketch {
    region: Region,
    base: (f64, f64),
    thickness: f64,
    cursor: (f64, f64),
    pending: Vec<Polyline<f64>>,
    drawn: Vec<Polyline<f64>>,
}

impl Sketch {
    /// An extruded rectangular plate centered on the origin.
    #[must_use]
    pub fn plate(width: f64, height: f64, thickness: f64) -> Self {
        Self {
            region: Region::from_outline(rectangle((0.0, 0.0), (width, height))),
            base: (width, height),
            thickness,
            cursor: (0.0, 0.0),
            pending: Vec::new(),
            drawn: Vec::new(),
        }
    }

    /// Round the plate's vertical edges. Only meaningful on the fresh base
    /// rectangle, before any profile has been committed.
    #[must_use]
    pub fn fillet_corners(mut self, radius: f64) -> Self {
        self.region = Region::from_outline(rounded_rectangle((0.0, 0.0), self.base, radius));
        self
    }

    /// Move the working cursor relative to its current position.
    #[must_use]
    pub fn center(mut self, dx: f64, dy: f64) -> Self {
        self.cursor.0 += dx;
        self.cursor.1 += dy;
        self
    }

    /// Draw a closed profile at the cursor. Accumulated, not yet cut.
    #[must_use]
    pub fn polyline(mut self, points: &[(f64, f64)]) -> Self {
        let translated: Vec<(f64, f64)> = points
            .iter()
            .map(|&(x, y)| (self.cursor.0 + x, self.cursor.1 + y))
            .collect();
        self.pending.push(polygon(&translated));
        self
    }

    /// Draw a closed profile at the cursor that is exported as a cut line but
    /// never subtracted from the plate. Used for parts nested into waste
    /// areas (feet in the case frame).
    #[must_use]
    pub fn draw_polyline(mut self, points: &[(f64, f64)]) -> Self {
        let translated: Vec<(f64, f64)> = points
            .iter()
            .map(|&(x, y)| (self.cursor.0 + x, self.cursor.1 + y))
            .collect();
        self.drawn.push(polygon(&translated));
        self
    }

    /// Draw a circle of `radius` at the cursor.
    #[must_use]
    pub fn circle(mut self, radius: f64) -> Self {
        self.pending.push(circle(self.cursor, radius));
        self
    }

    /// Draw a hole of `diameter` at the cursor.
    #[must_use]
    pub fn hole(self, diameter: f64) -> Self {
        self.circle(diameter / 2.0)
    }

    /// Draw an axis-aligned rectangle centered on the cursor.
    #[must_use]
    pub fn rect(mut self, width: f64, height: f64) -> Self {
        self.pending.push(rectangle(self.cursor, (width, height)));
        self
    }

    /// Commit every accumulated profile as a through-cut.
    #[must_use]
    pub fn cut_thru_all(mut self) -> Self {
        if !self.pending.is_empty() {
            let cutters = std::mem::take(&mut self.pending);
            self.region.subtract_all(&cutters);
        }
        self
    }

    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Finished closed outlines: outer boundaries, then holes, then profiles
    /// drawn without cutting.
    pub fn outlines(&self) -> impl Iterator<Item = &Polyline<f64>> {
        self.region.outlines().chain(self.drawn.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavalier_contours::polyline::PlineSource;

    #[test]
    fn cursor_moves_are_relative() {
        let sketch = Sketch::plate(100.0, 50.0, 1.5).center(3.0, 4.0).center(-1.0, 2.0);
        assert_eq!(sketch.cursor(), (2.0, 6.0));
    }

    #[test]
    fn profiles_are_drawn_at_the_cursor() {
        let sketch = Sketch::plate(100.0, 50.0, 1.5)
            .center(10.0, 5.0)
            .rect(4.0, 4.0)
            .cut_thru_all();
        let hole = &sketch.region().neg[0];
        let extents = hole.extents().expect("hole extents");
        assert!((extents.min_x - 8.0).abs() < 1e-9);
        assert!((extents.max_x - 12.0).abs() < 1e-9);
    }

    #[test]
    fn pending_profiles_survive_until_cut() {
        let sketch = Sketch::plate(100.0, 50.0, 1.5).circle(2.0);
        assert!(sketch.region().neg.is_empty());
        let sketch = sketch.cut_thru_all();
        assert_eq!(sketch.region().neg.len(), 1);
    }

    #[test]
    fn fillet_produces_arc_segments() {
        let sketch = Sketch::plate(100.0, 50.0, 1.5).fillet_corners(4.0);
        let outline = &sketch.region().pos[0];
        assert_eq!(outline.vertex_count(), 8);
        assert!(outline.vertex_data.iter().any(|v| v.bulge != 0.0));
    }
}
