use std::f64::consts::PI;

use cavalier_contours::polyline::PlineSource;

use crate::{PlineVertex, Polyline};

fn bulge_for_quarter_circle() -> f64 {
    (PI / 8.0).tan()
}

pub fn circle(center: (f64, f64), radius: f64) -> Polyline<f64> {
    let (cx, cy) = center;
    let mut pl = Polyline::new_closed();

    // Represent a full circle as two 180° arcs (two vertices, both bulge=1).
    pl.vertex_data.push(PlineVertex::new(cx - radius, cy, 1.0));
    pl.vertex_data.push(PlineVertex::new(cx + radius, cy, 1.0));
    pl
}

pub fn rectangle(center: (f64, f64), size: (f64, f64)) -> Polyline<f64> {
    let (cx, cy) = center;
    let (w, h) = size;
    let hw = w / 2.0;
    let hh = h / 2.0;

    let mut pl = Polyline::new_closed();
    for (x, y) in [
        (cx - hw, cy - hh),
        (cx + hw, cy - hh),
        (cx + hw, cy + hh),
        (cx - hw, cy + hh),
    ] {
        pl.vertex_data.push(PlineVertex::new(x, y, 0.0));
    }
    pl
}

pub fn rounded_rectangle(center: (f64, f64), size: (f64, f64), corner_radius: f64) -> Polyline<f64> {
    let (cx, cy) = center;
    let (w, h) = size;
    let hw = w / 2.0;
    let hh = h / 2.0;
    let r = corner_radius.min(hw).min(hh).max(0.0);

    if r == 0.0 {
        return rectangle(center, size);
    }

    let b = bulge_for_quarter_circle();

    // CCW rounded rectangle: 8 vertices (line, arc, line, arc, ...). Bulge lives on the start of
    // the arc segment (vertex -> next vertex).
    let pts: [(f64, f64, f64); 8] = [
        (cx + hw - r, cy - hh, b),   // bottom edge to bottom-right corner arc
        (cx + hw, cy - hh + r, 0.0), // right edge
        (cx + hw, cy + hh - r, b),   // right edge to top-right arc
        (cx + hw - r, cy + hh, 0.0), // top edge
        (cx - hw + r, cy + hh, b),   // top edge to top-left arc
        (cx - hw, cy + hh - r, 0.0), // left edge
        (cx - hw, cy - hh + r, b),   // left edge to bottom-left arc
        (cx - hw + r, cy - hh, 0.0), // bottom edge
    ];

    let mut pl = Polyline::new_closed();
    for (x, y, bulge) in pts {
        pl.vertex_data.push(PlineVertex::new(x, y, bulge));
    }
    pl
}

/// Closed polygon from explicit vertices. A trailing vertex equal to the first
/// is dropped; closure is implicit.
pub fn polygon(vertices: &[(f64, f64)]) -> Polyline<f64> {
    let mut vertices = vertices;
    if vertices.len() > 1 {
        let first = vertices[0];
        let last = vertices[vertices.len() - 1];
        if (first.0 - last.0).abs() < 1e-9 && (first.1 - last.1).abs() < 1e-9 {
            vertices = &vertices[..vertices.len() - 1];
        }
    }

    let mut pl = Polyline::new_closed();
    for &(x, y) in vertices {
        pl.vertex_data.push(PlineVertex::new(x, y, 0.0));
    }
    pl
}

pub fn is_valid_closed_polyline(pl: &Polyline<f64>) -> bool {
    pl.is_closed() && pl.vertex_count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_drops_closing_duplicate() {
        let pl = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(pl.vertex_count(), 3);
        assert!(pl.is_closed());
    }

    #[test]
    fn circle_is_two_half_arcs() {
        let pl = circle((1.0, 2.0), 3.0);
        assert_eq!(pl.vertex_count(), 2);
        assert_eq!(pl.vertex_data[0].bulge, 1.0);
        assert_eq!(pl.vertex_data[1].bulge, 1.0);
    }

    #[test]
    fn rounded_rectangle_degenerates_to_rectangle() {
        let pl = rounded_rectangle((0.0, 0.0), (10.0, 4.0), 0.0);
        assert_eq!(pl.vertex_count(), 4);
    }
}
