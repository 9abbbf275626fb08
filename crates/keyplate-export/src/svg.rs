use cavalier_contours::core::math::angle_from_bulge;
use cavalier_contours::polyline::{seg_bounding_box, PlineVertex};
use keyplate_geometry::{PlineSource, Polyline, Sketch};

#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("SVG export requires at least one outline")]
    Empty,
}

const EPS: f64 = 1e-3;

/// Serialize every finished outline of the sketch as a single-path SVG.
/// Y is flipped so the drawing reads top-down like the physical plate.
pub fn svg_from_sketch(sketch: &Sketch) -> Result<String, SvgError> {
    let plines: Vec<&Polyline<f64>> = sketch.outlines().collect();
    let bounds = bounds_for_plines(&plines).ok_or(SvgError::Empty)?;

    let width = bounds.max_x - bounds.min_x;
    let height = bounds.max_y - bounds.min_y;
    if width <= 0.0 || height <= 0.0 {
        return Err(SvgError::Empty);
    }

    let transform = |x: f64, y: f64| (x - bounds.min_x, bounds.max_y - y);

    let mut path = String::new();
    for pl in &plines {
        let sub = polyline_path(pl, transform);
        if sub.is_empty() {
            continue;
        }
        if !path.is_empty() {
            path.push(' ');
        }
        path.push_str(&sub);
    }

    if path.is_empty() {
        return Err(SvgError::Empty);
    }

    Ok(format!(
        "<svg width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\"><g id=\"svgGroup\" stroke-linecap=\"round\" fill-rule=\"evenodd\" stroke=\"#000\" stroke-width=\"0.25mm\" fill=\"none\" style=\"stroke:#000;stroke-width:0.25mm;fill:none\"><path d=\"{path}\" vector-effect=\"non-scaling-stroke\"/></g></svg>",
        w = fmt_num(width),
        h = fmt_num(height),
        path = path
    ))
}

fn polyline_path(pl: &Polyline<f64>, transform: impl Fn(f64, f64) -> (f64, f64)) -> String {
    if pl.vertex_count() < 2 {
        return String::new();
    }

    let mut out = String::new();
    let first = pl.vertex_data[0];
    let (sx, sy) = transform(first.x, first.y);
    out.push_str(&format!("M {} {}", fmt_num(sx), fmt_num(sy)));

    let count = pl.vertex_count();
    for i in 0..count {
        let next = if i + 1 < count {
            i + 1
        } else if pl.is_closed() {
            0
        } else {
            break;
        };
        let v1 = pl.vertex_data[i];
        let v2 = pl.vertex_data[next];
        let (ex, ey) = transform(v2.x, v2.y);

        if v1.bulge.abs() <= EPS {
            out.push_str(&format!(" L {} {}", fmt_num(ex), fmt_num(ey)));
        } else {
            let v1_seg = PlineVertex::new(v1.x, v1.y, v1.bulge);
            let v2_seg = PlineVertex::new(v2.x, v2.y, 0.0);
            let (radius, _) =
                cavalier_contours::polyline::seg_arc_radius_and_center(v1_seg, v2_seg);
            let bulge_svg = -v1.bulge; // Y-flip in SVG space
            let angle = angle_from_bulge(bulge_svg).abs().to_degrees();
            let large = if angle > 180.0 { 1 } else { 0 };
            let sweep = if bulge_svg >= 0.0 { 1 } else { 0 };
            let r = radius.abs();
            out.push_str(&format!(
                " A {} {} 0 {} {} {} {}",
                fmt_num(r),
                fmt_num(r),
                large,
                sweep,
                fmt_num(ex),
                fmt_num(ey)
            ));
        }
    }

    if pl.is_closed() {
        out.push_str(" Z");
    }
    out
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

fn bounds_for_plines(plines: &[&Polyline<f64>]) -> Option<Bounds> {
    let mut bounds = Bounds {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    for pl in plines {
        let count = pl.vertex_count();
        if count < 2 {
            continue;
        }
        for i in 0..count {
            let next = if i + 1 < count {
                i + 1
            } else if pl.is_closed() {
                0
            } else {
                break;
            };
            let v1 = pl.vertex_data[i];
            let v2 = PlineVertex::new(pl.vertex_data[next].x, pl.vertex_data[next].y, 0.0);
            let aabb = seg_bounding_box(v1, v2);
            bounds.min_x = bounds.min_x.min(aabb.min_x);
            bounds.max_x = bounds.max_x.max(aabb.max_x);
            bounds.min_y = bounds.min_y.min(aabb.min_y);
            bounds.max_y = bounds.max_y.max(aabb.max_y);
        }
    }

    if bounds.min_x.is_finite()
        && bounds.max_x.is_finite()
        && bounds.min_y.is_finite()
        && bounds.max_y.is_finite()
    {
        Some(bounds)
    } else {
        None
    }
}

fn fmt_num(v: f64) -> String {
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let mut buf = ryu::Buffer::new();
    let s = buf.format(v);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}
