use approx::assert_abs_diff_eq;
use keyplate_builder::{
    build_bottom_layer, build_closed_layer, build_open_layer, init_plate, layout_sandwich_holes,
};
use keyplate_geometry::{PlineSource, Polyline, Sketch};
use keyplate_layout::normalize;
use serde_json::{json, Value};

fn rows(v: Value) -> Vec<Value> {
    v.as_array().expect("rows array").clone()
}

/// Centers of all circular holes (two-vertex, bulged polylines).
fn circle_centers(sketch: &Sketch) -> Vec<(f64, f64)> {
    sketch
        .region()
        .neg
        .iter()
        .filter(|p| p.vertex_count() == 2)
        .map(circle_center)
        .collect()
}

fn circle_center(p: &Polyline<f64>) -> (f64, f64) {
    let a = p.vertex_data[0];
    let b = p.vertex_data[1];
    ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

fn contains_point(points: &[(f64, f64)], target: (f64, f64)) -> bool {
    points
        .iter()
        .any(|p| (p.0 - target.0).abs() < 1e-6 && (p.1 - target.1).abs() < 1e-6)
}

#[test]
fn sandwich_hole_balancing_matches_the_greedy_simulation() {
    // Wider than tall: the first free hole lands on x, the second on y.
    assert_eq!(layout_sandwich_holes(300.0, 200.0, 0.0, 8), Some((1, 1)));
    assert_eq!(layout_sandwich_holes(300.0, 200.0, 0.0, 12), Some((3, 1)));
    // Square plates split the free holes evenly, ties going to x.
    assert_eq!(layout_sandwich_holes(200.0, 200.0, 0.0, 8), Some((1, 1)));
    assert_eq!(layout_sandwich_holes(200.0, 200.0, 0.0, 10), Some((2, 1)));
    // Only the four corners.
    assert_eq!(layout_sandwich_holes(300.0, 200.0, 0.0, 4), Some((0, 0)));
    // Invalid counts.
    assert_eq!(layout_sandwich_holes(300.0, 200.0, 0.0, 2), None);
    assert_eq!(layout_sandwich_holes(300.0, 200.0, 0.0, 9), None);
}

#[test]
fn sandwich_plate_cuts_exactly_screw_count_holes() {
    let (layout, config) = normalize(&rows(json!([
        {"case": {"type": "sandwich", "screw_size": 2.0, "screw_count": 8},
         "padding": [10.0, 10.0]},
        ["a", "b", "c", "d", "e"],
        ["f", "g", "h", "i", "j"]
    ])));
    let sketch = init_plate(&config, &layout.dims, "switch");
    assert_eq!(circle_centers(&sketch).len(), 8);
}

#[test]
fn invalid_sandwich_count_cuts_no_holes() {
    let (layout, config) = normalize(&rows(json!([
        {"case": {"type": "sandwich", "screw_size": 2.0, "screw_count": 7},
         "padding": [10.0, 10.0]},
        ["a", "b", "c", "d", "e"]
    ])));
    let sketch = init_plate(&config, &layout.dims, "switch");
    assert!(circle_centers(&sketch).is_empty());
}

#[test]
fn poker_holes_sit_at_their_fixed_coordinates() {
    // A plate large enough to contain the absolute poker pattern.
    let mut raw = vec![json!({"case": {"type": "poker", "screw_size": 2.75}, "kerf": 0.1})];
    for _ in 0..5 {
        raw.push(json!(vec!["k"; 16]));
    }
    let (layout, config) = normalize(&raw);
    let sketch = init_plate(&config, &layout.dims, "switch");
    let centers = circle_centers(&sketch);
    assert_eq!(centers.len(), 6);
    for hole in [
        (-139.0, 9.2),
        (-117.3, -19.4),
        (-14.3, 0.0),
        (48.0, 37.9),
        (117.55, -19.4),
        (139.0, 9.2),
    ] {
        assert!(contains_point(&centers, hole), "missing hole at {hole:?}");
    }
    // Plus the two edge slots.
    let slots = sketch
        .region()
        .neg
        .iter()
        .filter(|p| p.vertex_count() == 4)
        .count();
    assert_eq!(slots, 2);
}

#[test]
fn bevel_corners_chamfer_the_plate() {
    let (layout, config) = normalize(&rows(json!([
        {"corner_type": "bevel", "corner_radius": 3.0},
        ["a", "b", "c"]
    ])));
    let sketch = init_plate(&config, &layout.dims, "switch");
    // Each corner triangle replaces a square corner with a chamfer edge.
    assert!(sketch.region().pos[0].vertex_count() > 4);
    assert!(sketch.region().neg.is_empty());
}

#[test]
fn inset_layers_skip_mounting_geometry() {
    let (layout, config) = normalize(&rows(json!([
        {"case": {"type": "sandwich", "screw_size": 2.0, "screw_count": 8},
         "padding": [10.0, 10.0],
         "layers": {"switch": {}, "closed": {"inset": true}}},
        ["a", "b", "c", "d", "e"]
    ])));
    let sketch = init_plate(&config, &layout.dims, "closed");
    assert!(circle_centers(&sketch).is_empty());
    // And the inset plate is sized to the inside cavity.
    let extents = sketch.region().pos[0].extents().expect("extents");
    assert_abs_diff_eq!(extents.max_x - extents.min_x, layout.dims.inside_width, epsilon = 1e-9);
}

#[test]
fn closed_layer_is_a_picture_frame() {
    let (layout, config) = normalize(&rows(json!([
        {"padding": [8.0, 8.0]},
        ["a", "b", "c"],
        ["d", "e", "f"]
    ])));
    let sketch = build_closed_layer(&config, &layout.dims, "closed");
    assert_eq!(sketch.region().pos.len(), 1);
    assert_eq!(sketch.region().neg.len(), 1);
    let cavity = sketch.region().neg[0].extents().expect("extents");
    assert_abs_diff_eq!(
        cavity.max_x - cavity.min_x,
        layout.dims.inside_width,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        cavity.max_y - cavity.min_y,
        layout.dims.inside_height,
        epsilon = 1e-9
    );
}

#[test]
fn closed_layer_draws_one_foot_per_configured_foot() {
    let (layout, config) = normalize(&rows(json!([
        {"padding": [8.0, 8.0], "feet": [[30.0, 40.0], [120.0, 40.0]]},
        ["a", "b", "c", "d", "e", "f", "g", "h"],
        ["a", "b", "c", "d", "e", "f", "g", "h"],
        ["a", "b", "c", "d", "e", "f", "g", "h"],
        ["a", "b", "c", "d", "e", "f", "g", "h"],
        ["a", "b", "c", "d", "e", "f", "g", "h"]
    ])));
    let sketch = build_closed_layer(&config, &layout.dims, "closed");
    // Outer boundary + cavity + two drawn feet.
    let outlines = sketch.outlines().count();
    assert_eq!(outlines, 4);

    // The feet step one pitch apart.
    let drawn: Vec<&Polyline<f64>> = sketch.outlines().skip(2).collect();
    let first = drawn[0].extents().expect("extents");
    let second = drawn[1].extents().expect("extents");
    assert_abs_diff_eq!(second.min_x - first.min_x, config.foot_pitch, epsilon = 1e-9);
    assert_abs_diff_eq!(second.min_y, first.min_y, epsilon = 1e-9);
}

#[test]
fn bottom_layer_cuts_foot_mounting_points() {
    let (layout, config) = normalize(&rows(json!([
        {"padding": [8.0, 8.0], "feet": [[40.0, 30.0]],
         "layers": {"switch": {}, "bottom": {}}},
        ["a", "b", "c", "d", "e", "f"],
        ["a", "b", "c", "d", "e", "f"],
        ["a", "b", "c", "d", "e", "f"],
        ["a", "b", "c", "d", "e", "f"],
        ["a", "b", "c", "d", "e", "f"]
    ])));
    let sketch = build_bottom_layer(&config, &layout.dims);
    // One screw circle plus one square opening per foot.
    let circles = circle_centers(&sketch);
    assert_eq!(circles.len(), 1);
    let expected = (
        -layout.dims.width / 2.0 + 40.0,
        -layout.dims.height / 2.0 + 30.0,
    );
    assert!(contains_point(&circles, expected));

    let squares = sketch
        .region()
        .neg
        .iter()
        .filter(|p| p.vertex_count() == 4)
        .count();
    assert_eq!(squares, 1);
}

#[test]
fn open_layer_adds_the_usb_opening() {
    let (layout, config) = normalize(&rows(json!([
        {"padding": [8.0, 8.0], "kerf": 0.2,
         "usb": {"inner_width": 10, "outer_width": 15, "height": 6, "offset": 0},
         "layers": {"switch": {}, "closed": {}, "open": {"include_usb_cutout": true}}},
        ["a", "b", "c"],
        ["d", "e", "f"]
    ])));
    let closed = build_closed_layer(&config, &layout.dims, "closed");
    let open = build_open_layer(&config, &layout.dims);
    // The open layer has one extra opening: the USB trapezoid bites through
    // the frame's top edge.
    assert_eq!(closed.region().neg.len(), 1);
    let total_open: usize = open.region().neg.len();
    let open_outline_verts = open.region().pos[0].vertex_count();
    let closed_outline_verts = closed.region().pos[0].vertex_count();
    assert!(
        total_open > 1 || open_outline_verts > closed_outline_verts,
        "usb opening missing from the open layer"
    );
}

#[test]
fn bottom_usb_cutout_carries_the_connector_clearance() {
    let (layout, config) = normalize(&rows(json!([
        {"padding": [2.0, 8.0], "pcb_padding": [2.0, 4.0], "kerf": 0.2,
         "layers": {"switch": {}, "bottom": {"include_usb_cutout": true}}},
        ["a", "b", "c"],
        ["d", "e", "f"]
    ])));
    let sketch = build_bottom_layer(&config, &layout.dims);
    // The clearance rectangle reaches below the trapezoid by the connector
    // height; every half-kerf term in its bottom edge cancels, so the depth
    // is exact.
    let clearance_bottom = -layout.dims.height / 2.0 + config.y_pad + config.usb.height;
    let near_usb: Vec<(f64, f64)> = sketch
        .outlines()
        .flat_map(|p| p.vertex_data.iter().map(|v| (v.x, v.y)))
        .filter(|(x, _)| x.abs() <= config.usb.inner_width / 2.0 + 1e-6)
        .collect();
    let deepest = near_usb.iter().map(|(_, y)| *y).fold(f64::MIN, f64::max);
    assert_abs_diff_eq!(deepest, clearance_bottom, epsilon = 1e-9);
}
