use keyplate_geometry::Sketch;
use keyplate_layout::{CaseType, CornerStyle, KeyboardConfig, LayerOptions, PlateDimensions};
use tracing::{debug, error};

use crate::case::{cut_sandwich_holes, cut_usb_hole};

/// Build the base plate with the features common to every layer: sizing
/// (inset/oversize), corner treatment, case mounting geometry, per-layer
/// holes and polygons, and the optional USB opening.
pub fn init_plate(config: &KeyboardConfig, dims: &PlateDimensions, layer: &str) -> Sketch {
    debug!("init_plate(layer={layer:?})");
    let opts = config.layer_options(layer);
    let kerf = config.kerf;

    let (width, height) = if opts.inset {
        (
            dims.inside_width - kerf * 2.0 + opts.oversize,
            dims.inside_height - kerf * 2.0 + opts.oversize,
        )
    } else {
        (
            dims.width + kerf * 2.0 + opts.oversize,
            dims.height + kerf * 2.0 + opts.oversize,
        )
    };

    let mut sketch = Sketch::plate(width, height, opts.thickness);

    if !opts.inset && config.corner_radius > 0.0 {
        match config.corner_style {
            CornerStyle::Round => sketch = sketch.fillet_corners(config.corner_radius),
            CornerStyle::Bevel => sketch = cut_bevel_corners(sketch, config, dims),
            CornerStyle::None => {}
        }
    }

    // Mounting geometry: inset layers and plain/reinforcing-only cases get
    // none.
    if !opts.inset {
        match config.case.case_type {
            CaseType::None | CaseType::Reinforcing => {}
            CaseType::Poker => sketch = cut_poker_holes(sketch, config, dims),
            CaseType::Sandwich => sketch = cut_sandwich_holes(sketch, config, dims),
        }
    }

    if !opts.holes.is_empty() {
        sketch = cut_plate_holes(sketch, config, dims, &opts, layer);
    }
    if !opts.polygons.is_empty() {
        sketch = cut_plate_polygons(sketch, config, dims, &opts, layer);
    }
    if opts.include_usb_cutout {
        sketch = cut_usb_hole(sketch, config, dims, &opts, layer);
    }

    sketch.cut_thru_all()
}

/// Four corner triangles cut across the plate corners.
fn cut_bevel_corners(mut sketch: Sketch, config: &KeyboardConfig, dims: &PlateDimensions) -> Sketch {
    let he = dims.horizontal_edge + config.kerf;
    let ve = dims.vertical_edge + config.kerf;
    let c = config.corner_radius;

    // Lower right corner.
    sketch = sketch.polyline(&[(he, ve - c), (he, ve), (he - c, ve), (he, ve - c)]);
    // Lower left corner.
    sketch = sketch.polyline(&[(-he, ve - c), (-he, ve), (-he + c, ve), (-he, ve - c)]);
    // Upper right corner.
    sketch = sketch.polyline(&[(he, -ve + c), (he, -ve), (he - c, -ve), (he, -ve + c)]);
    // Upper left corner.
    sketch.polyline(&[(-he, -ve + c), (-he, -ve), (-he + c, -ve), (-he, -ve + c)])
}

/// The fixed six-hole poker mounting pattern plus two edge slots. Hole
/// positions are absolute and independent of plate size.
fn cut_poker_holes(mut sketch: Sketch, config: &KeyboardConfig, dims: &PlateDimensions) -> Sketch {
    let kerf = config.kerf;
    if config.case.screw_size <= 0.0 {
        error!("poker case without a usable screw_size, skipping mount holes");
        return sketch;
    }

    let hole_points = [
        (-139.0, 9.2),
        (-117.3, -19.4),
        (-14.3, 0.0),
        (48.0, 37.9),
        (117.55, -19.4),
        (139.0, 9.2),
    ];
    let rect_center = dims.width / 2.0 - 3.5 / 2.0;
    let rect_points = [(rect_center, 9.2), (-rect_center, 9.2)];
    let rect_size = (3.5 - kerf, 5.0 - kerf);

    for (x, y) in hole_points {
        sketch = sketch
            .center(x, y)
            .hole(config.case.screw_size - kerf)
            .center(-x, -y);
    }
    for (x, y) in rect_points {
        sketch = sketch
            .center(x, y)
            .rect(rect_size.0, rect_size.1)
            .center(-x, -y);
    }
    sketch
}

/// Cut this layer's extra holes, positioned from the kerf-adjusted top-left
/// datum.
fn cut_plate_holes(
    mut sketch: Sketch,
    config: &KeyboardConfig,
    dims: &PlateDimensions,
    opts: &LayerOptions,
    layer: &str,
) -> Sketch {
    debug!("cut_plate_holes(layer={layer:?})");
    let kerf = config.kerf;
    sketch = sketch.center(-dims.width / 2.0 + kerf, -dims.height / 2.0 + kerf);

    for &(x, y, radius) in &opts.holes {
        debug!("cutting {} wide hole at {x},{y}", radius * 2.0);
        sketch = sketch.center(x, y).circle(radius - kerf).center(-x, -y);
    }

    sketch = sketch.center(dims.width / 2.0 - kerf, dims.height / 2.0 - kerf);
    sketch.cut_thru_all()
}

/// Cut this layer's extra polygons, positioned from the kerf-adjusted
/// top-left datum.
fn cut_plate_polygons(
    mut sketch: Sketch,
    config: &KeyboardConfig,
    dims: &PlateDimensions,
    opts: &LayerOptions,
    layer: &str,
) -> Sketch {
    debug!("cut_plate_polygons(layer={layer:?})");
    let kerf = config.kerf;
    sketch = sketch.center(-dims.width / 2.0 + kerf, -dims.height / 2.0 + kerf);

    for polygon in &opts.polygons {
        sketch = sketch.polyline(polygon);
    }

    sketch = sketch.cut_thru_all();
    sketch.center(dims.width / 2.0 - kerf, dims.height / 2.0 - kerf)
}
