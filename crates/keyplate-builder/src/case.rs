use keyplate_geometry::Sketch;
use keyplate_layout::{KeyboardConfig, LayerOptions, PlateDimensions};
use tracing::{debug, error};

use crate::cursor::Cursor;
use crate::plate::init_plate;

/// Bottom case panel: base plate plus foot mounting points.
pub fn build_bottom_layer(config: &KeyboardConfig, dims: &PlateDimensions) -> Sketch {
    debug!("build_bottom_layer()");
    let sketch = init_plate(config, dims, "bottom");
    cut_feet_holes(sketch, config, dims)
}

/// Closed (middle) case panel: a picture-frame profile, with one foot
/// profile per configured foot drawn into the unused center area.
pub fn build_closed_layer(config: &KeyboardConfig, dims: &PlateDimensions, layer: &str) -> Sketch {
    debug!("build_closed_layer(layer={layer:?})");
    let mut sketch = init_plate(config, dims, layer);

    let outline = [
        (dims.inside_width / 2.0, dims.inside_height / 2.0),
        (-dims.inside_width / 2.0, dims.inside_height / 2.0),
        (-dims.inside_width / 2.0, -dims.inside_height / 2.0),
        (dims.inside_width / 2.0, -dims.inside_height / 2.0),
        (dims.inside_width / 2.0, dims.inside_height / 2.0),
    ];
    let left_edge = -((dims.inside_width + config.kerf * 2.0) / 2.0) + 5.0;
    let top_edge = -((dims.inside_height + config.kerf * 2.0) / 2.0) + 5.0;

    // Cut the internal outline.
    sketch = sketch.polyline(&outline);

    // Stash the feet in the frame's waste area, one per configured foot.
    sketch = sketch.center(left_edge, top_edge);
    let mut distance_moved = 0.0;
    let foot = foot_points(config.kerf);
    for _ in &config.feet {
        sketch = sketch.draw_polyline(&foot).center(config.foot_pitch, 0.0);
        distance_moved += config.foot_pitch;
    }
    sketch = sketch.center(-left_edge - distance_moved, -top_edge);

    sketch.cut_thru_all()
}

/// Open case panel: the closed frame with its USB opening (cut by
/// `init_plate` when the layer requests it).
pub fn build_open_layer(config: &KeyboardConfig, dims: &PlateDimensions) -> Sketch {
    debug!("build_open_layer()");
    build_closed_layer(config, dims, "open")
}

/// Foot profile drawn in the closed/open layers, sized for a 10mm M4
/// flat-head machine screw.
fn foot_points(kerf: f64) -> Vec<(f64, f64)> {
    vec![
        (3.0 - kerf, 0.0 - kerf),   // upper left corner
        (9.0 + kerf, 0.0 - kerf),   // upper right corner start
        (14.0 + kerf, 4.0 - kerf),  // upper right corner end
        (5.0 + kerf, 91.0 + kerf),  // lower right corner
        (3.0 - kerf, 91.0 + kerf),  // lower left corner
        (3.0 - kerf, 71.0 + kerf),  // lower right of key
        (0.0 - kerf, 71.0 + kerf),  // lower left of key
        (0.0 - kerf, 62.0 - kerf),  // top of the key for the bottom plate
        (3.0 - kerf, 62.0 - kerf),  // inside corner of the key
        (3.0 - kerf, 7.5 - kerf),   // start of the nut cutout
        (5.0 + kerf, 7.5 - kerf),
        (5.0 + kerf, 9.1 - kerf),   // bottom edge of the nut cutout
        (7.2 - kerf, 9.1 - kerf),
        (7.2 - kerf, 7.5 - kerf),   // bottom-right edge of the screw cutout
        (9.2 - kerf, 7.5 - kerf),
        (9.2 - kerf, 4.5 + kerf),   // top-right edge of the screw cutout
        (7.2 - kerf, 4.5 + kerf),
        (7.2 - kerf, 2.9 + kerf),   // top edge of the nut cutout
        (5.0 + kerf, 2.9 + kerf),
        (5.0 + kerf, 4.5 + kerf),   // end of the screw cutout
        (3.0 - kerf, 4.5 + kerf),
        (3.0 - kerf, 0.0 - kerf),   // upper left corner
    ]
}

/// Cut the mounting points for the feet: a screw hole at each configured
/// anchor plus a square opening 60mm below it.
fn cut_feet_holes(mut sketch: Sketch, config: &KeyboardConfig, dims: &PlateDimensions) -> Sketch {
    debug!("cut_feet_holes()");
    let half = (config.foot_hole_square - config.kerf) / 2.0;
    let square = [
        (half, half),
        (half, -half),
        (-half, -half),
        (-half, half),
        (half, half),
    ];

    for &(x, y) in &config.feet {
        let mut cursor = Cursor::default();
        // Anchors are measured from the top left of the plate.
        sketch = cursor.center(sketch, -dims.width / 2.0, -dims.height / 2.0);
        sketch = cursor.center(sketch, x, y);
        sketch = sketch.circle((config.foot_hole_diameter - config.kerf) / 2.0);
        sketch = sketch.center(0.0, 60.0).polyline(&square).center(0.0, -60.0);
        sketch = cursor.recenter(sketch);
    }

    sketch.cut_thru_all()
}

/// Cut the USB opening: a trapezoid from the case edge down to the PCB
/// opening; the bottom layer adds a clearance rectangle for the connector.
pub(crate) fn cut_usb_hole(
    sketch: Sketch,
    config: &KeyboardConfig,
    dims: &PlateDimensions,
    opts: &LayerOptions,
    layer: &str,
) -> Sketch {
    debug!("cut_usb_hole(layer={layer:?})");
    let kerf = config.kerf;
    let usb = &config.usb;

    let outer_y = -(config.y_pad + config.y_pcb_pad + kerf * 2.0) / 2.0 - opts.oversize / 2.0;
    let inner_y = (config.y_pad - config.y_pcb_pad) / 2.0;
    let trapezoid = [
        (-(usb.outer_width - kerf) / 2.0 + usb.offset, outer_y),
        ((usb.outer_width - kerf) / 2.0 + usb.offset, outer_y),
        ((usb.inner_width - kerf) / 2.0 + usb.offset, inner_y),
        (-(usb.inner_width - kerf) / 2.0 + usb.offset, inner_y),
        (-(usb.outer_width - kerf) / 2.0 + usb.offset, outer_y),
    ];

    let y_distance = -dims.height / 2.0 + (config.y_pad + config.y_pcb_pad) / 2.0 - kerf * 2.0;
    let mut sketch = sketch.center(0.0, y_distance).polyline(&trapezoid);

    if layer == "bottom" {
        let clearance_y = inner_y + (usb.height - kerf) + kerf * 3.0;
        let clearance = [
            ((usb.inner_width - kerf) / 2.0 + usb.offset, inner_y),
            (-(usb.inner_width - kerf) / 2.0 + usb.offset, inner_y),
            (-(usb.inner_width - kerf) / 2.0 + usb.offset, clearance_y),
            ((usb.inner_width - kerf) / 2.0 + usb.offset, clearance_y),
            ((usb.inner_width - kerf) / 2.0 + usb.offset, inner_y),
        ];
        sketch = sketch.polyline(&clearance);
    }

    sketch.center(0.0, -y_distance).cut_thru_all()
}

/// Distribute sandwich screw holes: four corners are fixed, the remaining
/// free holes go one at a time to whichever axis currently has the larger
/// hole-to-hole gap (ties go to the x axis). Returns the per-axis counts, or
/// `None` when the screw count is unusable.
pub fn layout_sandwich_holes(
    width: f64,
    height: f64,
    kerf: f64,
    screw_count: u32,
) -> Option<(u32, u32)> {
    debug!("layout_sandwich_holes()");
    if screw_count < 4 || screw_count % 2 != 0 {
        error!("invalid hole configuration; need at least 4 holes, divisible by 2");
        return None;
    }

    let x = width + kerf * 2.0;
    let y = height + kerf * 2.0;
    let mut x_holes = 0u32;
    let mut y_holes = 0u32;
    let free = (screw_count - 4) / 2;

    for _ in 0..free {
        let x_gap = x / (x_holes as f64 + 1.0);
        let y_gap = y / (y_holes as f64 + 1.0);
        if x_gap == y_gap {
            // Equal gaps: grow the longer side.
            if x >= y {
                x_holes += 1;
            } else {
                y_holes += 1;
            }
        } else if x_gap > y_gap {
            x_holes += 1;
        } else {
            y_holes += 1;
        }
    }

    Some((x_holes, y_holes))
}

/// Cut the sandwich mounting ring: a closed walk along the plate edges,
/// cutting one screw hole per step.
pub(crate) fn cut_sandwich_holes(
    mut sketch: Sketch,
    config: &KeyboardConfig,
    dims: &PlateDimensions,
) -> Sketch {
    let kerf = config.kerf;
    let screw_size = config.case.screw_size;

    if !config.case.sandwich_holes {
        error!("sandwich case without a usable screw layout, skipping mount holes");
        return sketch;
    }
    let Some((x_holes, y_holes)) =
        layout_sandwich_holes(dims.width, dims.height, kerf, config.case.screw_count)
    else {
        return sketch;
    };

    let radius = screw_size - kerf;
    let x_gap = (dims.width - 4.0 * screw_size + 1.0) / (x_holes as f64 + 1.0);
    let y_gap = (dims.height - 4.0 * screw_size + 1.0) / (y_holes as f64 + 1.0);
    let hole_distance = screw_size * 2.0 - 0.5 - kerf;

    sketch = sketch.center(-dims.width / 2.0 + kerf, -dims.height / 2.0 + kerf);
    sketch = sketch.center(hole_distance, hole_distance);
    for _ in 0..=x_holes {
        sketch = sketch.center(x_gap, 0.0).circle(radius);
    }
    for _ in 0..=y_holes {
        sketch = sketch.center(0.0, y_gap).circle(radius);
    }
    for _ in 0..=x_holes {
        sketch = sketch.center(-x_gap, 0.0).circle(radius);
    }
    for _ in 0..=y_holes {
        sketch = sketch.center(0.0, -y_gap).circle(radius);
    }
    sketch = sketch.center(-hole_distance, -hole_distance);
    sketch.center(dims.width / 2.0 - kerf, dims.height / 2.0 - kerf)
}
