use keyplate_core::Point;
use keyplate_cutouts::{cut_switch, SwitchCut};
use keyplate_geometry::Sketch;
use keyplate_layout::{KeyboardConfig, NormalizedLayout};
use tracing::debug;

use crate::cursor::Cursor;
use crate::plate::init_plate;

/// A finished switch-bearing layer plus the key placements it cut.
#[derive(Debug)]
pub struct BuiltLayer {
    pub sketch: Sketch,
    /// Absolute key centers relative to the plate center, with each key's
    /// cutout rotation.
    pub placements: Vec<Point>,
    /// Final cursor state; `origin` is zero again after the closing recenter.
    pub cursor: Cursor,
}

/// Build one of the switch-based layers (`switch`, `reinforcing`, `top`):
/// walk the layout row by row, stepping the cursor key to key, and cut one
/// switch opening per key.
pub fn build_switch_layer(
    config: &KeyboardConfig,
    layout: &NormalizedLayout,
    layer: &str,
) -> BuiltLayer {
    debug!("build_switch_layer(layer={layer:?})");
    let dims = &layout.dims;
    let spacing = config.key_spacing;

    let mut sketch = init_plate(config, dims, layer);
    let mut cursor = Cursor::default();
    let mut placements = Vec::new();

    // Move to the top left of the plate.
    sketch = cursor.center(sketch, -dims.width / 2.0, -dims.height / 2.0);

    let mut prev_width = 0.0f64;
    let mut prev_y_off = 0.0f64;

    for (r, row) in layout.rows.iter().enumerate() {
        for (k, key) in row.iter().enumerate() {
            let mut x = 0.0f64;
            let mut y = 0.0f64;
            let mut kx = 0.0f64;

            if let Some(offset) = key.x {
                x = offset * spacing;
                kx = x;
            }
            if k == 0 {
                if let Some(offset) = key.y {
                    y = offset * spacing;
                }
            }

            if r == 0 && k == 0 {
                // Place the first key of the first row: half a key and half a
                // unit in from the block corner, plus the padding.
                sketch = cursor.center(sketch, key.width * spacing / 2.0, spacing / 2.0);
                x += config.x_pad + config.x_pcb_pad;
                y += config.y_pad + config.y_pcb_pad;
                // Seed x_off negative: cutting appends x, and the initial
                // placement must not count toward the row's running width.
                cursor.x_off = -(x - (spacing / 2.0 + key.width * spacing / 2.0) - kx);
            } else if k == 0 {
                // Row wrap: one unit down, back to column zero.
                sketch = cursor.center(sketch, -cursor.x_off, spacing);
                cursor.x_off = 0.0;
                x += spacing / 2.0 + key.width * spacing / 2.0;
            } else {
                x += prev_width * spacing / 2.0 + key.width * spacing / 2.0;
            }

            // Undo the previous key's vertical-span offset, then apply this
            // key's own.
            if prev_y_off != 0.0 {
                y -= prev_y_off;
                prev_y_off = 0.0;
            }
            if key.height > 1.0 {
                prev_y_off = key.height * spacing / 2.0 - spacing / 2.0;
                y += prev_y_off;
            }

            sketch = cursor.center(sketch, x, y);
            placements.push(Point::new(
                cursor.origin.0,
                cursor.origin.1,
                key.rotate.unwrap_or(0.0),
            ));

            let cut = SwitchCut::resolve(key, config);
            sketch = cut_switch(sketch, &cut, config, layer);
            cursor.x_off += x;
            prev_width = key.width;
        }
    }

    sketch = cursor.recenter(sketch);
    let sketch = sketch.cut_thru_all();

    BuiltLayer {
        sketch,
        placements,
        cursor,
    }
}
