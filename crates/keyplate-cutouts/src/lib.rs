//! Parametric cutout library: switch-body openings per switch family and
//! stabilizer openings per stabilizer family and key-size tier.

pub mod dims;
pub mod stabilizer;
pub mod switch;

use keyplate_core::rotate_points;
use keyplate_geometry::Sketch;
use keyplate_layout::{Key, KeyboardConfig, StabFamily, SwitchFamily};
use tracing::error;

pub use dims::CutoutDims;

/// A key's effective cutout parameters, with per-key overrides resolved
/// against the plate defaults.
#[derive(Debug, Clone, Copy)]
pub struct SwitchCut {
    pub width: f64,
    pub height: f64,
    pub switch: SwitchFamily,
    pub stabilizer: StabFamily,
    pub half_kerf: f64,
    pub rotate_switch: Option<f64>,
    pub rotate_stab: Option<f64>,
    pub center_offset: Option<f64>,
}

impl SwitchCut {
    pub fn resolve(key: &Key, config: &KeyboardConfig) -> Self {
        Self {
            width: key.width,
            height: key.height,
            switch: key.switch.unwrap_or(config.switch),
            stabilizer: key.stabilizer.unwrap_or(config.stabilizer),
            half_kerf: key.kerf.map(|k| k / 2.0).unwrap_or(config.kerf),
            rotate_switch: key.rotate,
            rotate_stab: key.rotate_stab,
            center_offset: key.center_offset,
        }
    }
}

/// Cut one switch opening (and its stabilizer, where the key is wide enough)
/// at the sketch's current cursor position.
///
/// Keys taller than wide are cut from the wide template rotated 90°; any
/// caller-supplied rotation is applied on top. On the `top` layer only the
/// keycap opening is cut and stabilizer logic is never reached.
pub fn cut_switch(sketch: Sketch, cut: &SwitchCut, config: &KeyboardConfig, layer: &str) -> Sketch {
    let rotate = cut.height > cut.width;

    let mut switch = cut.switch;
    let mut dims = dims::CutoutDims::new(cut.half_kerf, cut.width);

    if layer == "top" {
        // Openings the size of keycaps instead of switch bodies.
        let spacing = config
            .layer_options(layer)
            .key_spacing
            .unwrap_or(config.key_spacing);
        let units = if cut.height > 1.0 { cut.height } else { cut.width };
        switch = SwitchFamily::Mx;
        dims = dims.keycap(spacing, units);
    } else if layer == "reinforcing" {
        dims = dims.reinforced(&config.reinforcing);
    }

    // Resolve stabilizer spacing first; some sizes cut the switch hole
    // off-center from the stabilizer geometry.
    let length = if rotate { cut.height } else { cut.width };
    let mut spread_x = 0.0;
    let mut center_offset = 0.0;
    if length >= 2.0 {
        let (half_distance, table_offset) = stabilizer::spacing(length);
        spread_x = half_distance;
        center_offset = cut.center_offset.unwrap_or(table_offset);
    }

    let mut sketch = sketch;
    if center_offset > 0.0 {
        sketch = sketch.center(center_offset, 0.0);
    }

    let body = switch::points(switch, &dims, config.grow_x, config.grow_y);
    sketch = cut_profiles(sketch, vec![body], rotate, cut.rotate_switch);

    if center_offset > 0.0 {
        // Back to the true center for the stabilizer.
        sketch = sketch.center(-center_offset, 0.0);
    }

    if layer == "top" {
        // Stabilizers are never cut on the top layer.
        return sketch;
    }

    if (cut.width >= 2.0 && cut.width < 3.0) || (rotate && cut.height >= 2.0 && cut.height < 3.0) {
        let profiles = match cut.stabilizer {
            StabFamily::CherryCostar => vec![stabilizer::wire2u_cherry_costar(&dims)],
            StabFamily::Cherry => vec![stabilizer::wire2u_cherry(&dims)],
            StabFamily::Costar => {
                let (left, right) = stabilizer::slots2u_costar(&dims);
                vec![left, right]
            }
            StabFamily::Alps | StabFamily::Matias => {
                let (left, right) = stabilizer::slots2u_alps(&dims);
                vec![left, right]
            }
        };
        sketch = cut_profiles(sketch, profiles, rotate, cut.rotate_stab);
    } else if cut.width >= 3.0 || (rotate && cut.height >= 3.0) {
        let profiles = match cut.stabilizer {
            StabFamily::CherryCostar => vec![stabilizer::spread_cherry_costar(&dims, spread_x)],
            StabFamily::Cherry => vec![stabilizer::spread_cherry(&dims, spread_x)],
            StabFamily::Costar | StabFamily::Matias => {
                let (left, right) = stabilizer::spread_slots_costar(&dims, spread_x);
                vec![left, right]
            }
            StabFamily::Alps => match stabilizer::spread_slots_alps(&dims, cut.width) {
                Some((left, right)) => vec![left, right],
                None => {
                    error!(
                        "no known alps stabilizer spacing for {}u keys, skipping stabilizer cut",
                        cut.width
                    );
                    Vec::new()
                }
            },
        };
        if !profiles.is_empty() {
            sketch = cut_profiles(sketch, profiles, rotate, cut.rotate_stab);
        }
    }

    sketch
}

fn cut_profiles(
    mut sketch: Sketch,
    profiles: Vec<Vec<(f64, f64)>>,
    rotate: bool,
    extra_rotation: Option<f64>,
) -> Sketch {
    for mut profile in profiles {
        if rotate {
            profile = rotate_points(&profile, 90.0, (0.0, 0.0));
        }
        if let Some(angle) = extra_rotation {
            profile = rotate_points(&profile, angle, (0.0, 0.0));
        }
        sketch = sketch.polyline(&profile);
    }
    sketch.cut_thru_all()
}
