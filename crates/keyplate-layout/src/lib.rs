//! Layout parser/normalizer: turns the permissive row-based layout
//! description into per-row key records plus the whole-keyboard
//! configuration, and derives the plate envelope.

pub mod config;

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{error, warn};

pub use config::{
    CaseConfig, CaseType, CornerStyle, Key, KeyboardConfig, LayerOptions, PlateDimensions,
    ReinforcingOffsets, StabFamily, SwitchFamily, UsbCutout,
};

/// Normalized key rows plus the derived plate envelope.
#[derive(Debug, Clone)]
pub struct NormalizedLayout {
    pub rows: Vec<Vec<Key>>,
    pub dims: PlateDimensions,
}

/// Normalize a raw layout: configuration objects merge into the keyboard
/// config (later rows win), array rows become key rows. Unknown enum values
/// are logged and replaced with their documented defaults; nothing here
/// aborts a build.
pub fn normalize(rows: &[Value]) -> (NormalizedLayout, KeyboardConfig) {
    let mut config = KeyboardConfig::default();

    // Configuration rows apply to the whole keyboard regardless of where they
    // appear, so collect them all before walking key rows.
    for row in rows {
        if let Value::Object(props) = row {
            apply_config_row(&mut config, props);
        }
    }

    let mut layout_width = 0.0f64;
    let mut layout_height = 0.0f64;
    let mut key_rows: Vec<Vec<Key>> = Vec::new();
    // A descriptor cell absorbs the bare placeholder that follows it. The
    // flag deliberately survives row boundaries.
    let mut key_described = false;

    for row in rows {
        match row {
            Value::Object(_) => {}
            Value::Array(cells) => {
                let mut row_width = 0.0f64;
                let mut row_height = 0.0f64;
                let mut row_keys: Vec<Key> = Vec::new();

                for cell in cells {
                    if let Value::Object(desc) = cell {
                        let key = parse_key(desc);
                        row_width += key.width;
                        if let Some(x) = key.x {
                            // Offsets count towards total occupied width.
                            row_width += x;
                        }
                        if let Some(y) = key.y {
                            row_height = y;
                        }
                        row_keys.push(key);
                        key_described = true;
                    } else {
                        if !key_described {
                            row_keys.push(Key::default());
                            row_width += 1.0;
                        }
                        key_described = false;
                    }
                }

                key_rows.push(row_keys);
                if row_width > layout_width {
                    layout_width = row_width;
                }
                layout_height += config.key_spacing + row_height * config.key_spacing;
            }
            other => warn!("unknown row type in layout: {other}"),
        }
    }

    if config.name.is_empty() {
        config.name = layout_digest(&key_rows);
    }

    let width = layout_width * config.key_spacing + 2.0 * (config.x_pad + config.x_pcb_pad);
    let height = layout_height + 2.0 * (config.y_pad + config.y_pcb_pad);
    let dims = PlateDimensions {
        width,
        height,
        inside_width: width - config.x_pad * 2.0 - config.kerf * 2.0,
        inside_height: height - config.y_pad * 2.0 - config.kerf * 2.0,
        horizontal_edge: width / 2.0,
        vertical_edge: height / 2.0,
    };

    (NormalizedLayout { rows: key_rows, dims }, config)
}

fn layout_digest(rows: &[Vec<Key>]) -> String {
    let serialized = serde_json::to_string(rows).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn apply_config_row(config: &mut KeyboardConfig, props: &serde_json::Map<String, Value>) {
    if let Some(name) = props.get("name").and_then(Value::as_str) {
        config.name = name.to_string();
    }

    if let Some(case) = props.get("case").and_then(Value::as_object) {
        apply_case(config, case);
    }

    if let Some(corner) = props.get("corner_type").and_then(Value::as_str) {
        match corner {
            "round" => config.corner_style = CornerStyle::Round,
            "bevel" => config.corner_style = CornerStyle::Bevel,
            other => error!(
                "unknown corner_type {other:?}, keeping {:?}",
                config.corner_style
            ),
        }
    }

    if let Some(radius) = number(props.get("corner_radius")) {
        config.corner_radius = radius;
    }

    if let Some(feet) = props.get("feet").and_then(Value::as_array) {
        config.feet = feet.iter().filter_map(pair).collect();
    }

    if let Some(pitch) = number(props.get("foot_pitch")) {
        config.foot_pitch = pitch;
    }

    if let Some(kerf) = number(props.get("kerf")) {
        // Stored halved: cuts are offset on each side of the line.
        config.kerf = kerf / 2.0;
    }

    if let Some(spacing) = number(props.get("key_spacing")) {
        config.key_spacing = spacing;
    }

    if let Some(padding) = props.get("padding").and_then(pair) {
        config.x_pad = padding.0;
        config.y_pad = padding.1;
    }

    if let Some(padding) = props.get("pcb_padding").and_then(pair) {
        config.x_pcb_pad = padding.0 / 2.0;
        config.y_pcb_pad = padding.1 / 2.0;
    }

    if let Some(usb) = props.get("usb").and_then(Value::as_object) {
        let defaults = UsbCutout::default();
        config.usb = UsbCutout {
            inner_width: number(usb.get("inner_width")).unwrap_or(defaults.inner_width),
            outer_width: number(usb.get("outer_width")).unwrap_or(defaults.outer_width),
            height: number(usb.get("height")).unwrap_or(defaults.height),
            offset: number(usb.get("offset")).unwrap_or(defaults.offset),
        };
    }

    if let Some(stab) = props.get("stabilizer").and_then(Value::as_str) {
        match StabFamily::parse(stab) {
            Some(family) => config.stabilizer = family,
            None => {
                error!("unknown stabilizer type {stab:?}, defaulting to \"cherry\"");
                config.stabilizer = StabFamily::Cherry;
            }
        }
    }

    if let Some(switch) = props.get("switch").and_then(Value::as_str) {
        match SwitchFamily::parse(switch) {
            Some(family) => config.switch = family,
            None => {
                error!("unknown switch type {switch:?}, defaulting to \"mx\"");
                config.switch = SwitchFamily::Mx;
            }
        }
    }

    if let Some(layers) = props.get("layers").and_then(Value::as_object) {
        config.layers = layers
            .iter()
            .map(|(name, opts)| (name.clone(), parse_layer_options(opts)))
            .collect();
    }

    if let Some(grow) = number(props.get("grow_x")) {
        config.grow_x = grow / 2.0;
    }

    if let Some(grow) = number(props.get("grow_y")) {
        config.grow_y = grow / 2.0;
    }

    if let Some(reinforcing) = props.get("reinforcing").and_then(Value::as_object) {
        let defaults = ReinforcingOffsets::default();
        config.reinforcing = ReinforcingOffsets {
            grow: number(reinforcing.get("grow")).unwrap_or(defaults.grow),
            stab_top_min: number(reinforcing.get("stab_top_min")).unwrap_or(defaults.stab_top_min),
            stab_bottom_min: number(reinforcing.get("stab_bottom_min"))
                .unwrap_or(defaults.stab_bottom_min),
        };
    }
}

fn apply_case(config: &mut KeyboardConfig, case: &serde_json::Map<String, Value>) {
    let screw_size = number(case.get("screw_size")).unwrap_or(0.0);
    let screw_count = number(case.get("screw_count")).unwrap_or(0.0) as u32;
    let case_type = case.get("type").and_then(Value::as_str).unwrap_or("");

    let mut parsed = CaseConfig {
        screw_size,
        screw_count,
        ..CaseConfig::default()
    };

    match case_type {
        "poker" => {
            parsed.case_type = CaseType::Poker;
            if screw_size <= 0.0 {
                error!("need a screw_size for poker cases");
            }
        }
        "sandwich" => {
            parsed.case_type = CaseType::Sandwich;
            if screw_size <= 0.0 {
                error!("need a screw_size for sandwich cases");
            }
            if screw_count < 4 || screw_count % 2 != 0 {
                error!(
                    "invalid sandwich hole configuration (screw_count: {screw_count}); \
                     need at least 4 holes, divisible by 2. Skipping case holes."
                );
            } else {
                parsed.sandwich_holes = true;
            }
        }
        "reinforcing" => parsed.case_type = CaseType::Reinforcing,
        "" => parsed.case_type = CaseType::None,
        other => {
            error!("unknown case type: {other}");
            parsed.case_type = CaseType::None;
        }
    }

    config.case = parsed;
}

fn parse_layer_options(value: &Value) -> LayerOptions {
    let mut opts = LayerOptions::default();
    let Some(map) = value.as_object() else {
        return opts;
    };

    if let Some(inset) = map.get("inset").and_then(Value::as_bool) {
        opts.inset = inset;
    }
    if let Some(oversize) = number(map.get("oversize")) {
        opts.oversize = oversize;
    }
    if let Some(thickness) = number(map.get("thickness")) {
        opts.thickness = thickness;
    }
    if let Some(holes) = map.get("holes").and_then(Value::as_array) {
        opts.holes = holes.iter().filter_map(triple).collect();
    }
    if let Some(polygons) = map.get("polygons").and_then(Value::as_array) {
        opts.polygons = polygons
            .iter()
            .filter_map(|poly| {
                poly.as_array()
                    .map(|pts| pts.iter().filter_map(pair).collect())
            })
            .collect();
    }
    if let Some(usb) = map.get("include_usb_cutout").and_then(Value::as_bool) {
        opts.include_usb_cutout = usb;
    }
    if let Some(spacing) = number(map.get("key_spacing")) {
        opts.key_spacing = Some(spacing);
    }

    opts
}

fn parse_key(desc: &serde_json::Map<String, Value>) -> Key {
    let mut key = Key {
        width: number(desc.get("w")).unwrap_or(1.0),
        height: number(desc.get("h")).unwrap_or(1.0),
        x: number(desc.get("x")),
        y: number(desc.get("y")),
        ..Key::default()
    };

    if let Some(switch) = desc.get("_t").and_then(Value::as_str) {
        match SwitchFamily::parse(switch) {
            Some(family) => key.switch = Some(family),
            None => error!("unknown switch type {switch:?} on key, using the plate default"),
        }
    }
    if let Some(stab) = desc.get("_s").and_then(Value::as_str) {
        match StabFamily::parse(stab) {
            Some(family) => key.stabilizer = Some(family),
            None => error!("unknown stabilizer type {stab:?} on key, using the plate default"),
        }
    }
    key.kerf = number(desc.get("_k"));
    key.rotate = number(desc.get("_r"));
    key.rotate_stab = number(desc.get("_rs"));
    // A zero offset means "use the spacing table", same as leaving it out.
    key.center_offset = number(desc.get("_co")).filter(|co| *co != 0.0);

    key
}

fn number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

fn pair(value: &Value) -> Option<(f64, f64)> {
    let arr = value.as_array()?;
    match arr.as_slice() {
        [a, b] => Some((a.as_f64()?, b.as_f64()?)),
        _ => None,
    }
}

fn triple(value: &Value) -> Option<(f64, f64, f64)> {
    let arr = value.as_array()?;
    match arr.as_slice() {
        [a, b, c] => Some((a.as_f64()?, b.as_f64()?, c.as_f64()?)),
        _ => None,
    }
}
