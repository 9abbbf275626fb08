use keyplate_layout::{normalize, CaseType, CornerStyle, StabFamily, SwitchFamily};
use serde_json::{json, Value};

fn rows(v: Value) -> Vec<Value> {
    v.as_array().expect("rows array").clone()
}

#[test]
fn bare_placeholders_become_unit_keys() {
    let (layout, _) = normalize(&rows(json!([["a", "b", "c"]])));
    assert_eq!(layout.rows.len(), 1);
    assert_eq!(layout.rows[0].len(), 3);
    for key in &layout.rows[0] {
        assert_eq!(key.width, 1.0);
        assert_eq!(key.height, 1.0);
    }
}

#[test]
fn descriptor_absorbs_the_following_placeholder() {
    let (layout, _) = normalize(&rows(json!([[{"w": 2.25}, "shift", "a"]])));
    // The descriptor and "shift" are one key; "a" is its own.
    assert_eq!(layout.rows[0].len(), 2);
    assert_eq!(layout.rows[0][0].width, 2.25);
    assert_eq!(layout.rows[0][1].width, 1.0);
}

#[test]
fn consecutive_descriptors_each_emit_a_key() {
    let (layout, _) = normalize(&rows(json!([[{"w": 1.5}, {"w": 7.0}, {"w": 1.5}]])));
    assert_eq!(layout.rows[0].len(), 3);
    assert_eq!(layout.rows[0][1].width, 7.0);
}

#[test]
fn descriptor_flag_survives_row_boundaries() {
    // A row ending in a descriptor absorbs a bare placeholder that starts the
    // next row.
    let (layout, _) = normalize(&rows(json!([["a", {"w": 2.0}], ["b", "c"]])));
    assert_eq!(layout.rows[0].len(), 2);
    assert_eq!(layout.rows[1].len(), 1);
}

#[test]
fn row_width_counts_widths_and_offsets() {
    let (layout, config) = normalize(&rows(json!([
        [{"x": 0.5}, "a", "b"],
        ["a", "b", "c", "d"]
    ])));
    // First row: 0.5 + 1 + 1 = 2.5; second row wins with 4.
    assert_eq!(layout.dims.width, 4.0 * config.key_spacing);
}

#[test]
fn last_key_with_y_sets_the_row_height() {
    // The row height offset is whatever the *last* key carrying `y` said,
    // even when an earlier key set a larger one.
    let (layout, config) = normalize(&rows(json!([
        [{"y": 1.0}, "a", {"y": 0.25}, "b"]
    ])));
    let expected = config.key_spacing + 0.25 * config.key_spacing;
    assert!((layout.dims.height - expected).abs() < 1e-9);
}

#[test]
fn dimension_invariants_hold() {
    let (layout, config) = normalize(&rows(json!([
        {"kerf": 0.2, "padding": [7.45, 8.4], "pcb_padding": [5.0, 4.0]},
        ["a", "b", "c"],
        ["a", "b", "c"]
    ])));
    let d = &layout.dims;
    assert_eq!(config.kerf, 0.1);
    assert_eq!(config.x_pcb_pad, 2.5);
    assert_eq!(config.y_pcb_pad, 2.0);
    assert!((d.inside_width - (d.width - 2.0 * config.x_pad - 2.0 * config.kerf)).abs() < 1e-9);
    assert!((d.inside_height - (d.height - 2.0 * config.y_pad - 2.0 * config.kerf)).abs() < 1e-9);
    assert_eq!(d.horizontal_edge, d.width / 2.0);
    assert_eq!(d.vertical_edge, d.height / 2.0);
}

#[test]
fn config_rows_merge_with_later_rows_winning() {
    let (_, config) = normalize(&rows(json!([
        {"kerf": 0.1, "switch": "alps"},
        ["a"],
        {"kerf": 0.3}
    ])));
    assert_eq!(config.kerf, 0.15);
    assert_eq!(config.switch, SwitchFamily::Alps);
}

#[test]
fn unknown_enum_values_fall_back_to_defaults() {
    let (_, config) = normalize(&rows(json!([
        {"switch": "kailh-choc", "stabilizer": "optical", "corner_type": "chamfer",
         "case": {"type": "tray", "screw_size": 2.0}},
        ["a"]
    ])));
    assert_eq!(config.switch, SwitchFamily::Mx);
    assert_eq!(config.stabilizer, StabFamily::Cherry);
    assert_eq!(config.corner_style, CornerStyle::None);
    assert_eq!(config.case.case_type, CaseType::None);
}

#[test]
fn invalid_sandwich_screw_count_disables_the_holes() {
    for count in [2, 7] {
        let (_, config) = normalize(&rows(json!([
            {"case": {"type": "sandwich", "screw_size": 2.0, "screw_count": count}},
            ["a"]
        ])));
        assert_eq!(config.case.case_type, CaseType::Sandwich);
        assert!(!config.case.sandwich_holes);
    }

    let (_, config) = normalize(&rows(json!([
        {"case": {"type": "sandwich", "screw_size": 2.0, "screw_count": 8}},
        ["a"]
    ])));
    assert!(config.case.sandwich_holes);
}

#[test]
fn per_key_overrides_are_parsed() {
    let (layout, _) = normalize(&rows(json!([
        [{"w": 6.0, "_t": "alps", "_s": "costar", "_k": 0.2, "_r": 15.0, "_rs": 90.0, "_co": 9.525}, "space"]
    ])));
    let key = &layout.rows[0][0];
    assert_eq!(key.switch, Some(SwitchFamily::Alps));
    assert_eq!(key.stabilizer, Some(StabFamily::Costar));
    assert_eq!(key.kerf, Some(0.2));
    assert_eq!(key.rotate, Some(15.0));
    assert_eq!(key.rotate_stab, Some(90.0));
    assert_eq!(key.center_offset, Some(9.525));
}

#[test]
fn zero_center_offset_means_use_the_table() {
    let (layout, _) = normalize(&rows(json!([[{"w": 6.0, "_co": 0.0}, "space"]])));
    assert_eq!(layout.rows[0][0].center_offset, None);
}

#[test]
fn missing_name_hashes_the_layout() {
    let (_, a) = normalize(&rows(json!([["a", "b"]])));
    let (_, b) = normalize(&rows(json!([["x", "y"]])));
    let (_, c) = normalize(&rows(json!([["a", "b", "c"]])));
    assert_eq!(a.name.len(), 64);
    // Same normalized layout, same digest; different layout, different digest.
    assert_eq!(a.name, b.name);
    assert_ne!(a.name, c.name);

    let (_, named) = normalize(&rows(json!([{"name": "numpad"}, ["a"]])));
    assert_eq!(named.name, "numpad");
}

#[test]
fn layer_options_are_parsed_per_layer() {
    let (_, config) = normalize(&rows(json!([
        {"layers": {
            "switch": {},
            "top": {"key_spacing": 19.0, "oversize": 2.0},
            "bottom": {"include_usb_cutout": true, "thickness": 3.0,
                        "holes": [[10.0, 10.0, 2.0]],
                        "polygons": [[[0.0, 0.0], [5.0, 0.0], [5.0, 5.0]]]},
            "closed": {"inset": true}
        }},
        ["a"]
    ])));
    assert_eq!(config.layers.len(), 4);
    let top = config.layer_options("top");
    assert_eq!(top.key_spacing, Some(19.0));
    assert_eq!(top.oversize, 2.0);
    let bottom = config.layer_options("bottom");
    assert!(bottom.include_usb_cutout);
    assert_eq!(bottom.thickness, 3.0);
    assert_eq!(bottom.holes, vec![(10.0, 10.0, 2.0)]);
    assert_eq!(bottom.polygons.len(), 1);
    assert!(config.layer_options("closed").inset);
    // Unconfigured layers fall back to defaults.
    assert_eq!(config.layer_options("reinforcing").thickness, 1.5);
}

#[test]
fn vertically_extended_keys_keep_their_height() {
    let (layout, _) = normalize(&rows(json!([[{"h": 2.0}, "plus", "a"]])));
    assert_eq!(layout.rows[0][0].height, 2.0);
    assert_eq!(layout.rows[0][1].height, 1.0);
}
