use crate::dims::CutoutDims;

/// Stabilizer spacing per key size: (half-distance between stab centers,
/// switch-center offset from the stabilizer center).
const STABILIZERS: &[(f64, f64, f64)] = &[
    (2.0, 11.95, 0.0),
    (3.0, 19.05, 0.0),
    (4.0, 28.575, 0.0),
    (4.5, 34.671, 0.0),
    (5.5, 42.8625, 0.0),
    (6.0, 47.625, 9.525),
    (6.25, 50.0, 0.0),
    (6.5, 52.38, 0.0),
    (7.0, 57.15, 0.0),
    (8.0, 66.675, 0.0),
    (9.0, 66.675, 0.0),
    (10.0, 66.675, 0.0),
];

/// Spacing entry for a key of `units` width. Unknown sizes fall back to the
/// 2u spacing with no offset.
pub fn spacing(units: f64) -> (f64, f64) {
    STABILIZERS
        .iter()
        .find(|(size, _, _)| *size == units)
        .map(|&(_, half_distance, offset)| (half_distance, offset))
        .unwrap_or((STABILIZERS[0].1, 0.0))
}

/// Cherry wire stabilizer fused with costar slots, 2u tier. The outline also
/// includes the switch opening itself so the combined shape cuts as one.
pub fn wire2u_cherry_costar(d: &CutoutDims) -> Vec<(f64, f64)> {
    vec![
        (d.mx_half_width, -d.mx_half_height),
        (d.mx_half_width, -d.stab2_top_inner_y),
        (d.stab2_inside_x, -d.stab2_top_inner_y),
        (d.stab2_inside_x, -d.stab_top_y),
        (d.costar_inside_x, -d.stab_top_y),
        (d.costar_inside_x, -d.costar_top_y),
        (d.costar_outside_x, -d.costar_top_y),
        (d.costar_outside_x, -d.stab_top_y),
        (d.stab2_outside_x, -d.stab_top_y),
        (d.stab2_outside_x, -d.wire_top_y),
        (d.stab2_wing_outside_x, -d.wire_top_y),
        (d.stab2_wing_outside_x, d.wing_bottom_y),
        (d.stab2_outside_x, d.wing_bottom_y),
        (d.stab2_outside_x, d.stab_bottom_y),
        (d.costar_outside_x, d.stab_bottom_y),
        (d.costar_outside_x, d.costar_bottom_y),
        (d.costar_inside_x, d.costar_bottom_y),
        (d.costar_inside_x, d.stab_bottom_y),
        (d.stab2_inside_x, d.stab_bottom_y),
        (d.stab2_inside_x, d.stab2_bottom_center_y),
        (d.mx_half_width, d.stab2_bottom_center_y),
        (d.mx_half_width, d.mx_half_height),
        (-d.mx_half_width, d.mx_half_height),
        (-d.mx_half_width, d.stab2_bottom_center_y),
        (-d.stab2_inside_x, d.stab2_bottom_center_y),
        (-d.stab2_inside_x, d.stab_bottom_y),
        (-d.costar_inside_x, d.stab_bottom_y),
        (-d.costar_inside_x, d.costar_bottom_y),
        (-d.costar_outside_x, d.costar_bottom_y),
        (-d.costar_outside_x, d.stab_bottom_y),
        (-d.stab2_outside_x, d.stab_bottom_y),
        (-d.stab2_outside_x, d.wing_bottom_y),
        (-d.stab2_wing_outside_x, d.wing_bottom_y),
        (-d.stab2_wing_outside_x, -d.wire_top_y),
        (-d.stab2_outside_x, -d.wire_top_y),
        (-d.stab2_outside_x, -d.stab_top_y),
        (-d.costar_outside_x, -d.stab_top_y),
        (-d.costar_outside_x, -d.costar_top_y),
        (-d.costar_inside_x, -d.costar_top_y),
        (-d.costar_inside_x, -d.stab_top_y),
        (-d.stab2_inside_x, -d.stab_top_y),
        (-d.stab2_inside_x, -d.stab2_top_inner_y),
        (-d.mx_half_width, -d.stab2_top_inner_y),
        (-d.mx_half_width, -d.mx_half_height),
        (d.mx_half_width, -d.mx_half_height),
    ]
}

/// Cherry wire stabilizer, 2u tier, bundled tight against the switch opening.
pub fn wire2u_cherry(d: &CutoutDims) -> Vec<(f64, f64)> {
    vec![
        (d.stab2_inside_x, -d.stab2_top_inner_y),
        (d.stab2_inside_x, -d.stab_top_y),
        (d.stab2_outside_x, -d.stab_top_y),
        (d.stab2_outside_x, -d.wire_top_y),
        (d.stab2_wing_outside_x, -d.wire_top_y),
        (d.stab2_wing_outside_x, d.wing_bottom_y),
        (d.stab2_outside_x, d.wing_bottom_y),
        (d.stab2_outside_x, d.stab_bottom_y),
        (d.costar_outside_x, d.stab_bottom_y),
        (d.costar_outside_x, d.bottom_wing_bottom_y),
        (d.costar_inside_x, d.bottom_wing_bottom_y),
        (d.costar_inside_x, d.stab_bottom_y),
        (d.stab2_inside_x, d.stab_bottom_y),
        (d.stab2_inside_x, d.stab2_bottom_center_y),
        (-d.stab2_inside_x, d.stab2_bottom_center_y),
        (-d.stab2_inside_x, d.stab_bottom_y),
        (-d.costar_inside_x, d.stab_bottom_y),
        (-d.costar_inside_x, d.bottom_wing_bottom_y),
        (-d.costar_outside_x, d.bottom_wing_bottom_y),
        (-d.costar_outside_x, d.stab_bottom_y),
        (-d.stab2_outside_x, d.stab_bottom_y),
        (-d.stab2_outside_x, d.wing_bottom_y),
        (-d.stab2_wing_outside_x, d.wing_bottom_y),
        (-d.stab2_wing_outside_x, -d.wire_top_y),
        (-d.stab2_outside_x, -d.wire_top_y),
        (-d.stab2_outside_x, -d.stab_top_y),
        (-d.stab2_inside_x, -d.stab_top_y),
        (-d.stab2_inside_x, -d.stab2_top_inner_y),
        (d.stab2_inside_x, -d.stab2_top_inner_y),
    ]
}

/// Costar 2u tier: two independent rectangular slots.
pub fn slots2u_costar(d: &CutoutDims) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let left = vec![
        (-d.costar_inside_x, -d.costar_top_y),
        (-d.costar_outside_x, -d.costar_top_y),
        (-d.costar_outside_x, d.costar_bottom_y),
        (-d.costar_inside_x, d.costar_bottom_y),
        (-d.costar_inside_x, -d.costar_top_y),
    ];
    let right = vec![
        (d.costar_inside_x, -d.costar_top_y),
        (d.costar_outside_x, -d.costar_top_y),
        (d.costar_outside_x, d.costar_bottom_y),
        (d.costar_inside_x, d.costar_bottom_y),
        (d.costar_inside_x, -d.costar_top_y),
    ];
    (left, right)
}

/// Alps/matias 2u tier: two rectangular slots below the switch axis.
pub fn slots2u_alps(d: &CutoutDims) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    slots_at(
        d.alps_stab_inside_x,
        d.alps_stab_outside_x,
        d.alps_stab_top_y,
        d.alps_stab_bottom_y,
    )
}

/// Cherry wire stabilizer fused with costar slots, spread tier: both wings
/// mirrored left/right of the switch center at half-distance `x`.
pub fn spread_cherry_costar(d: &CutoutDims, x: f64) -> Vec<(f64, f64)> {
    vec![
        (x - d.stab_half_width, -d.wire_top_y),
        (x - d.stab_half_width, -d.stab_top_y),
        (x - d.bottom_wing_half_width, -d.stab_top_y),
        (x - d.bottom_wing_half_width, -d.costar_top_y),
        (x + d.bottom_wing_half_width, -d.costar_top_y),
        (x + d.bottom_wing_half_width, -d.stab_top_y),
        (x + d.stab_half_width, -d.stab_top_y),
        (x + d.stab_half_width, -d.wire_top_y),
        (x + d.stab_outside_dx, -d.wire_top_y),
        (x + d.stab_outside_dx, d.wing_bottom_y),
        (x + d.stab_half_width, d.wing_bottom_y),
        (x + d.stab_half_width, d.stab_bottom_y),
        (x + d.bottom_wing_half_width, d.stab_bottom_y),
        (x + d.bottom_wing_half_width, d.costar_bottom_y),
        (x - d.bottom_wing_half_width, d.costar_bottom_y),
        (x - d.bottom_wing_half_width, d.stab_bottom_y),
        (x - d.stab_half_width, d.stab_bottom_y),
        (x - d.stab_half_width, d.wire_top_y),
        (-x + d.stab_half_width, d.wire_top_y),
        (-x + d.stab_half_width, d.stab_bottom_y),
        (-x + d.bottom_wing_half_width, d.stab_bottom_y),
        (-x + d.bottom_wing_half_width, d.costar_bottom_y),
        (-x - d.bottom_wing_half_width, d.costar_bottom_y),
        (-x - d.bottom_wing_half_width, d.stab_bottom_y),
        (-x - d.stab_half_width, d.stab_bottom_y),
        (-x - d.stab_half_width, d.wing_bottom_y),
        (-x - d.stab_outside_dx, d.wing_bottom_y),
        (-x - d.stab_outside_dx, -d.wire_top_y),
        (-x - d.stab_half_width, -d.wire_top_y),
        (-x - d.stab_half_width, -d.stab_top_y),
        (-x - d.bottom_wing_half_width, -d.stab_top_y),
        (-x - d.bottom_wing_half_width, -d.costar_top_y),
        (-x + d.bottom_wing_half_width, -d.costar_top_y),
        (-x + d.bottom_wing_half_width, -d.stab_top_y),
        (-x + d.stab_half_width, -d.stab_top_y),
        (-x + d.stab_half_width, -d.wire_top_y),
        (x - d.stab_half_width, -d.wire_top_y),
    ]
}

/// Cherry wire stabilizer, spread tier.
pub fn spread_cherry(d: &CutoutDims, x: f64) -> Vec<(f64, f64)> {
    vec![
        (x - d.stab_half_width, -d.wire_top_y),
        (x - d.stab_half_width, -d.stab_top_y),
        (x + d.stab_half_width, -d.stab_top_y),
        (x + d.stab_half_width, -d.wire_top_y),
        (x + d.stab_outside_dx, -d.wire_top_y),
        (x + d.stab_outside_dx, d.wing_bottom_y),
        (x + d.stab_half_width, d.wing_bottom_y),
        (x + d.stab_half_width, d.stab_bottom_y),
        (x + d.bottom_wing_half_width, d.stab_bottom_y),
        (x + d.bottom_wing_half_width, d.bottom_wing_bottom_y),
        (x - d.bottom_wing_half_width, d.bottom_wing_bottom_y),
        (x - d.bottom_wing_half_width, d.stab_bottom_y),
        (x - d.stab_half_width, d.stab_bottom_y),
        (x - d.stab_half_width, d.wire_bottom_y),
        (-x + d.stab_half_width, d.wire_bottom_y),
        (-x + d.stab_half_width, d.stab_bottom_y),
        (-x + d.bottom_wing_half_width, d.stab_bottom_y),
        (-x + d.bottom_wing_half_width, d.bottom_wing_bottom_y),
        (-x - d.bottom_wing_half_width, d.bottom_wing_bottom_y),
        (-x - d.bottom_wing_half_width, d.stab_bottom_y),
        (-x - d.stab_half_width, d.stab_bottom_y),
        (-x - d.stab_half_width, d.wing_bottom_y),
        (-x - d.stab_outside_dx, d.wing_bottom_y),
        (-x - d.stab_outside_dx, -d.wire_top_y),
        (-x - d.stab_half_width, -d.wire_top_y),
        (-x - d.stab_half_width, -d.stab_top_y),
        (-x + d.stab_half_width, -d.stab_top_y),
        (-x + d.stab_half_width, -d.wire_top_y),
        (x - d.stab_half_width, -d.wire_top_y),
    ]
}

/// Costar/matias spread tier: two slots at the stabilizer centers.
pub fn spread_slots_costar(d: &CutoutDims, x: f64) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let left = vec![
        (-x + d.bottom_wing_half_width, -d.costar_top_y),
        (-x - d.bottom_wing_half_width, -d.costar_top_y),
        (-x - d.bottom_wing_half_width, d.costar_bottom_y),
        (-x + d.bottom_wing_half_width, d.costar_bottom_y),
        (-x + d.bottom_wing_half_width, -d.costar_top_y),
    ];
    let right = vec![
        (x - d.bottom_wing_half_width, -d.costar_top_y),
        (x + d.bottom_wing_half_width, -d.costar_top_y),
        (x + d.bottom_wing_half_width, d.costar_bottom_y),
        (x - d.bottom_wing_half_width, d.costar_bottom_y),
        (x - d.bottom_wing_half_width, -d.costar_top_y),
    ];
    (left, right)
}

/// Alps spread tier. Slot spacing is only known for 6.5u spacebars; other
/// widths return `None` and the caller skips the stabilizer.
pub fn spread_slots_alps(
    d: &CutoutDims,
    width: f64,
) -> Option<(Vec<(f64, f64)>, Vec<(f64, f64)>)> {
    if width != 6.5 {
        return None;
    }
    let inside_x = d.alps_stab_inside_x + 31.3;
    let outside_x = inside_x + 2.7 - d.half_kerf * 2.0;
    Some(slots_at(
        inside_x,
        outside_x,
        d.alps_stab_top_y,
        d.alps_stab_bottom_y,
    ))
}

fn slots_at(
    inside_x: f64,
    outside_x: f64,
    top_y: f64,
    bottom_y: f64,
) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let right = vec![
        (inside_x, top_y),
        (outside_x, top_y),
        (outside_x, bottom_y),
        (inside_x, bottom_y),
        (inside_x, top_y),
    ];
    let left = vec![
        (-inside_x, top_y),
        (-outside_x, top_y),
        (-outside_x, bottom_y),
        (-inside_x, bottom_y),
        (-inside_x, top_y),
    ];
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn spacing_table_lookup_and_fallback() {
        assert_eq!(spacing(2.0), (11.95, 0.0));
        assert_eq!(spacing(6.0), (47.625, 9.525));
        assert_eq!(spacing(6.25), (50.0, 0.0));
        // Unknown sizes fall back to the 2u spacing.
        assert_eq!(spacing(2.5), (11.95, 0.0));
    }

    #[test]
    fn cherry_2u_template_shifts_by_half_kerf_per_vertex() {
        let base = wire2u_cherry(&CutoutDims::new(0.0, 2.0));
        let adjusted = wire2u_cherry(&CutoutDims::new(0.05, 2.0));
        assert_eq!(base.len(), 29);
        assert_eq!(adjusted.len(), 29);
        for (b, a) in base.iter().zip(&adjusted) {
            // Every coordinate moves by exactly one half-kerf step (the wire
            // bottom edge carries two).
            let dx = (a.0 - b.0).abs() / 0.05;
            let dy = (a.1 - b.1).abs() / 0.05;
            assert!(
                (dx - 1.0).abs() < 1e-9 || dx < 1e-9,
                "unexpected x shift: {dx}"
            );
            assert!(
                (dy - 1.0).abs() < 1e-9 || (dy - 2.0).abs() < 1e-9 || dy < 1e-9,
                "unexpected y shift: {dy}"
            );
        }
    }

    #[test]
    fn cherry_2u_bounding_box() {
        let pts = wire2u_cherry(&CutoutDims::new(0.0, 2.0));
        let max_x = pts.iter().map(|p| p.0).fold(f64::MIN, f64::max);
        let max_y = pts.iter().map(|p| p.1).fold(f64::MIN, f64::max);
        let min_y = pts.iter().map(|p| p.1).fold(f64::MAX, f64::min);
        assert_abs_diff_eq!(max_x, 16.1);
        assert_abs_diff_eq!(min_y, -5.5);
        assert_abs_diff_eq!(max_y, 8.0);
    }

    #[test]
    fn costar_slots_are_mirrored() {
        let (left, right) = slots2u_costar(&CutoutDims::new(0.0, 2.0));
        for (l, r) in left.iter().zip(&right) {
            assert_abs_diff_eq!(l.0, -r.0);
            assert_abs_diff_eq!(l.1, r.1);
        }
    }

    #[test]
    fn alps_spread_known_only_for_six_and_a_half_units() {
        let d = CutoutDims::new(0.0, 6.5);
        let (left, right) = spread_slots_alps(&d, 6.5).expect("6.5u is known");
        assert_abs_diff_eq!(right[0].0, 12.7 + 31.3);
        assert_abs_diff_eq!(left[0].0, -(12.7 + 31.3));
        assert!(spread_slots_alps(&d, 7.0).is_none());
    }
}
