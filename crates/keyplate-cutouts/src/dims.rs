use keyplate_core::{inset, outset};
use keyplate_layout::ReinforcingOffsets;

/// The kerf-adjusted dimension set every cutout template is built from.
///
/// Every field is a nominal dimension offset by the half-kerf with a fixed
/// sign: edges that bound material to keep are inset, edges that bound waste
/// are outset. Growing the kerf therefore moves every edge of every template
/// by the same physical amount.
///
/// Names encode the axis the value is measured on in the wide (unrotated)
/// template orientation: `*_x` distances from the switch center line, `*_y`
/// distances from the switch horizontal axis (positive downward).
#[derive(Debug, Clone, Copy)]
pub struct CutoutDims {
    pub half_kerf: f64,

    // Switch body.
    pub mx_half_width: f64,
    pub mx_half_height: f64,
    pub mx_wing_half_width: f64,
    pub alps_half_width: f64,
    pub alps_half_height: f64,
    pub wing_inside_y: f64,
    pub wing_outside_y: f64,

    // Cherry-style wire stabilizers (2u tier measured from switch center,
    // spread tier measured from each stab center).
    pub stab2_top_inner_y: f64,
    pub stab2_inside_x: f64,
    pub stab_top_y: f64,
    pub stab2_outside_x: f64,
    pub wire_top_y: f64,
    pub wire_bottom_y: f64,
    pub stab2_wing_outside_x: f64,
    pub wing_bottom_y: f64,
    pub stab_bottom_y: f64,
    pub stab2_bottom_center_y: f64,
    pub bottom_wing_bottom_y: f64,
    pub stab_half_width: f64,
    pub bottom_wing_half_width: f64,
    pub stab_outside_dx: f64,

    // Costar slot edges.
    pub costar_inside_x: f64,
    pub costar_top_y: f64,
    pub costar_outside_x: f64,
    pub costar_bottom_y: f64,

    // Alps slot edges.
    pub alps_stab_top_y: f64,
    pub alps_stab_bottom_y: f64,
    pub alps_stab_inside_x: f64,
    pub alps_stab_outside_x: f64,
}

impl CutoutDims {
    pub fn new(half_kerf: f64, key_width: f64) -> Self {
        let k = half_kerf;
        // 2.75u alps boards space their stabilizer slots further out.
        let alps_stab_inside_x = outset(if key_width == 2.75 { 16.7 } else { 12.7 }, k);
        Self {
            half_kerf: k,
            mx_half_width: inset(7.0, k),
            mx_half_height: inset(7.0, k),
            mx_wing_half_width: inset(7.8, k),
            alps_half_width: inset(7.8, k),
            alps_half_height: inset(6.4, k),
            wing_inside_y: outset(2.9, k),
            wing_outside_y: inset(6.0, k),
            stab2_top_inner_y: inset(4.75, k),
            stab2_inside_x: outset(8.575, k),
            stab_top_y: inset(5.5, k),
            stab2_outside_x: inset(15.225, k),
            wire_top_y: inset(2.3, k),
            wire_bottom_y: inset(2.3, k) - k,
            stab2_wing_outside_x: inset(16.1, k),
            wing_bottom_y: inset(0.5, k),
            stab_bottom_y: inset(6.75, k),
            stab2_bottom_center_y: inset(6.0, k),
            bottom_wing_bottom_y: inset(8.0, k),
            stab_half_width: inset(3.325, k),
            bottom_wing_half_width: inset(1.65, k),
            stab_outside_dx: inset(4.2, k),
            costar_inside_x: outset(10.3, k),
            costar_top_y: inset(6.5, k),
            costar_outside_x: inset(13.6, k),
            costar_bottom_y: inset(7.75, k),
            alps_stab_top_y: outset(4.0, k),
            alps_stab_bottom_y: inset(9.0, k),
            alps_stab_inside_x,
            alps_stab_outside_x: alps_stab_inside_x + 2.7 - k * 2.0,
        }
    }

    /// Grow the dimension set for the reinforcing layer so its openings clear
    /// the switch housing. Several stabilizer edges collapse to shared values
    /// to keep the widened template simple.
    pub fn reinforced(mut self, offsets: &ReinforcingOffsets) -> Self {
        let o = offsets.grow;
        let k = self.half_kerf;

        self.mx_half_height += o;
        self.mx_half_width += o;
        self.mx_wing_half_width = self.mx_half_width;
        self.alps_half_height += o;
        self.alps_half_width += o;
        self.wing_inside_y += o;
        self.wing_outside_y += o;
        self.stab2_inside_x += o;
        self.stab_top_y += o.max(offsets.stab_top_min);
        self.wire_top_y = self.stab_top_y;
        self.stab2_top_inner_y = self.stab_top_y;
        self.costar_inside_x += o;
        self.costar_top_y += o;
        self.costar_outside_x += o;
        self.stab2_outside_x += o;
        self.stab2_wing_outside_x += o;
        self.stab_bottom_y += o.max(offsets.stab_bottom_min) - k;
        self.wing_bottom_y = self.stab_bottom_y;
        self.wire_bottom_y = self.stab_bottom_y;
        self.bottom_wing_bottom_y = self.stab_bottom_y;
        self.stab2_bottom_center_y = self.stab_bottom_y;
        self.costar_bottom_y = self.stab_bottom_y;
        self.stab_half_width += o;
        self.bottom_wing_half_width += o;
        self.stab_outside_dx += o;
        self.alps_stab_top_y -= o;
        self.alps_stab_bottom_y += o;
        self.alps_stab_inside_x -= o;
        self.alps_stab_outside_x += o;
        self
    }

    /// Resize the switch rectangle to the visible keycap footprint for the
    /// top layer: half the key pitch per unit plus half a millimeter of
    /// clearance.
    pub fn keycap(mut self, key_spacing: f64, units: f64) -> Self {
        self.mx_half_width = inset(key_spacing / 2.0 * units + 0.5, self.half_kerf);
        self.mx_half_height = inset(key_spacing / 2.0 + 0.5, self.half_kerf);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn kerf_moves_every_edge_by_the_same_amount() {
        let base = CutoutDims::new(0.0, 2.0);
        let adjusted = CutoutDims::new(0.05, 2.0);
        // Spot-check both sign conventions.
        assert_abs_diff_eq!(adjusted.mx_half_width, base.mx_half_width - 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(adjusted.stab2_inside_x, base.stab2_inside_x + 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(adjusted.wing_inside_y, base.wing_inside_y + 0.05, epsilon = 1e-12);
        // The bottom wire edge carries a double offset (edge plus wire
        // clearance).
        assert_abs_diff_eq!(adjusted.wire_bottom_y, base.wire_bottom_y - 0.10, epsilon = 1e-12);
    }

    #[test]
    fn reinforced_collapses_bottom_edges() {
        let dims = CutoutDims::new(0.0, 2.0).reinforced(&ReinforcingOffsets::default());
        assert_abs_diff_eq!(dims.mx_half_width, 8.0);
        assert_abs_diff_eq!(dims.mx_wing_half_width, 8.0);
        assert_abs_diff_eq!(dims.stab_bottom_y, 6.75 + 4.3);
        assert_abs_diff_eq!(dims.wing_bottom_y, dims.stab_bottom_y);
        assert_abs_diff_eq!(dims.wire_bottom_y, dims.stab_bottom_y);
        assert_abs_diff_eq!(dims.costar_bottom_y, dims.stab_bottom_y);
        assert_abs_diff_eq!(dims.stab_top_y, 5.5 + 2.5);
        assert_abs_diff_eq!(dims.wire_top_y, dims.stab_top_y);
    }

    #[test]
    fn keycap_sizing_matches_key_pitch() {
        let dims = CutoutDims::new(0.0, 2.0).keycap(19.05, 2.0);
        assert_abs_diff_eq!(dims.mx_half_width, 19.05 + 0.5);
        assert_abs_diff_eq!(dims.mx_half_height, 19.05 / 2.0 + 0.5);
    }

    #[test]
    fn wide_alps_keys_move_the_slots_out() {
        let narrow = CutoutDims::new(0.0, 2.0);
        let wide = CutoutDims::new(0.0, 2.75);
        assert_abs_diff_eq!(narrow.alps_stab_inside_x, 12.7);
        assert_abs_diff_eq!(wide.alps_stab_inside_x, 16.7);
    }
}
