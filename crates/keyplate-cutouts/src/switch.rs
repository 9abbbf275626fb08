use keyplate_layout::SwitchFamily;

use crate::dims::CutoutDims;

/// Switch-body cutout template for `family`, in local coordinates around the
/// switch center. Templates close themselves by repeating the first vertex.
pub fn points(
    family: SwitchFamily,
    dims: &CutoutDims,
    grow_x: f64,
    grow_y: f64,
) -> Vec<(f64, f64)> {
    match family {
        SwitchFamily::Mx => mx(dims, grow_x, grow_y),
        SwitchFamily::AlpsMx => alps_mx(dims),
        SwitchFamily::MxOpen => mx_open(dims),
        SwitchFamily::MxOpenRotatable => mx_open_rotatable(dims),
        SwitchFamily::Alps => alps(dims),
    }
}

fn mx(dims: &CutoutDims, grow_x: f64, grow_y: f64) -> Vec<(f64, f64)> {
    let w = dims.mx_half_width + grow_x;
    let h = dims.mx_half_height + grow_y;
    vec![(w, -h), (w, h), (-w, h), (-w, -h), (w, -h)]
}

/// Hybrid plate: an mx square with alps-width notches along the top and
/// bottom edges so either switch seats.
fn alps_mx(dims: &CutoutDims) -> Vec<(f64, f64)> {
    let mw = dims.mx_half_width;
    let mh = dims.mx_half_height;
    let aw = dims.alps_half_width;
    let ah = dims.alps_half_height;
    vec![
        (mw, -mh),
        (mw, -ah),
        (aw, -ah),
        (aw, ah),
        (mw, ah),
        (mw, mh),
        (-mw, mh),
        (-mw, ah),
        (-aw, ah),
        (-aw, -ah),
        (-mw, -ah),
        (-mw, -mh),
        (mw, -mh),
    ]
}

/// Mx square with side wings that let the switch's top clips be opened in
/// place. The wings disappear when the widened square already covers them.
fn mx_open(dims: &CutoutDims) -> Vec<(f64, f64)> {
    let w = dims.mx_half_width;
    let h = dims.mx_half_height;
    let ww = dims.mx_wing_half_width;
    let wi = dims.wing_inside_y;
    let wo = dims.wing_outside_y;

    let mut pts = vec![(w, -h)];
    if w != ww {
        pts.extend([
            (w, -wo),
            (ww, -wo),
            (ww, -wi),
            (w, -wi),
            (w, wi),
            (ww, wi),
            (ww, wo),
            (w, wo),
        ]);
    }
    pts.extend([(w, h), (-w, h)]);
    if w != ww {
        pts.extend([
            (-w, wo),
            (-ww, wo),
            (-ww, wi),
            (-w, wi),
            (-w, -wi),
            (-ww, -wi),
            (-ww, -wo),
            (-w, -wo),
        ]);
    }
    pts.extend([(-w, -h), (w, -h)]);
    pts
}

/// Openable-clip wings on all four sides, so the switch may be mounted
/// rotated 90°.
fn mx_open_rotatable(dims: &CutoutDims) -> Vec<(f64, f64)> {
    let w = dims.mx_half_width;
    let h = dims.mx_half_height;
    let aw = dims.alps_half_width;
    let wi = dims.wing_inside_y;
    let wo = dims.wing_outside_y;
    vec![
        (w, -h),
        (w, -wo),
        (aw, -wo),
        (aw, -wi),
        (w, -wi),
        (w, wi),
        (aw, wi),
        (aw, wo),
        (w, wo),
        (w, h),
        (wo, h),
        (wo, aw),
        (wi, aw),
        (wi, h),
        (-wi, h),
        (-wi, aw),
        (-wo, aw),
        (-wo, h),
        (-w, h),
        (-w, wo),
        (-aw, wo),
        (-aw, wi),
        (-w, wi),
        (-w, -wi),
        (-aw, -wi),
        (-aw, -wo),
        (-w, -wo),
        (-w, -h),
        (-wo, -h),
        (-wo, -aw),
        (-wi, -aw),
        (-wi, -h),
        (wi, -h),
        (wi, -aw),
        (wo, -aw),
        (wo, -h),
        (w, -h),
    ]
}

fn alps(dims: &CutoutDims) -> Vec<(f64, f64)> {
    let w = dims.alps_half_width;
    let h = dims.alps_half_height;
    vec![(w, -h), (w, h), (-w, h), (-w, -h), (w, -h)]
}
