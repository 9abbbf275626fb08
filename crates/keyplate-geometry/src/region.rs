use cavalier_contours::polyline::{
    BooleanOp, BooleanResultInfo, PlineOrientation, PlineSource, PlineSourceMut, Polyline,
};

use crate::primitives::is_valid_closed_polyline;

/// A finished 2D profile: positive outer boundaries plus negative holes.
#[derive(Debug, Clone, Default)]
pub struct Region {
    pub pos: Vec<Polyline<f64>>,
    pub neg: Vec<Polyline<f64>>,
}

impl Region {
    pub fn from_outline(outline: Polyline<f64>) -> Self {
        Self {
            pos: vec![simplify(outline)],
            neg: vec![],
        }
    }

    /// Subtract every cutter from the region. Cutters fully inside a boundary
    /// become holes; cutters overlapping an edge reshape the boundary.
    pub fn subtract_all(&mut self, cutters: &[Polyline<f64>]) {
        let mut new_pos: Vec<Polyline<f64>> = Vec::new();
        let mut new_neg: Vec<Polyline<f64>> = Vec::new();

        for p in std::mem::take(&mut self.pos) {
            let mut cur_pos = vec![p];

            for c in cutters {
                if !is_valid_closed_polyline(c) {
                    continue;
                }
                let mut next_pos: Vec<Polyline<f64>> = Vec::new();

                for cp in cur_pos {
                    let res = cp.boolean(c, BooleanOp::Not);
                    match res.result_info {
                        BooleanResultInfo::InvalidInput => next_pos.push(cp),
                        _ => {
                            next_pos.extend(res.pos_plines.into_iter().map(|p| simplify(p.pline)));
                            new_neg.extend(res.neg_plines.into_iter().map(|p| simplify(p.pline)));
                        }
                    }
                }

                cur_pos = next_pos;
            }

            new_pos.extend(cur_pos);
        }

        self.pos = normalize_winding(new_pos, PlineOrientation::CounterClockwise);

        // Overlapping cuts (a stabilizer profile crossing an already-cut
        // switch opening) must export as one merged contour.
        let mut negs = std::mem::take(&mut self.neg);
        negs.extend(new_neg);
        self.neg = normalize_winding(union_pline_set(negs), PlineOrientation::Clockwise);
    }

    /// All closed outlines of the region, boundaries first.
    pub fn outlines(&self) -> impl Iterator<Item = &Polyline<f64>> {
        self.pos.iter().chain(self.neg.iter())
    }
}

fn union_pline_set(mut plines: Vec<Polyline<f64>>) -> Vec<Polyline<f64>> {
    // O(n^2) pairwise merge until stable; hole counts are small.
    plines.retain(is_valid_closed_polyline);
    plines = plines.into_iter().map(simplify).collect();

    let mut i = 0usize;
    while i < plines.len() {
        let mut merged = false;
        let mut j = i + 1;
        while j < plines.len() {
            let res = plines[i].boolean(&plines[j], BooleanOp::Or);
            match res.result_info {
                BooleanResultInfo::Disjoint | BooleanResultInfo::InvalidInput => {
                    j += 1;
                    continue;
                }
                _ => {
                    let mut next: Vec<Polyline<f64>> = res
                        .pos_plines
                        .into_iter()
                        .map(|p| simplify(p.pline))
                        .collect();
                    // Replace plines[i] and plines[j] with the union results.
                    plines.swap_remove(j);
                    plines.swap_remove(i);
                    plines.append(&mut next);
                    merged = true;
                    break;
                }
            }
        }
        if merged {
            i = 0;
        } else {
            i += 1;
        }
    }

    plines
}

fn normalize_winding(plines: Vec<Polyline<f64>>, desired: PlineOrientation) -> Vec<Polyline<f64>> {
    plines
        .into_iter()
        .map(|mut pl| {
            let orientation = pl.orientation();
            if orientation != PlineOrientation::Open && orientation != desired {
                pl.invert_direction_mut();
            }
            pl
        })
        .collect()
}

fn simplify(p: Polyline<f64>) -> Polyline<f64> {
    // Boolean ops leave redundant collinear vertexes behind; collapse them so
    // exported outlines stay minimal.
    p.remove_redundant(1e-6).unwrap_or(p)
}
