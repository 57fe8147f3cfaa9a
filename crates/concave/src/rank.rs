//! Candidate ranking by clockwise turning angle.
//!
//! Angles are measured clockwise from +x (`-atan2(dy, dx)`), taken relative to the
//! previous edge's reference direction and normalized into `[0, 2π)`. Candidates
//! are ordered most-clockwise first; candidates whose angles agree within
//! `eps_angle` are ordered nearest first, then by id.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use nalgebra::Vector2;

use crate::geom::{HullCfg, HullPoint};
use crate::index::Neighbor;

/// Clockwise angle of the direction `from → to`, measured from +x.
#[inline]
pub fn raw_angle(from: Vector2<f64>, to: Vector2<f64>) -> f64 {
    let d = to - from;
    -d.y.atan2(d.x)
}

/// Map an angle in `(-2π, 2π)` into `[0, 2π)`.
///
/// Values within `eps` below a full turn fold to `0`, so a direction that is
/// numerically "straight back" never jumps to the top of the ranking.
#[inline]
pub fn normalize_angle(a: f64, eps: f64) -> f64 {
    let mut x = if a < 0.0 { a + TAU } else { a };
    if x >= TAU {
        x -= TAU;
    }
    if x >= TAU - eps {
        0.0
    } else {
        x
    }
}

/// Transient ranking record.
#[derive(Clone, Copy, Debug)]
pub struct RankedCandidate {
    pub point: HullPoint,
    pub dist2: f64,
    pub angle: f64,
}

/// Order `neighbors` of `from` for the boundary walk.
pub fn rank_candidates(
    from: Vector2<f64>,
    neighbors: &[Neighbor],
    prev_angle: f64,
    cfg: &HullCfg,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = neighbors
        .iter()
        .map(|n| RankedCandidate {
            point: n.point,
            dist2: n.dist2,
            angle: normalize_angle(raw_angle(from, n.point.p) - prev_angle, cfg.eps_angle),
        })
        .collect();
    // Exact descending order; tolerance ties are regrouped below.
    ranked.sort_by(|a, b| b.angle.total_cmp(&a.angle));

    // Runs of consecutive angles within eps form one tie group.
    let mut start = 0;
    while start < ranked.len() {
        let mut end = start + 1;
        while end < ranked.len() && ranked[end - 1].angle - ranked[end].angle <= cfg.eps_angle {
            end += 1;
        }
        ranked[start..end].sort_by(|a, b| match a.dist2.total_cmp(&b.dist2) {
            Ordering::Equal => a.point.id.cmp(&b.point.id),
            o => o,
        });
        start = end;
    }
    ranked
}
