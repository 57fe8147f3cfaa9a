//! Enclosure check: every excluded point must lie inside or on the hull.
//!
//! The per-point tests are independent and read-only, so large inputs are scanned
//! with `rayon` and combined by `any` (a short-circuiting OR reduction); small
//! inputs stay sequential.

use nalgebra::Vector2;
use rayon::prelude::*;

use crate::geom::{locate, signed_area, HullCfg};

/// Below this many points the sequential scan is faster than spawning work.
const PAR_MIN_POINTS: usize = 512;

/// Reverse `ring` in place if it winds clockwise.
pub fn orient_ccw(ring: &mut [Vector2<f64>]) {
    if signed_area(ring) < 0.0 {
        ring.reverse();
    }
}

/// Open, counterclockwise copy of `polygon`, or `None` below 3 vertices.
fn normalized_ring(polygon: &[Vector2<f64>], cfg: &HullCfg) -> Option<Vec<Vector2<f64>>> {
    let mut ring: Vec<Vector2<f64>> = polygon.to_vec();
    if ring.len() > 1 {
        let (first, last) = (ring[0], ring[ring.len() - 1]);
        if (first - last).norm() <= cfg.eps_dup {
            ring.pop();
        }
    }
    if ring.len() < 3 {
        return None;
    }
    orient_ccw(&mut ring);
    Some(ring)
}

/// True iff every point of `points` is inside or on `polygon`.
///
/// `polygon` is an open ring (a repeated closing vertex is tolerated and dropped).
/// Rings with fewer than 3 distinct vertices enclose nothing.
pub fn all_enclosed(polygon: &[Vector2<f64>], points: &[Vector2<f64>], cfg: &HullCfg) -> bool {
    let Some(ring) = normalized_ring(polygon, cfg) else {
        return false;
    };
    let outside = |p: &Vector2<f64>| !locate(&ring, *p, cfg).is_enclosed();
    let any_outside = if points.len() >= PAR_MIN_POINTS {
        points.par_iter().any(outside)
    } else {
        points.iter().any(outside)
    };
    !any_outside
}

/// Number of points strictly outside `polygon` (all of them for degenerate rings).
pub fn count_outside(polygon: &[Vector2<f64>], points: &[Vector2<f64>], cfg: &HullCfg) -> usize {
    let Some(ring) = normalized_ring(polygon, cfg) else {
        return points.len();
    };
    let outside = |p: &Vector2<f64>| !locate(&ring, *p, cfg).is_enclosed();
    if points.len() >= PAR_MIN_POINTS {
        points.par_iter().filter(|p| outside(*p)).count()
    } else {
        points.iter().filter(|p| outside(*p)).count()
    }
}
