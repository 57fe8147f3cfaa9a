//! Geometric predicates for the hull walk and the enclosure check.
//!
//! - Orientation (`orient`, `orientation`), bounding-box overlap, closed segment
//!   intersection, signed area and point-in-polygon classification.
//! - Every comparison is tolerance-based; collinear overlap and touching count
//!   as intersecting so the walk rejects them conservatively.

use std::cmp::Ordering;

use nalgebra::Vector2;

use super::types::HullCfg;

/// Twice the signed area of triangle (a, b, c); positive for a→b→c counterclockwise.
#[inline]
pub fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Sign of `orient` with a dead zone of `eps`.
#[inline]
pub fn orientation(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, eps: f64) -> Ordering {
    let o = orient(a, b, c);
    if o > eps {
        Ordering::Greater
    } else if o < -eps {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Axis-aligned bounding boxes of segments `ab` and `cd` overlap (with slack `eps`).
#[inline]
pub fn bbox_overlap(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    d: Vector2<f64>,
    eps: f64,
) -> bool {
    a.x.min(b.x) <= c.x.max(d.x) + eps
        && c.x.min(d.x) <= a.x.max(b.x) + eps
        && a.y.min(b.y) <= c.y.max(d.y) + eps
        && c.y.min(d.y) <= a.y.max(b.y) + eps
}

/// `p` lies within the bounding box of `ab` (with slack `eps`).
#[inline]
fn within_box(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>, eps: f64) -> bool {
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

/// Closed segment intersection: proper crossings, touching endpoints and
/// collinear overlap all count.
///
/// The bounding-box test runs first; both must hold.
pub fn segments_intersect(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    d: Vector2<f64>,
    cfg: &HullCfg,
) -> bool {
    if !bbox_overlap(a, b, c, d, cfg.eps_dist) {
        return false;
    }
    let o1 = orientation(a, b, c, cfg.eps_orient);
    let o2 = orientation(a, b, d, cfg.eps_orient);
    let o3 = orientation(c, d, a, cfg.eps_orient);
    let o4 = orientation(c, d, b, cfg.eps_orient);

    let straddles = |x: Ordering, y: Ordering| {
        matches!(
            (x, y),
            (Ordering::Less, Ordering::Greater) | (Ordering::Greater, Ordering::Less)
        )
    };
    if straddles(o1, o2) && straddles(o3, o4) {
        return true;
    }
    let eps = cfg.eps_dist;
    (o1 == Ordering::Equal && within_box(a, b, c, eps))
        || (o2 == Ordering::Equal && within_box(a, b, d, eps))
        || (o3 == Ordering::Equal && within_box(c, d, a, eps))
        || (o4 == Ordering::Equal && within_box(c, d, b, eps))
}

/// Signed area of a polygon (open ring); positive for counterclockwise winding.
pub fn signed_area(ring: &[Vector2<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        acc += a.x * b.y - a.y * b.x;
    }
    0.5 * acc
}

/// Classification of a point against a simple polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Inside,
    Boundary,
    Outside,
}

impl Location {
    /// Inside or on the boundary.
    #[inline]
    pub fn is_enclosed(self) -> bool {
        !matches!(self, Location::Outside)
    }
}

/// Distance-based "on segment" test.
fn on_segment(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>, eps: f64) -> bool {
    let ab = b - a;
    let len = ab.norm();
    if len <= eps {
        return (p - a).norm() <= eps;
    }
    let dist = orient(a, b, p).abs() / len;
    dist <= eps && within_box(a, b, p, eps)
}

/// Locate `p` against the open ring `ring` (winding number, boundary first).
///
/// Works for either winding; the enclosure validator normalizes to
/// counterclockwise before calling.
pub fn locate(ring: &[Vector2<f64>], p: Vector2<f64>, cfg: &HullCfg) -> Location {
    let n = ring.len();
    if n < 3 {
        return Location::Outside;
    }
    for i in 0..n {
        if on_segment(ring[i], ring[(i + 1) % n], p, cfg.eps_boundary) {
            return Location::Boundary;
        }
    }
    let mut winding = 0i32;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if a.y <= p.y {
            if b.y > p.y && orient(a, b, p) > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && orient(a, b, p) < 0.0 {
            winding -= 1;
        }
    }
    if winding != 0 {
        Location::Inside
    } else {
        Location::Outside
    }
}
