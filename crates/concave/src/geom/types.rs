//! Basic 2D point type and tolerances used throughout the hull walk.
//!
//! - `HullCfg`: centralizes epsilons for angles, distances, orientation and boundary checks.
//! - `HullPoint`: coordinate plus a stable per-call identifier.
//!
//! Code cross-refs: `predicates`, `index::SpatialIndex`, `rank::rank_candidates`

use nalgebra::Vector2;

/// Stable identifier of a point within one hull invocation.
///
/// Ids `0..n` are the caller's positional indices; ids `>= n` are synthetic
/// (the re-inserted start point) and never reused during the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);

/// Point with its identifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HullPoint {
    pub id: PointId,
    pub p: Vector2<f64>,
}

impl HullPoint {
    #[inline]
    pub fn new(id: usize, p: Vector2<f64>) -> Self {
        Self {
            id: PointId(id),
            p,
        }
    }
}

/// Tolerance configuration.
///
/// All comparisons in the walk, the ranker and the predicates go through these
/// absolute tolerances; callers should keep coordinates at moderate scales.
#[derive(Clone, Copy, Debug)]
pub struct HullCfg {
    /// Angle ties in the ranker; normalized angles within this of 2π fold to 0.
    pub eps_angle: f64,
    /// Distance ties (ranker, kNN boundary) and bounding-box / on-segment slack.
    pub eps_dist: f64,
    /// Orientation sign threshold for segment intersection.
    pub eps_orient: f64,
    /// Orientation threshold for "on the boundary" classification.
    pub eps_boundary: f64,
    /// Input points closer than this are treated as one point.
    pub eps_dup: f64,
}

impl Default for HullCfg {
    fn default() -> Self {
        Self {
            eps_angle: 1e-9,
            eps_dist: 1e-9,
            eps_orient: 1e-12,
            eps_boundary: 1e-9,
            eps_dup: 1e-12,
        }
    }
}
