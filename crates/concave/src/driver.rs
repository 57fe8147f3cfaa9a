//! Escalating driver: retries the walk with growing `k` until a valid ring appears.
//!
//! Purpose
//! - Validate input, collapse coincident points (fewer than 3 distinct locations
//!   out of 4+ points is an error), run `build_hull` for
//!   `k, k+1, …, n-1` and map the first closed ring back to caller indices.
//! - Each attempt builds a fresh index and hull; nothing leaks between attempts.
//! - Cancellation is polled between attempts only.
//!
//! Code cross-refs: `build::build_hull`, `observe::HullObserver`, `error::HullError`

use nalgebra::Vector2;
use tracing::{debug, info, warn};

use crate::build::{build_hull, Attempt};
use crate::error::HullError;
use crate::geom::{HullCfg, HullPoint};
use crate::index::SpatialIndex;
use crate::observe::{HullObserver, NoopObserver};

/// Driver parameters.
#[derive(Clone, Copy, Debug)]
pub struct HullParams {
    /// Initial neighbor count (≥ 1).
    pub k: usize,
    /// Escalate `k` after a failed attempt; otherwise stop after the first one.
    pub iterate: bool,
    pub cfg: HullCfg,
}

impl Default for HullParams {
    fn default() -> Self {
        Self {
            k: 3,
            iterate: true,
            cfg: HullCfg::default(),
        }
    }
}

/// Successful driver result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hull {
    /// Caller indices in walk order; the ring closes implicitly (no repeated vertex).
    pub indices: Vec<usize>,
    /// Neighbor count of the successful attempt.
    pub k: usize,
    /// Number of attempts run (0 for inputs that needed no walk).
    pub attempts: usize,
}

/// Concave hull of `points` as caller indices, starting the search at `k`.
///
/// Inputs of at most 3 points come back unchanged, in input order. Larger inputs
/// whose points collapse to fewer than 3 distinct locations are an error.
pub fn concave_hull(points: &[Vector2<f64>], k: usize) -> Result<Vec<usize>, HullError> {
    let params = HullParams {
        k,
        ..HullParams::default()
    };
    concave_hull_with(points, &params, &mut NoopObserver).map(|h| h.indices)
}

/// Full driver with explicit parameters and an observer.
pub fn concave_hull_with(
    points: &[Vector2<f64>],
    params: &HullParams,
    observer: &mut dyn HullObserver,
) -> Result<Hull, HullError> {
    if params.k == 0 {
        return Err(HullError::InvalidNeighborCount { k: 0 });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(HullError::NonFinitePoint { index });
    }
    let n = points.len();
    if n <= 3 {
        return Ok(Hull {
            indices: (0..n).collect(),
            k: params.k,
            attempts: 0,
        });
    }

    let unique = unique_points(points, params.cfg.eps_dup);
    let m = unique.len();
    if m < n {
        debug!(points = n, unique = m, "collapsed coincident points");
    }
    if m < 3 {
        warn!(points = n, unique = m, "too few distinct points for a hull");
        return Err(HullError::TooFewDistinctPoints {
            points: n,
            unique: m,
        });
    }
    if m == 3 {
        return Ok(Hull {
            indices: unique.iter().map(|hp| hp.id.0).collect(),
            k: params.k,
            attempts: 0,
        });
    }

    let k_initial = params.k.min(m - 1);
    let mut k = k_initial;
    let mut attempts = 0usize;
    while k < m {
        if observer.cancelled() {
            info!(k, attempts, "hull search cancelled");
            return Err(HullError::Cancelled { k });
        }
        let attempt = build_hull(&unique, k, &params.cfg, observer);
        attempts += 1;
        observer.on_attempt(k, &attempt);
        match attempt {
            Attempt::Closed(ring) => return finish(ring, k, attempts),
            Attempt::Failed(reason) => {
                debug!(k, ?reason, "attempt failed");
            }
        }
        if !params.iterate {
            break;
        }
        k += 1;
    }
    let k_last = k.min(m - 1);
    warn!(points = n, k_initial, k_last, attempts, "no valid hull");
    Err(HullError::Exhausted {
        k_initial,
        k_last,
        points: n,
    })
}

fn finish(ring: Vec<HullPoint>, k: usize, attempts: usize) -> Result<Hull, HullError> {
    if ring.len() < 3 {
        debug_assert!(false, "closed ring with {} vertices", ring.len());
        return Err(HullError::InvariantViolation {
            reason: format!("closed ring with {} vertices", ring.len()),
        });
    }
    info!(k, attempts, vertices = ring.len(), "hull found");
    Ok(Hull {
        indices: ring.into_iter().map(|hp| hp.id.0).collect(),
        k,
        attempts,
    })
}

/// Input points with coincident ones (within `eps`) dropped.
///
/// Scans in input order, so each group is represented by its lowest index; a point
/// is dropped when any point kept so far lies within `eps` of it.
pub fn unique_points(points: &[Vector2<f64>], eps: f64) -> Vec<HullPoint> {
    let mut kept = SpatialIndex::build(&[]);
    let mut unique = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if kept.any_within(*p, eps).is_none() {
            kept.add(*p);
            unique.push(HullPoint::new(i, *p));
        }
    }
    unique
}

#[cfg(test)]
mod tests;
