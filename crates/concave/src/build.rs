//! One attempt of the k-nearest-neighbor boundary walk at a fixed `k`.
//!
//! Model
//! - Start at the lowest point (ties: largest x), walk to the most clockwise of the
//!   `k` nearest remaining points whose edge does not touch a non-adjacent hull
//!   edge, and stop when the walk returns to the start or runs out of points.
//! - The start point leaves the index immediately and comes back under a fresh id
//!   at step 4, so the walk can close onto it but not bounce straight back.
//! - A closed walk still fails unless every unused point is inside or on the ring.
//!
//! The builder never escalates `k`; see `driver` for that.

use std::collections::HashSet;

use nalgebra::Vector2;
use tracing::{debug, trace};

use crate::enclose::{all_enclosed, count_outside};
use crate::geom::{segments_intersect, HullCfg, HullPoint, PointId};
use crate::index::SpatialIndex;
use crate::observe::HullObserver;
use crate::rank::{rank_candidates, raw_angle};

/// Step at which the start point is re-inserted into the index.
pub const REINSERT_START_STEP: usize = 4;

/// Why an attempt failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// Every ranked candidate at hull length `step` would cross the hull.
    NoCandidate { step: usize },
    /// All points were used without returning to the start, and the implicit
    /// closing edge crosses the hull.
    ClosingEdgeCrosses,
    /// The ring closed but `count` unused points lie outside it.
    PointsOutside { count: usize },
}

/// Result of one attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Attempt {
    /// Open ring in walk order, starting at the start point; ids are the input ids.
    Closed(Vec<HullPoint>),
    Failed(FailureReason),
}

impl Attempt {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Attempt::Closed(_))
    }

    #[inline]
    pub fn ring(&self) -> Option<&[HullPoint]> {
        match self {
            Attempt::Closed(ring) => Some(ring),
            Attempt::Failed(_) => None,
        }
    }
}

/// Lowest point; ties on y (within `eps_dist`) go to the larger x.
pub fn start_point(points: &[HullPoint], cfg: &HullCfg) -> Option<HullPoint> {
    let (&first, rest) = points.split_first()?;
    Some(rest.iter().fold(first, |best, &hp| {
        let dy = hp.p.y - best.p.y;
        if dy < -cfg.eps_dist || (dy.abs() <= cfg.eps_dist && hp.p.x > best.p.x) {
            hp
        } else {
            best
        }
    }))
}

/// Does the edge `hull.last() → candidate` touch any hull edge not adjacent to it?
///
/// Compares against `(hull[m-1-j], hull[m-j])` for `j in 2..=m-1-closing`, where `m`
/// is the hull length. With `closing` set the first hull edge shares the start
/// vertex with the candidate edge and is skipped.
pub fn crosses_hull(
    hull: &[HullPoint],
    candidate: Vector2<f64>,
    closing: bool,
    cfg: &HullCfg,
) -> bool {
    let m = hull.len();
    if m < 3 {
        return false;
    }
    let from = hull[m - 1].p;
    let last_j = m - 1 - usize::from(closing);
    (2..=last_j).any(|j| segments_intersect(from, candidate, hull[m - 1 - j].p, hull[m - j].p, cfg))
}

/// Attempt one hull at neighbor count `k`.
///
/// `points` must carry unique ids. Inputs of at most 3 points are returned unchanged.
pub fn build_hull(
    points: &[HullPoint],
    k: usize,
    cfg: &HullCfg,
    observer: &mut dyn HullObserver,
) -> Attempt {
    let n = points.len();
    if n <= 3 {
        return Attempt::Closed(points.to_vec());
    }
    let Some(first) = start_point(points, cfg) else {
        return Attempt::Closed(Vec::new());
    };

    let mut index = SpatialIndex::build(points);
    index.remove(first.id);
    let mut hull: Vec<HullPoint> = Vec::with_capacity(n + 1);
    hull.push(first);
    observer.on_vertex(k, hull.len(), &first);

    let mut current = first;
    let mut prev_angle = 0.0;
    let mut step = 1usize;
    let mut start_alias: Option<PointId> = None;

    while (step == 1 || Some(current.id) != start_alias) && hull.len() < n {
        if step == REINSERT_START_STEP {
            start_alias = Some(index.add(first.p));
        }
        let neighbors = index.knn(current.p, k, cfg.eps_dist);
        let ranked = rank_candidates(current.p, &neighbors, prev_angle, cfg);
        let chosen = ranked.iter().find(|c| {
            let closing = Some(c.point.id) == start_alias;
            !crosses_hull(&hull, c.point.p, closing, cfg)
        });
        let Some(chosen) = chosen else {
            debug!(k, step, candidates = ranked.len(), "no admissible candidate");
            return Attempt::Failed(FailureReason::NoCandidate { step });
        };
        let next = chosen.point;
        index.remove(next.id);
        prev_angle = raw_angle(next.p, current.p);
        hull.push(next);
        observer.on_vertex(k, hull.len(), &next);
        trace!(k, step, id = next.id.0, x = next.p.x, y = next.p.y, "accepted");
        current = next;
        step += 1;
    }

    if Some(current.id) == start_alias {
        // Closing vertex is the re-inserted start; the ring stays open.
        hull.pop();
    } else if crosses_hull(&hull, first.p, true, cfg) {
        debug!(k, len = hull.len(), "implicit closing edge crosses hull");
        return Attempt::Failed(FailureReason::ClosingEdgeCrosses);
    }

    let on_hull: HashSet<PointId> = hull.iter().map(|hp| hp.id).collect();
    let rest: Vec<Vector2<f64>> = points
        .iter()
        .filter(|hp| !on_hull.contains(&hp.id))
        .map(|hp| hp.p)
        .collect();
    let ring: Vec<Vector2<f64>> = hull.iter().map(|hp| hp.p).collect();
    if !all_enclosed(&ring, &rest, cfg) {
        let count = count_outside(&ring, &rest, cfg);
        debug!(k, outside = count, "ring leaves points outside");
        return Attempt::Failed(FailureReason::PointsOutside { count });
    }
    Attempt::Closed(hull)
}
