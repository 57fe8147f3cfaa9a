//! Mutable k-nearest-neighbor index over the points still available to the walk.
//!
//! Backed by an `rstar::RTree`; identifiers live in a dense slot table so removal by
//! id and "is this id live" checks are cheap. The builder removes each accepted
//! vertex and re-adds the start point once under a fresh id.

use nalgebra::Vector2;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::geom::{HullPoint, PointId};

#[derive(Clone, Copy, Debug)]
struct Entry {
    id: PointId,
    p: [f64; 2],
}

// The tree locates removal candidates by envelope; identity is the id.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.p)
    }
}

impl PointDistance for Entry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.p[0] - point[0];
        let dy = self.p[1] - point[1];
        dx * dx + dy * dy
    }
}

/// One kNN result.
#[derive(Clone, Copy, Debug)]
pub struct Neighbor {
    pub point: HullPoint,
    /// Squared Euclidean distance to the query.
    pub dist2: f64,
}

/// Spatial index over live point ids.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<Entry>,
    slots: Vec<Option<Vector2<f64>>>,
}

impl SpatialIndex {
    /// Bulk-load `points`; their ids must be unique.
    pub fn build(points: &[HullPoint]) -> Self {
        let max_id = points.iter().map(|hp| hp.id.0 + 1).max().unwrap_or(0);
        let mut slots = vec![None; max_id];
        let entries: Vec<Entry> = points
            .iter()
            .map(|hp| {
                slots[hp.id.0] = Some(hp.p);
                Entry {
                    id: hp.id,
                    p: [hp.p.x, hp.p.y],
                }
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            slots,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    #[inline]
    pub fn contains(&self, id: PointId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// Insert `p` under a fresh id (never reused during this index's lifetime).
    pub fn add(&mut self, p: Vector2<f64>) -> PointId {
        let id = PointId(self.slots.len());
        self.slots.push(Some(p));
        self.tree.insert(Entry {
            id,
            p: [p.x, p.y],
        });
        id
    }

    /// Remove a live id; returns its point, or `None` if it was not live.
    pub fn remove(&mut self, id: PointId) -> Option<HullPoint> {
        let p = self.slots.get_mut(id.0)?.take()?;
        let removed = self.tree.remove(&Entry {
            id,
            p: [p.x, p.y],
        });
        debug_assert!(removed.is_some(), "slot table and tree disagree on {id:?}");
        Some(HullPoint { id, p })
    }

    /// Some live point within distance `eps` of `q` (inclusive), if any.
    pub fn any_within(&self, q: Vector2<f64>, eps: f64) -> Option<PointId> {
        self.tree
            .locate_within_distance([q.x, q.y], eps * eps)
            .next()
            .map(|e| e.id)
    }

    /// The `k` nearest live points to `q`, nearest first.
    ///
    /// Points tied with the k-th distance (within `eps`) are included as well,
    /// so the result does not depend on the tree's internal layout.
    pub fn knn(&self, q: Vector2<f64>, k: usize, eps: f64) -> Vec<Neighbor> {
        let mut out: Vec<Neighbor> = Vec::with_capacity(k.min(self.len()));
        if k == 0 {
            return out;
        }
        for e in self.tree.nearest_neighbor_iter(&[q.x, q.y]) {
            let dist2 = e.distance_2(&[q.x, q.y]);
            if out.len() >= k {
                let kth = out[k - 1].dist2;
                if dist2 - kth > eps {
                    break;
                }
            }
            out.push(Neighbor {
                point: HullPoint {
                    id: e.id,
                    p: Vector2::new(e.p[0], e.p[1]),
                },
                dist2,
            });
        }
        out
    }
}
