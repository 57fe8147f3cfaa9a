//! Curated internal API for pipeline code (UNSTABLE).
//!
//! Prefer these re-exports for clarity and consistency across callers; the
//! module layout behind them may change.

// Entry points
pub use crate::driver::{concave_hull, concave_hull_with, unique_points, Hull, HullParams};
pub use crate::error::HullError;
// Building blocks
pub use crate::build::{build_hull, crosses_hull, start_point, Attempt, FailureReason};
pub use crate::enclose::{all_enclosed, count_outside, orient_ccw};
pub use crate::geom::{locate, segments_intersect, HullCfg, HullPoint, Location, PointId};
pub use crate::index::{Neighbor, SpatialIndex};
pub use crate::observe::{HullObserver, NoopObserver, Recorder};
pub use crate::rank::{normalize_angle, rank_candidates, raw_angle, RankedCandidate};
// Point clouds
pub use crate::rand::{draw_cloud, draw_uniform, CloudCfg, PointCount, ReplayToken};
