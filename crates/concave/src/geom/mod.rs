//! 2D point types and the predicates the hull walk relies on.
//!
//! Purpose
//! - Keep the numeric policy in one place: every equality, ordering and
//!   intersection decision uses an explicit tolerance from `HullCfg`.
//!
//! Code cross-refs: `build::build_hull`, `enclose::all_enclosed`

pub mod predicates;
mod types;

pub use predicates::{
    bbox_overlap, locate, orient, orientation, segments_intersect, signed_area, Location,
};
pub use types::{HullCfg, HullPoint, PointId};
