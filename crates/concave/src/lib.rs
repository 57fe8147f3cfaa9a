//! Concave hulls of unstructured 2D point sets.
//!
//! A k-nearest-neighbor boundary walk picks the most clockwise admissible
//! neighbor at each step, rejects edges that would touch the hull built so far,
//! checks that the closed ring encloses every unused point, and escalates `k`
//! until a valid ring appears or `k` reaches the point count.
//!
//! API Policy
//! - This crate is consumed by the footprint-generalization pipeline; `api` is the
//!   curated surface for it. Breaking changes are fine when they improve quality.

pub mod api;
pub mod build;
pub mod driver;
pub mod enclose;
mod error;
pub mod geom;
pub mod index;
pub mod observe;
pub mod rand;
pub mod rank;

pub use driver::{concave_hull, concave_hull_with, Hull, HullParams};
pub use error::HullError;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::driver::{concave_hull, concave_hull_with, Hull, HullParams};
    pub use crate::error::HullError;
    pub use crate::geom::{HullCfg, HullPoint, PointId};
    pub use crate::observe::{HullObserver, NoopObserver};
    pub use nalgebra::Vector2 as Vec2;
}
