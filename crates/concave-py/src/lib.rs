//! PyO3 bindings for the `concave` hull driver.
//!
//! Notes
//! - Keep bindings thin: points come in as `(x, y)` tuples, indices go out as a list.
//! - Tolerances stay at their defaults; Python callers that need more control
//!   should go through the CLI or the Rust API.

use concave::observe::NoopObserver;
use concave::{concave_hull_with, HullParams};
use pyo3::prelude::*;

mod common;

use common::{map_hull_err, points_from_py};

/// Concave hull of `points` as indices into `points`, in counterclockwise walk order.
///
/// Raises `ValueError` when `k < 1`, a coordinate is not finite, four or more points
/// collapse to fewer than 3 distinct locations, or no `k` yields a valid hull.
#[pyfunction]
#[pyo3(signature = (points, k = 3, iterate = true))]
fn concave_hull(points: Vec<(f64, f64)>, k: usize, iterate: bool) -> PyResult<Vec<usize>> {
    let pts = points_from_py(points);
    let params = HullParams {
        k,
        iterate,
        ..HullParams::default()
    };
    concave_hull_with(&pts, &params, &mut NoopObserver)
        .map(|hull| hull.indices)
        .map_err(map_hull_err)
}

/// Like `concave_hull`, but also returns the successful `k` and the attempt count.
#[pyfunction]
#[pyo3(signature = (points, k = 3))]
fn concave_hull_info(points: Vec<(f64, f64)>, k: usize) -> PyResult<(Vec<usize>, usize, usize)> {
    let pts = points_from_py(points);
    let params = HullParams {
        k,
        ..HullParams::default()
    };
    let hull = concave_hull_with(&pts, &params, &mut NoopObserver).map_err(map_hull_err)?;
    Ok((hull.indices, hull.k, hull.attempts))
}

#[pymodule]
fn concave_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(concave_hull, m)?)?;
    m.add_function(wrap_pyfunction!(concave_hull_info, m)?)?;
    m.add("__version__", concave::VERSION)?;
    Ok(())
}
