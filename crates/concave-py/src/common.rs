use concave::HullError;
use nalgebra::Vector2;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::PyErr;

pub fn points_from_py(points: Vec<(f64, f64)>) -> Vec<Vector2<f64>> {
    points.into_iter().map(|(x, y)| Vector2::new(x, y)).collect()
}

/// Bad input and exhausted searches are `ValueError`; logic faults are `RuntimeError`.
pub fn map_hull_err(err: HullError) -> PyErr {
    match err {
        HullError::InvariantViolation { .. } => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}
