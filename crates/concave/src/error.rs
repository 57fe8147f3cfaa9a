use std::fmt;

/// Errors surfaced by the hull driver.
///
/// Construction failures at a single `k` are not errors; the driver escalates.
/// Only the outcomes below reach the caller, and all of them are recoverable.
#[derive(Clone, Debug, PartialEq)]
pub enum HullError {
    /// The neighbor count must be at least 1.
    InvalidNeighborCount { k: usize },
    /// Input coordinate at `index` is NaN or infinite.
    NonFinitePoint { index: usize },
    /// At least 4 points were given, but they collapse to fewer than 3 distinct
    /// locations, so no ring exists.
    TooFewDistinctPoints { points: usize, unique: usize },
    /// No `k` in `k_initial..=k_last` produced a simple ring enclosing all points.
    Exhausted {
        k_initial: usize,
        k_last: usize,
        points: usize,
    },
    /// The observer asked to stop before the attempt with neighbor count `k`.
    Cancelled { k: usize },
    /// A "successful" attempt broke a postcondition (logic fault).
    InvariantViolation { reason: String },
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HullError::InvalidNeighborCount { k } => {
                write!(f, "neighbor count must be at least 1 (got {k})")
            }
            HullError::NonFinitePoint { index } => {
                write!(f, "point {index} has a non-finite coordinate")
            }
            HullError::TooFewDistinctPoints { points, unique } => write!(
                f,
                "{points} points collapse to {unique} distinct locations; a hull needs 3"
            ),
            HullError::Exhausted {
                k_initial,
                k_last,
                points,
            } => write!(
                f,
                "no valid concave hull for {points} points with k in {k_initial}..={k_last}"
            ),
            HullError::Cancelled { k } => write!(f, "cancelled before attempt with k={k}"),
            HullError::InvariantViolation { reason } => {
                write!(f, "hull invariant violated: {reason}")
            }
        }
    }
}

impl std::error::Error for HullError {}
