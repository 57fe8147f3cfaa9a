//! Optional observer hook for step-by-step inspection of the walk.
//!
//! Observers carry no required side effects; the driver behaves identically with
//! `NoopObserver`. `cancelled` is polled between attempts only.

use crate::build::Attempt;
use crate::geom::HullPoint;

pub trait HullObserver {
    /// A vertex was accepted at `step` during the attempt with neighbor count `k`.
    fn on_vertex(&mut self, _k: usize, _step: usize, _point: &HullPoint) {}

    /// An attempt with neighbor count `k` finished.
    fn on_attempt(&mut self, _k: usize, _attempt: &Attempt) {}

    /// Stop escalating before the next attempt.
    fn cancelled(&self) -> bool {
        false
    }
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl HullObserver for NoopObserver {}

/// Observer that records the walk, mostly useful in tests and debugging sessions.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// `(k, step, point)` per accepted vertex, across all attempts.
    pub vertices: Vec<(usize, usize, HullPoint)>,
    /// `(k, succeeded)` per attempt.
    pub attempts: Vec<(usize, bool)>,
    /// Cancel once this many attempts have been recorded.
    pub cancel_after: Option<usize>,
}

impl HullObserver for Recorder {
    fn on_vertex(&mut self, k: usize, step: usize, point: &HullPoint) {
        self.vertices.push((k, step, *point));
    }

    fn on_attempt(&mut self, k: usize, attempt: &Attempt) {
        self.attempts.push((k, attempt.is_success()));
    }

    fn cancelled(&self) -> bool {
        self.cancel_after
            .is_some_and(|limit| self.attempts.len() >= limit)
    }
}
