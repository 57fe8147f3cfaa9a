//! Random footprint-like point clouds (radial jitter + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler for scattered 2D points resembling
//!   sampled building outlines: a star-shaped boundary with lobes and dents,
//!   sampled along its outline, plus interior points.
//! - Used by tests, benches and the CLI `sample` command.
//!
//! Model
//! - Radius `r(θ) = base_radius · (1 + lobe_amp · sin(lobes · θ + φ) + u)` with
//!   per-sample jitter `u ∈ [-radial_jitter, radial_jitter]`.
//! - Outline samples sit at jittered, sorted angles; interior samples sit at a
//!   random fraction of the outline radius in their direction.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Point count distribution.
#[derive(Clone, Copy, Debug)]
pub enum PointCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl PointCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            PointCount::Fixed(n) => n.max(3),
            PointCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Cloud sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct CloudCfg {
    /// Number of outline samples.
    pub outline: PointCount,
    /// Interior samples as a fraction of the outline count.
    pub interior_frac: f64,
    /// Number of lobes of the underlying star shape (0 = circle).
    pub lobes: u32,
    /// Lobe amplitude relative to `base_radius`. Clamped to [0, 0.9].
    pub lobe_amp: f64,
    /// Radial jitter (relative amplitude), clamped so radii stay positive.
    pub radial_jitter: f64,
    pub base_radius: f64,
}

impl Default for CloudCfg {
    fn default() -> Self {
        Self {
            outline: PointCount::Fixed(64),
            interior_frac: 0.5,
            lobes: 3,
            lobe_amp: 0.35,
            radial_jitter: 0.05,
            base_radius: 10.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

struct Star {
    lobes: f64,
    amp: f64,
    jitter: f64,
    r0: f64,
    phase: f64,
}

impl Star {
    fn radius<R: Rng>(&self, th: f64, rng: &mut R) -> f64 {
        let u = (rng.gen::<f64>() * 2.0 - 1.0) * self.jitter;
        let r = 1.0 + self.amp * (self.lobes * th + self.phase).sin() + u;
        r.max(0.05) * self.r0
    }
}

/// Draw a cloud: outline samples first (angle order), interior samples after.
pub fn draw_cloud(cfg: CloudCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let n = cfg.outline.sample(&mut rng);
    let amp = cfg.lobe_amp.clamp(0.0, 0.9);
    let star = Star {
        lobes: f64::from(cfg.lobes),
        amp,
        jitter: cfg.radial_jitter.clamp(0.0, (0.95 - amp).max(0.0)),
        r0: cfg.base_radius.max(1e-9),
        phase: rng.gen::<f64>() * std::f64::consts::TAU,
    };
    let delta = std::f64::consts::TAU / (n as f64);
    let mut angles: Vec<f64> = (0..n)
        .map(|k| (k as f64) * delta + (rng.gen::<f64>() - 0.5) * 0.6 * delta)
        .collect();
    angles.sort_by(|a, b| a.total_cmp(b));

    let interior = (cfg.interior_frac.max(0.0) * n as f64).round() as usize;
    let mut pts = Vec::with_capacity(n + interior);
    for th in angles {
        let r = star.radius(th, &mut rng);
        pts.push(Vector2::new(th.cos() * r, th.sin() * r));
    }
    for _ in 0..interior {
        let th = rng.gen::<f64>() * std::f64::consts::TAU;
        let r_edge = star.radius(th, &mut rng) * (1.0 - star.jitter);
        let r = r_edge * rng.gen::<f64>().sqrt() * 0.95;
        pts.push(Vector2::new(th.cos() * r, th.sin() * r));
    }
    pts
}

/// Uniform scatter in the axis-aligned box `[-half, half]²`.
pub fn draw_uniform(count: usize, half: f64, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    (0..count)
        .map(|_| Vector2::new(rng.gen_range(-half..half), rng.gen_range(-half..half)))
        .collect()
}
