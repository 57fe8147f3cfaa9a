//! Print hull sizes for a few sampled footprint clouds.
//!
//! Usage:
//!   cargo run -p concave --example footprints -- 5
//!
//! Prints, per sample: point count, hull vertex count, the k that succeeded and
//! how many attempts it took.

use concave::observe::NoopObserver;
use concave::rand::{draw_cloud, CloudCfg, PointCount, ReplayToken};
use concave::{concave_hull_with, HullParams};

fn main() {
    let samples: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let cfg = CloudCfg {
        outline: PointCount::Uniform { min: 40, max: 120 },
        ..CloudCfg::default()
    };
    for index in 0..samples {
        let pts = draw_cloud(cfg, ReplayToken { seed: 2025, index });
        match concave_hull_with(&pts, &HullParams::default(), &mut NoopObserver) {
            Ok(hull) => println!(
                "sample {index}: n={}, hull={}, k={}, attempts={}",
                pts.len(),
                hull.indices.len(),
                hull.k,
                hull.attempts
            ),
            Err(err) => println!("sample {index}: n={}, error: {err}", pts.len()),
        }
    }
}
