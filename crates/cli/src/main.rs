use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use concave::api::{
    concave_hull_with, draw_cloud, draw_uniform, Attempt, CloudCfg, HullObserver, HullParams,
    PointCount, ReplayToken,
};
use nalgebra::Vector2;
use polars::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{write_sidecar, Sidecar};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Concave hulls of scattered 2D points")]
struct Cmd {
    /// Optional run label; propagated to provenance sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute the concave hull of an `x,y` CSV and write it as JSON
    Hull {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Initial neighbor count
        #[arg(long, default_value_t = 3)]
        k: usize,
        /// Stop after the first attempt instead of escalating k
        #[arg(long)]
        no_iterate: bool,
    },
    /// Write a reproducible `x,y` point cloud as CSV
    Sample {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        /// Outline samples (footprint clouds) or total points (uniform)
        #[arg(long, default_value_t = 64)]
        points: usize,
        /// Scatter uniformly in [-HALF, HALF]² instead of drawing a footprint
        #[arg(long, value_name = "HALF")]
        uniform: Option<f64>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Hull {
            input,
            out,
            k,
            no_iterate,
        } => {
            let params = HullParams {
                k,
                iterate: !no_iterate,
                ..HullParams::default()
            };
            let report = hull(&input, &out, &params, cmd.tag)?;
            if let Some(err) = report.error {
                bail!(err);
            }
            Ok(())
        }
        Action::Sample {
            out,
            seed,
            index,
            points,
            uniform,
        } => sample(&out, ReplayToken { seed, index }, points, uniform, cmd.tag).map(|_| ()),
        Action::Report => report(cmd.tag),
    }
}

/// JSON written by `hull`; `indices` index rows of the input CSV.
#[derive(Debug, Serialize)]
struct HullReport {
    points: usize,
    k_initial: usize,
    k: Option<usize>,
    attempts: usize,
    indices: Vec<usize>,
    error: Option<String>,
}

/// Logs each attempt and counts them, so failed searches can report how far they got.
#[derive(Default)]
struct AttemptLog {
    attempts: usize,
}

impl HullObserver for AttemptLog {
    fn on_attempt(&mut self, k: usize, attempt: &Attempt) {
        self.attempts += 1;
        match attempt {
            Attempt::Closed(ring) => tracing::debug!(k, vertices = ring.len(), "attempt closed"),
            Attempt::Failed(reason) => tracing::debug!(k, ?reason, "attempt failed"),
        }
    }
}

fn hull(input: &Path, out: &Path, params: &HullParams, tag: Option<String>) -> Result<HullReport> {
    tracing::info!(input = %input.display(), out = %out.display(), k = params.k, tag = ?tag, "hull");
    let points = read_points(input)?;
    let mut log = AttemptLog::default();
    let report = match concave_hull_with(&points, params, &mut log) {
        Ok(h) => HullReport {
            points: points.len(),
            k_initial: params.k,
            k: Some(h.k),
            attempts: h.attempts,
            indices: h.indices,
            error: None,
        },
        Err(err) => {
            tracing::warn!(%err, "no hull");
            HullReport {
                points: points.len(),
                k_initial: params.k,
                k: None,
                attempts: log.attempts,
                indices: Vec::new(),
                error: Some(err.to_string()),
            }
        }
    };

    create_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let sidecar = Sidecar::new(
        "hull",
        json!({ "k": params.k, "iterate": params.iterate }),
    )
    .tagged(tag)
    .input(input);
    write_sidecar(out, sidecar)?;
    Ok(report)
}

/// Read the `x` and `y` columns of a CSV (any numeric type) as points, in row order.
fn read_points(input: &Path) -> Result<Vec<Vector2<f64>>> {
    let df = LazyCsvReader::new(input)
        .with_infer_schema_length(Some(100))
        .finish()?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y from {}", input.display()))?;
    tracing::info!(rows = df.height(), "input_points");
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(Vector2::new(x, y)),
            _ => bail!("missing coordinate in row {row}"),
        })
        .collect()
}

fn sample(
    out: &Path,
    tok: ReplayToken,
    points: usize,
    uniform: Option<f64>,
    tag: Option<String>,
) -> Result<usize> {
    tracing::info!(out = %out.display(), seed = tok.seed, index = tok.index, points, "sample");
    let cloud = match uniform {
        Some(half) => draw_uniform(points, half, tok),
        None => draw_cloud(
            CloudCfg {
                outline: PointCount::Fixed(points),
                ..CloudCfg::default()
            },
            tok,
        ),
    };
    let xs: Vec<f64> = cloud.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = cloud.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;

    create_parent(out)?;
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    let sidecar = Sidecar::new(
        "sample",
        json!({
            "seed": tok.seed,
            "index": tok.index,
            "points": points,
            "uniform_half": uniform,
        }),
    )
    .tagged(tag);
    write_sidecar(out, sidecar)?;
    Ok(cloud.len())
}

fn report(tag: Option<String>) -> Result<()> {
    let mut obj = provenance::header();
    obj["tag"] = json!(tag);
    obj["defaults"] = json!({ "k": HullParams::default().k, "iterate": true });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
