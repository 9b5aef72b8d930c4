//! Sweep the PPA tariff and report NPV, IRR and payback at each level
//!
//! Runs the projections in parallel. Supports JSON output via --json.

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use solar_ppa::export::write_json;
use solar_ppa::{ProjectionConfig, ScenarioRunner, SweepPoint};

#[derive(Debug, Parser)]
#[command(name = "tariff_sweep", about = "NPV/IRR across a range of PPA tariffs")]
struct Args {
    /// JSON file with base projection parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lowest tariff
    #[arg(long, default_value_t = 3.0)]
    from: f64,

    /// Highest tariff (inclusive)
    #[arg(long, default_value_t = 7.0)]
    to: f64,

    #[arg(long, default_value_t = 0.25)]
    step: f64,

    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SweepResponse<'a> {
    base: &'a ProjectionConfig,
    points: &'a [SweepPoint],
    execution_time_ms: u64,
}

fn tariff_grid(from: f64, to: f64, step: f64) -> Result<Vec<f64>> {
    if step.is_nan() || step <= 0.0 || to < from {
        bail!("invalid tariff range {from}..={to} step {step}");
    }

    let count = ((to - from) / step + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| from + step * i as f64).collect())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let base = match &args.config {
        Some(path) => ProjectionConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ProjectionConfig::default(),
    };
    let tariffs = tariff_grid(args.from, args.to, args.step)?;

    let runner = ScenarioRunner::new(base);
    let points = runner.tariff_sweep(&tariffs);
    let elapsed = start.elapsed();
    log::info!("swept {} tariffs in {:?}", points.len(), elapsed);

    if args.json {
        let response = SweepResponse {
            base: runner.base(),
            points: &points,
            execution_time_ms: elapsed.as_millis() as u64,
        };
        write_json(&response, io::stdout().lock()).context("writing JSON")?;
        println!();
        return Ok(());
    }

    println!("{:>8} {:>16} {:>9} {:>8}", "Tariff", "NPV", "IRR", "Payback");
    println!("{}", "-".repeat(44));
    for p in &points {
        let irr = p
            .irr
            .map(|r| format!("{:.2}%", r * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        let payback = p
            .payback_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>8.2} {:>16.2} {:>9} {:>8}", p.ppa_tariff, p.npv, irr, payback);
    }

    Ok(())
}
