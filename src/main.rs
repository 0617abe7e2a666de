//! SwingSense - Golf Swing Analyzer
//!
//! Batch analysis of one captured recording: two CSV sample tables in,
//! a JSON swing report out.
//!
//! # Usage
//!
//! ```bash
//! swingsense --accel session_accel.csv --gyro session_gyro.csv
//! swingsense --accel a.csv --gyro g.csv --config swing_config.toml --pretty
//! swingsense --accel a.csv --gyro g.csv --text
//! ```
//!
//! # Environment Variables
//!
//! - `SWING_CONFIG`: Path to a TOML config file (overridden by `--config`)
//! - `RUST_LOG`: Logging level (default: info); logs go to stderr

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use swingsense::config::SwingConfig;
use swingsense::summary::{build_summary, render_text, RecordingSummary};
use swingsense::types::{Recording, SwingRecord};
use swingsense::{analyze, ingest};

#[derive(Parser, Debug)]
#[command(name = "swingsense")]
#[command(about = "Golf swing segmentation and kinematic metrics from IMU recordings")]
#[command(version)]
struct CliArgs {
    /// Accelerometer CSV with timestamp,x,y,z columns
    #[arg(long)]
    accel: PathBuf,

    /// Gyroscope CSV with timestamp,x,y,z columns
    #[arg(long)]
    gyro: PathBuf,

    /// Path to a TOML config file (default: SWING_CONFIG env var, then
    /// ./swing_config.toml, then built-in defaults)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Emit a plain-text report instead of JSON
    #[arg(long)]
    text: bool,
}

/// Top-level JSON report for one analyzed recording.
#[derive(Debug, Serialize)]
struct Report {
    analyzed_at: DateTime<Utc>,
    swings: Vec<SwingRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<RecordingSummary>,
}

fn main() -> Result<()> {
    // Initialize logging to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => SwingConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SwingConfig::load(),
    };

    let accel = ingest::read_axis_csv(&args.accel)
        .with_context(|| format!("reading accelerometer table {}", args.accel.display()))?;
    let gyro = ingest::read_axis_csv(&args.gyro)
        .with_context(|| format!("reading gyroscope table {}", args.gyro.display()))?;
    info!(
        accel_samples = accel.len(),
        gyro_samples = gyro.len(),
        "recording loaded"
    );

    let recording = Recording::new(accel, gyro);
    let swings = analyze(&recording, &config).context("analyzing recording")?;

    if args.text {
        print!("{}", render_text(&swings));
        return Ok(());
    }

    let report = Report {
        analyzed_at: Utc::now(),
        summary: build_summary(&swings),
        swings,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("serializing report")?;
    println!("{json}");

    Ok(())
}
