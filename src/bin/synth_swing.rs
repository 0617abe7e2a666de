//! Synthetic Swing Recording Generator
//!
//! Generates CSV sample-table pairs containing a configurable number of
//! synthetic golf swings for exercising the analyzer end to end: Gaussian
//! sensor noise, a gravity baseline, a triangular acceleration burst at each
//! impact, and a downswing angular-rate ramp about the wrist z axis.
//!
//! # Usage
//! ```bash
//! synth-swing --swings 3 --fs 208 --unit milliseconds --seed 7 \
//!     --out-dir captures
//! swingsense --accel captures/session_accel.csv --gyro captures/session_gyro.csv
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

// ============================================================================
// Swing Shape Constants
// ============================================================================

/// Gravity baseline on the accelerometer z axis (m/s²)
const GRAVITY: f64 = 9.81;
/// Peak linear acceleration of the impact burst (m/s²)
const IMPACT_ACCEL: f64 = 30.0;
/// Impact burst half-width (seconds)
const IMPACT_HALF_WIDTH_S: f64 = 0.06;
/// Peak downswing angular rate about z (deg/s)
const DOWNSWING_RATE_DPS: f64 = 400.0;
/// Downswing ramp duration before impact (seconds)
const DOWNSWING_RAMP_S: f64 = 0.3;
/// Post-impact angular-rate decay duration (seconds)
const FOLLOW_THROUGH_S: f64 = 0.2;
/// Backswing angular rate about z (deg/s), opposite sign to the downswing
const BACKSWING_RATE_DPS: f64 = -60.0;
/// Backswing active window before impact (seconds)
const BACKSWING_WINDOW: (f64, f64) = (1.5, 0.5);
/// Spacing between swings (seconds)
const SWING_PERIOD_S: f64 = 4.0;
/// Lead-in before the first impact (seconds)
const LEAD_IN_S: f64 = 2.0;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "synth-swing")]
#[command(about = "Synthetic IMU swing recording generator for SwingSense testing")]
#[command(version)]
struct Args {
    /// Number of swings to generate
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..=100))]
    swings: u32,

    /// Sample rate in Hz
    #[arg(long, default_value = "208")]
    fs: f64,

    /// Timestamp unit: seconds, milliseconds, or microseconds
    #[arg(long, default_value = "milliseconds")]
    unit: String,

    /// Gaussian noise sigma applied to every axis
    #[arg(long, default_value = "0.35")]
    noise: f64,

    /// Seed the noise generator for repeatable output
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for the CSV pair
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Output file prefix: <prefix>_accel.csv and <prefix>_gyro.csv
    #[arg(long, default_value = "session")]
    prefix: String,
}

/// Triangular pulse of the given half-width centered at `center`.
fn triangle(t: f64, center: f64, half_width: f64, height: f64) -> f64 {
    let d = (t - center).abs();
    if d < half_width {
        height * (1.0 - d / half_width)
    } else {
        0.0
    }
}

fn unit_multiplier(unit: &str) -> Result<f64> {
    match unit {
        "seconds" => Ok(1.0),
        "milliseconds" => Ok(1e3),
        "microseconds" => Ok(1e6),
        other => bail!("unknown timestamp unit '{other}' (expected seconds, milliseconds, or microseconds)"),
    }
}

/// Angular rate about z at `dt` seconds relative to an impact instant
/// (negative = before impact).
fn gyro_z_profile(dt: f64) -> f64 {
    // Downswing ramp into impact
    if (-DOWNSWING_RAMP_S..0.0).contains(&dt) {
        return DOWNSWING_RATE_DPS * (1.0 + dt / DOWNSWING_RAMP_S);
    }
    // Follow-through decay
    if (0.0..FOLLOW_THROUGH_S).contains(&dt) {
        return DOWNSWING_RATE_DPS * (1.0 - dt / FOLLOW_THROUGH_S);
    }
    // Slow backswing rotation
    if (-BACKSWING_WINDOW.0..-BACKSWING_WINDOW.1).contains(&dt) {
        return BACKSWING_RATE_DPS;
    }
    0.0
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.fs <= 0.0 {
        bail!("sample rate must be positive");
    }
    let multiplier = unit_multiplier(&args.unit)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let noise = Normal::new(0.0, args.noise.max(1e-9))
        .map_err(|e| anyhow::anyhow!("invalid noise sigma: {e}"))?;

    let duration = LEAD_IN_S + SWING_PERIOD_S * f64::from(args.swings);
    let n = (duration * args.fs) as usize;
    let impact_times: Vec<f64> = (0..args.swings)
        .map(|k| LEAD_IN_S + SWING_PERIOD_S * f64::from(k))
        .collect();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let accel_path = args.out_dir.join(format!("{}_accel.csv", args.prefix));
    let gyro_path = args.out_dir.join(format!("{}_gyro.csv", args.prefix));

    let mut accel = BufWriter::new(
        File::create(&accel_path).with_context(|| format!("creating {}", accel_path.display()))?,
    );
    let mut gyro = BufWriter::new(
        File::create(&gyro_path).with_context(|| format!("creating {}", gyro_path.display()))?,
    );
    writeln!(accel, "timestamp,x,y,z")?;
    writeln!(gyro, "timestamp,x,y,z")?;

    for i in 0..n {
        let t = i as f64 / args.fs;
        let ts = t * multiplier;

        // Nearest impact drives both sensors
        let burst: f64 = impact_times
            .iter()
            .map(|&ti| triangle(t, ti, IMPACT_HALF_WIDTH_S, IMPACT_ACCEL))
            .fold(0.0, f64::max);
        let gz: f64 = impact_times
            .iter()
            .map(|&ti| gyro_z_profile(t - ti))
            .fold(0.0, |acc, v| if v.abs() > acc.abs() { v } else { acc });

        let ax = burst + noise.sample(&mut rng);
        let ay = noise.sample(&mut rng);
        let az = GRAVITY + noise.sample(&mut rng);
        writeln!(accel, "{ts},{ax},{ay},{az}")?;

        let gx = noise.sample(&mut rng);
        let gy = noise.sample(&mut rng);
        let gz = gz + noise.sample(&mut rng);
        writeln!(gyro, "{ts},{gx},{gy},{gz}")?;
    }

    accel.flush()?;
    gyro.flush()?;

    eprintln!(
        "Wrote {} samples ({} swings at {} Hz) to {} and {}",
        n,
        args.swings,
        args.fs,
        accel_path.display(),
        gyro_path.display()
    );
    Ok(())
}
