//! Swing Analysis Pipeline
//!
//! Single-pass batch computation over a complete recording, each stage
//! consuming the previous one's output:
//!
//! 1. `time_axis` - normalize raw timestamps, infer the sample rate
//! 2. `conditioner` - resultant magnitudes + zero-phase low-pass filtering
//! 3. `detector` - impact candidates via adaptive prominence peaks
//! 4. `segmenter` - backswing / downswing / impact boundary indices
//! 5. `metrics` - physical durations, speeds, and face orientation
//!
//! Degradation philosophy: noisy or ambiguous input degrades (synthetic
//! time axis, unfiltered signal, empty swing list) but never fails; only
//! structurally invalid input — streams the caller promised were aligned
//! and are not — raises an error.

pub mod conditioner;
pub mod detector;
pub mod metrics;
pub mod segmenter;
pub mod time_axis;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::SwingConfig;
use crate::types::{Recording, SwingRecord};

/// Structural input errors. Everything else degrades.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("misaligned sample streams: accel has {accel} rows, gyro has {gyro}")]
    MisalignedStreams { accel: usize, gyro: usize },
}

/// Run the full pipeline over one recording.
///
/// Returns one `SwingRecord` per detected swing, in time order. An empty
/// vector is a valid outcome (no swings in the recording, or an empty
/// recording). The computation is pure: identical input and config produce
/// identical records.
pub fn analyze(
    recording: &Recording,
    config: &SwingConfig,
) -> Result<Vec<SwingRecord>, AnalysisError> {
    let n = recording.accel.len();
    if n != recording.gyro.len() {
        return Err(AnalysisError::MisalignedStreams {
            accel: n,
            gyro: recording.gyro.len(),
        });
    }
    if n == 0 {
        debug!("empty recording, returning no swings");
        return Ok(Vec::new());
    }

    let axis = time_axis::infer(&recording.accel.timestamp, config);
    let signals = conditioner::condition(recording, axis.fs, config);
    let peaks = detector::detect_impacts(&signals.accel_mag, axis.fs, config);
    if peaks.is_empty() {
        info!(samples = n, fs = axis.fs, "no impact candidates in recording");
        return Ok(Vec::new());
    }

    let phases = segmenter::segment(&signals.accel_mag, &peaks, axis.fs);
    let records = metrics::extract(&phases, &signals, &axis, config);

    info!(
        swings = records.len(),
        fs = axis.fs,
        synthetic_axis = axis.synthetic,
        "swing analysis complete"
    );
    Ok(records)
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Middle value of a slice, averaging the two central elements for an even
/// count. An empty slice yields 0.0. The input is left untouched; sorting
/// happens on an owned copy.
pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[n / 2],
        n => 0.5 * (sorted[n / 2 - 1] + sorted[n / 2]),
    }
}

/// Index of the first minimum value in a non-empty slice.
pub(crate) fn argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v < values[best] {
            best = i;
        }
    }
    best
}

/// Maximum of a slice; negative infinity when empty.
pub(crate) fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
