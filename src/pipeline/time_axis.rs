//! Sample-Rate Inference - normalize ambiguous timestamps into seconds
//!
//! Wrist devices report timestamps in seconds, milliseconds, or microseconds
//! depending on firmware, with no marker saying which. Each unit hypothesis
//! is scored against the nominal device rate; the winner supplies the
//! zero-based time axis and the effective sampling frequency. When no
//! hypothesis survives (too few samples, or the clock ran backwards under
//! every scale) a uniform synthetic axis at the nominal rate is used —
//! a degraded outcome, never an error.

use tracing::{debug, warn};

use super::median;
use crate::config::SwingConfig;

/// Score penalty applied to hypotheses whose inferred rate falls outside
/// the plausible window. A penalized hypothesis can still win when every
/// hypothesis is penalized.
const IMPLAUSIBLE_RATE_PENALTY: f64 = 1e6;

/// Normalized, zero-based time axis shared by all downstream stages.
#[derive(Debug, Clone)]
pub struct TimeAxis {
    /// Monotonically increasing seconds, `time[0] == 0`
    pub time: Vec<f64>,
    /// Effective sampling frequency (Hz)
    pub fs: f64,
    /// Set when the axis was synthesized from sample indices because no
    /// unit hypothesis survived
    pub synthetic: bool,
}

/// Timestamp unit hypotheses, in preference order for score ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitScale {
    Seconds,
    Milliseconds,
    Microseconds,
}

impl UnitScale {
    pub const ALL: [Self; 3] = [Self::Seconds, Self::Milliseconds, Self::Microseconds];

    /// Divisor that converts this unit into seconds.
    #[must_use]
    pub const fn divisor(self) -> f64 {
        match self {
            Self::Seconds => 1.0,
            Self::Milliseconds => 1e3,
            Self::Microseconds => 1e6,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
            Self::Microseconds => "microseconds",
        }
    }
}

/// One scored unit hypothesis.
#[derive(Debug, Clone, Copy)]
struct ScoredCandidate {
    scale: UnitScale,
    fs: f64,
    score: f64,
}

/// Evaluate a single unit hypothesis against raw timestamps.
///
/// Returns `None` when the hypothesis is structurally invalid: fewer than
/// two samples, or any non-positive successive difference after rescaling.
/// Implausible (but monotonic) rates survive with a heavy score penalty.
fn score_candidate(ts_raw: &[f64], scale: UnitScale, config: &SwingConfig) -> Option<ScoredCandidate> {
    if ts_raw.len() < 2 {
        return None;
    }
    let divisor = scale.divisor();
    let mut diffs = Vec::with_capacity(ts_raw.len() - 1);
    for pair in ts_raw.windows(2) {
        let dt = (pair[1] - pair[0]) / divisor;
        if dt <= 0.0 {
            return None;
        }
        diffs.push(dt);
    }

    let fs = 1.0 / median(&diffs);
    let plausible = fs >= config.min_sample_rate_hz && fs <= config.max_sample_rate_hz;
    let mut score = (fs - config.expected_sample_rate_hz).abs();
    if !plausible {
        score += IMPLAUSIBLE_RATE_PENALTY;
    }
    Some(ScoredCandidate { scale, fs, score })
}

/// Build the normalized time axis for a recording.
///
/// `ts_raw` is the acceleration stream's timestamp column; the gyro stream
/// is index-aligned by contract and shares the axis.
pub fn infer(ts_raw: &[f64], config: &SwingConfig) -> TimeAxis {
    let n = ts_raw.len();

    let mut best: Option<ScoredCandidate> = None;
    for scale in UnitScale::ALL {
        let Some(candidate) = score_candidate(ts_raw, scale, config) else {
            continue;
        };
        // Strict comparison: earlier hypotheses win ties
        if best.map_or(true, |b| candidate.score < b.score) {
            best = Some(candidate);
        }
    }

    match best {
        Some(winner) => {
            debug!(
                unit = winner.scale.label(),
                fs = format!("{:.2}", winner.fs),
                "timestamp unit inferred"
            );
            let divisor = winner.scale.divisor();
            let t0 = ts_raw[0];
            let time: Vec<f64> = ts_raw.iter().map(|&ts| (ts - t0) / divisor).collect();
            TimeAxis {
                time,
                fs: winner.fs,
                synthetic: false,
            }
        }
        None => {
            if n > 0 {
                warn!(
                    samples = n,
                    nominal_fs = config.expected_sample_rate_hz,
                    "no timestamp unit hypothesis survived, using synthetic uniform axis"
                );
            }
            let fs = config.expected_sample_rate_hz;
            let time: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();
            TimeAxis {
                time,
                fs,
                synthetic: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SwingConfig {
        SwingConfig::default()
    }

    /// Uniform timestamps at `fs` Hz expressed in the given unit.
    fn uniform_ts(n: usize, fs: f64, scale: UnitScale) -> Vec<f64> {
        (0..n).map(|i| i as f64 / fs * scale.divisor()).collect()
    }

    #[test]
    fn test_millisecond_axis_inferred_within_one_percent() {
        let ts = uniform_ts(1000, 208.0, UnitScale::Milliseconds);
        let axis = infer(&ts, &config());
        assert!(!axis.synthetic);
        assert!(
            (axis.fs - 208.0).abs() / 208.0 < 0.01,
            "fs {} not within 1% of 208",
            axis.fs
        );
        assert!((axis.time[0]).abs() < 1e-12);
        // Axis is in seconds: 1000 samples at 208 Hz span ~4.8 s
        let last = *axis.time.last().expect("non-empty");
        assert!((last - 999.0 / 208.0).abs() < 1e-6);
    }

    #[test]
    fn test_microsecond_axis_inferred() {
        let ts = uniform_ts(500, 100.0, UnitScale::Microseconds);
        let axis = infer(&ts, &config());
        assert!(!axis.synthetic);
        assert!((axis.fs - 100.0).abs() / 100.0 < 0.01);
    }

    #[test]
    fn test_second_axis_inferred() {
        let ts = uniform_ts(500, 208.0, UnitScale::Seconds);
        let axis = infer(&ts, &config());
        assert!(!axis.synthetic);
        assert!((axis.fs - 208.0).abs() / 208.0 < 0.01);
    }

    #[test]
    fn test_non_monotonic_falls_back_to_synthetic_axis() {
        // Constant timestamps defeat every unit hypothesis
        let ts = vec![5.0; 400];
        let axis = infer(&ts, &config());
        assert!(axis.synthetic);
        assert!((axis.fs - 208.0).abs() < f64::EPSILON);
        assert_eq!(axis.time.len(), 400);
        assert!((axis.time[1] - 1.0 / 208.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_falls_back() {
        let axis = infer(&[123.0], &config());
        assert!(axis.synthetic);
        assert_eq!(axis.time, vec![0.0]);
    }

    #[test]
    fn test_empty_axis() {
        let axis = infer(&[], &config());
        assert!(axis.synthetic);
        assert!(axis.time.is_empty());
    }

    #[test]
    fn test_implausible_rate_loses_to_plausible_one() {
        // 100 Hz data in seconds reads as 100 kHz under the milliseconds
        // hypothesis; the penalty keeps the plausible reading on top even
        // though both axes are monotonic.
        let ts = uniform_ts(300, 100.0, UnitScale::Seconds);
        let axis = infer(&ts, &config());
        assert!(!axis.synthetic);
        assert!((axis.fs - 100.0).abs() / 100.0 < 0.01);
    }

    #[test]
    fn test_all_penalized_still_uses_best_monotonic_axis() {
        // 5 Hz is below the plausible window under every unit hypothesis,
        // yet the clock is monotonic: the least-penalized hypothesis still
        // supplies the axis instead of the synthetic fallback.
        let ts = uniform_ts(100, 5.0, UnitScale::Seconds);
        let axis = infer(&ts, &config());
        assert!(!axis.synthetic);
        assert!((axis.fs - 5.0).abs() < 0.01);
    }
}
