//! Phase Segmenter - backswing / downswing / impact boundaries per swing
//!
//! Walks backward and forward from each impact candidate through the
//! filtered acceleration magnitude to pin three sample indices: where the
//! downswing acceleration ramp leaves the baseline, where the impact
//! transient has decayed, and where the backswing motion began. Every search
//! has a windowed fallback so that clipped or atypical recordings still
//! yield usable (possibly zero-length) phases.
//!
//! The numeric constants here are exact behavioral contracts: changing any
//! of them changes the physical meaning of downstream metrics.

use super::{argmin, median};

/// Search-window lengths and thresholds for boundary location.
pub mod windows {
    /// Lookback window for the downswing-start search (seconds)
    pub const DOWNSWING_LOOKBACK_S: f64 = 2.0;
    /// Fraction of baseline-to-peak rise marking the downswing start
    pub const DOWNSWING_THRESHOLD_FRACTION: f64 = 0.12;
    /// Fallback offset before the peak when no threshold crossing exists (seconds)
    pub const DOWNSWING_FALLBACK_S: f64 = 0.5;
    /// Lookahead window for the impact-end search (seconds)
    pub const IMPACT_LOOKAHEAD_S: f64 = 1.0;
    /// Fraction of the peak below which the impact transient has decayed
    pub const IMPACT_DECAY_FRACTION: f64 = 0.8;
    /// Backswing lookback for the first swing of a recording (seconds)
    pub const FIRST_BACKSWING_LOOKBACK_S: f64 = 3.0;
    /// Widened window when the nominal backswing window is degenerate (seconds)
    pub const BACKSWING_WIDEN_S: f64 = 0.5;
    /// Offset from the acceleration minimum back to the start of motion (seconds)
    pub const BACKSWING_EARLY_OFFSET_S: f64 = 0.25;
}

/// Boundary indices for one swing, all clamped to the signal range.
#[derive(Debug, Clone, Copy)]
pub struct SwingPhases {
    /// Index where the backswing motion begins
    pub backswing_start: usize,
    /// Index where the downswing acceleration ramp begins
    pub downswing_start: usize,
    /// Impact candidate index (the acceleration peak)
    pub peak: usize,
    /// Index where the impact transient has decayed
    pub impact: usize,
}

/// Convert a duration to a sample count at `fs` (truncating).
fn samples(seconds: f64, fs: f64) -> usize {
    (seconds * fs) as usize
}

/// Locate phase boundaries for every impact candidate.
///
/// `peaks` must be in increasing order (as produced by the detector);
/// each earlier peak bounds the next swing's backswing search.
pub fn segment(signal: &[f64], peaks: &[usize], fs: f64) -> Vec<SwingPhases> {
    peaks
        .iter()
        .enumerate()
        .map(|(i, _)| segment_one(signal, peaks, i, fs))
        .collect()
}

fn segment_one(signal: &[f64], peaks: &[usize], i: usize, fs: f64) -> SwingPhases {
    let n = signal.len();
    let p = peaks[i];
    let peak_val = signal[p];

    // --- Downswing start: last sample still at the baseline ---
    let start_search = p.saturating_sub(samples(windows::DOWNSWING_LOOKBACK_S, fs));
    let baseline = median(&signal[start_search..=p]);
    let thr = baseline + windows::DOWNSWING_THRESHOLD_FRACTION * (peak_val - baseline);
    let downswing_start = signal[start_search..p]
        .iter()
        .rposition(|&v| v <= thr)
        .map_or_else(
            || start_search.max(p.saturating_sub(samples(windows::DOWNSWING_FALLBACK_S, fs))),
            |rel| start_search + rel + 1,
        );

    // --- Impact end: first sample after the peak below the decay level ---
    let end_search = (p + samples(windows::IMPACT_LOOKAHEAD_S, fs)).min(n - 1);
    let after_peak = &signal[p..=end_search];
    let impact = if after_peak.len() > 2 {
        after_peak
            .iter()
            .position(|&v| v < windows::IMPACT_DECAY_FRACTION * peak_val)
            .map_or(end_search, |rel| p + rel)
    } else {
        p
    };

    // --- Backswing start: the low point before the downswing, moved earlier ---
    let prev_boundary = if i > 0 {
        peaks[i - 1]
    } else {
        p.saturating_sub(samples(windows::FIRST_BACKSWING_LOOKBACK_S, fs))
    };
    let segment_end = downswing_start;
    let segment_start = if segment_end <= prev_boundary {
        downswing_start.saturating_sub(samples(windows::BACKSWING_WIDEN_S, fs))
    } else {
        prev_boundary
    };
    let min_rel = argmin(&signal[segment_start..=segment_end]);
    let backswing_start = (segment_start + min_rel)
        .saturating_sub(samples(windows::BACKSWING_EARLY_OFFSET_S, fs))
        .max(segment_start);

    SwingPhases {
        backswing_start,
        downswing_start,
        peak: p,
        impact,
    }
}
