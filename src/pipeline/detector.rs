//! Event Detector - impact candidates as adaptive-prominence peaks
//!
//! Impacts show up as sharp local maxima in the filtered acceleration
//! magnitude. The detector self-calibrates to each recording's dynamic
//! range: required prominence is a fraction of the span between the global
//! maximum and the median, so a putt session and a driver session both
//! resolve without a fixed absolute threshold. A minimum inter-peak distance
//! stops ringing around one real impact from counting as several swings.

use tracing::debug;

use super::{max_value, median};
use crate::config::SwingConfig;

/// Fraction of the max-to-median span a peak must protrude to count.
const PROMINENCE_SPAN_FRACTION: f64 = 0.6;

/// Floor keeping the prominence requirement positive on flat signals.
const PROMINENCE_EPSILON: f64 = 1e-6;

/// Find impact candidate indices in the filtered acceleration magnitude,
/// in increasing time order. An empty result is a valid outcome.
pub fn detect_impacts(signal: &[f64], fs: f64, config: &SwingConfig) -> Vec<usize> {
    if signal.len() < 3 {
        return Vec::new();
    }

    let span = max_value(signal) - median(signal);
    let min_prominence = (PROMINENCE_SPAN_FRACTION * span).max(PROMINENCE_EPSILON);
    let min_distance = ((config.min_swing_interval_s * fs) as usize).max(1);

    let candidates = local_maxima(signal);
    if candidates.is_empty() {
        return Vec::new();
    }
    let prominences: Vec<f64> = candidates.iter().map(|&p| prominence(signal, p)).collect();

    let keep = select_by_distance(&candidates, &prominences, min_distance);
    let peaks: Vec<usize> = candidates
        .iter()
        .zip(prominences.iter())
        .zip(keep.iter())
        .filter(|((_, &prom), &kept)| kept && prom >= min_prominence)
        .map(|((&p, _), _)| p)
        .collect();

    debug!(
        candidates = candidates.len(),
        kept = peaks.len(),
        min_prominence = format!("{min_prominence:.3}"),
        min_distance,
        "impact detection"
    );
    peaks
}

/// Strict local maxima; plateaus report their midpoint. Signal edges never
/// qualify.
fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    let i_max = signal.len() - 1;
    let mut i = 1;
    while i < i_max {
        if signal[i - 1] < signal[i] {
            let mut i_ahead = i + 1;
            while i_ahead < i_max && signal[i_ahead] == signal[i] {
                i_ahead += 1;
            }
            if signal[i_ahead] < signal[i] {
                peaks.push((i + i_ahead - 1) / 2);
                i = i_ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Prominence of one peak: its height above the higher of the two
/// surrounding troughs, where each trough is the minimum between the peak
/// and the nearest strictly-higher sample (or the signal edge).
fn prominence(signal: &[f64], peak: usize) -> f64 {
    let peak_val = signal[peak];

    let mut left_min = peak_val;
    let mut i = peak;
    while i > 0 {
        i -= 1;
        if signal[i] > peak_val {
            break;
        }
        if signal[i] < left_min {
            left_min = signal[i];
        }
    }

    let mut right_min = peak_val;
    let mut j = peak;
    while j + 1 < signal.len() {
        j += 1;
        if signal[j] > peak_val {
            break;
        }
        if signal[j] < right_min {
            right_min = signal[j];
        }
    }

    peak_val - left_min.max(right_min)
}

/// Greedy distance constraint: highest-prominence peaks claim their
/// neighborhood first, suppressing lower-prominence peaks closer than
/// `distance` samples.
fn select_by_distance(peaks: &[usize], priority: &[f64], distance: usize) -> Vec<bool> {
    let n = peaks.len();
    let mut keep = vec![true; n];
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        priority[a]
            .partial_cmp(&priority[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for &idx in order.iter().rev() {
        if !keep[idx] {
            continue;
        }
        let mut k = idx;
        while k > 0 {
            k -= 1;
            if peaks[idx] - peaks[k] < distance {
                keep[k] = false;
            } else {
                break;
            }
        }
        let mut k = idx;
        while k + 1 < n {
            k += 1;
            if peaks[k] - peaks[idx] < distance {
                keep[k] = false;
            } else {
                break;
            }
        }
    }
    keep
}
