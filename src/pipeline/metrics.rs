//! Metric Extractor - physical quantities from segmented index ranges
//!
//! Converts each swing's boundary indices into durations, tempo, angular
//! rate, an estimated clubhead speed, and a face-orientation classification.
//! The clubhead-speed model is an explicitly approximate rigid-arm blend
//! (angular rate times lever arm, plus a tuned linear-acceleration term),
//! not a rigorous computation. Rounding happens here and only here.

use tracing::debug;

use super::conditioner::ConditionedSignals;
use super::max_value;
use super::segmenter::SwingPhases;
use super::time_axis::TimeAxis;
use crate::config::SwingConfig;
use crate::types::{ImpactOrientation, SwingRecord};

/// Round to a fixed number of decimal places at the output boundary.
fn round_places(value: f64, places: i32) -> f64 {
    let factor = 10.0_f64.powi(places);
    (value * factor).round() / factor
}

/// Trapezoidal integral of `y` over `t`. Slices must be equal length.
fn trapezoid(t: &[f64], y: &[f64]) -> f64 {
    t.windows(2)
        .zip(y.windows(2))
        .map(|(ts, ys)| 0.5 * (ys[0] + ys[1]) * (ts[1] - ts[0]))
        .sum()
}

/// Build one immutable `SwingRecord` per segmented swing.
pub fn extract(
    phases: &[SwingPhases],
    signals: &ConditionedSignals,
    axis: &TimeAxis,
    config: &SwingConfig,
) -> Vec<SwingRecord> {
    phases
        .iter()
        .enumerate()
        .map(|(i, ph)| extract_one(i, ph, signals, axis, config))
        .collect()
}

fn extract_one(
    i: usize,
    ph: &SwingPhases,
    signals: &ConditionedSignals,
    axis: &TimeAxis,
    config: &SwingConfig,
) -> SwingRecord {
    let peak_accel = signals.accel_mag[ph.peak];

    let t_impact = axis.time[ph.impact];
    let t_downswing = axis.time[ph.downswing_start];
    let t_backswing = axis.time[ph.backswing_start];

    // Clamping collisions can invert boundaries; durations floor at zero
    let downswing_time = (t_impact - t_downswing).max(0.0);
    let backswing_time = (t_downswing - t_backswing).max(0.0);
    let tempo_ratio = if downswing_time > 0.0 {
        Some(backswing_time / downswing_time)
    } else {
        None
    };

    // Peak angular rate over the downswing; an empty range (boundary
    // collision) falls back to the whole recording
    let max_gyro_rad_s = if ph.impact > ph.downswing_start {
        max_value(&signals.gyro_mag[ph.downswing_start..ph.impact])
    } else {
        max_value(&signals.gyro_mag)
    };

    // Rigid-arm blend: rotational term plus a tuned share of the linear
    // acceleration integrated over the downswing
    let accel_term = if downswing_time > 0.0 {
        peak_accel * downswing_time * config.accel_blend_factor
    } else {
        0.0
    };
    let club_speed_est = max_gyro_rad_s * config.wrist_to_clubhead_radius_m + accel_term;

    // Face rotation: integrated swing-axis angular rate over the downswing
    let impact_delta_angle = if ph.impact > ph.downswing_start {
        let range = ph.downswing_start..=ph.impact;
        trapezoid(&axis.time[range.clone()], &signals.gyro_z[range]).to_degrees()
    } else {
        0.0
    };
    let impact_orientation =
        ImpactOrientation::classify(impact_delta_angle, config.orientation_threshold_deg);

    debug!(
        swing = i + 1,
        backswing_s = format!("{backswing_time:.3}"),
        downswing_s = format!("{downswing_time:.3}"),
        peak_accel = format!("{peak_accel:.2}"),
        "swing metrics extracted"
    );

    SwingRecord {
        swing_number: (i + 1) as u32,
        backswing_time: round_places(backswing_time, 3),
        downswing_time: round_places(downswing_time, 3),
        tempo_ratio: tempo_ratio.map(|r| round_places(r, 2)),
        max_accel: round_places(peak_accel, 2),
        max_gyro_rad_s: round_places(max_gyro_rad_s, 3),
        club_speed_est: round_places(club_speed_est, 2),
        impact_delta_angle: round_places(impact_delta_angle, 2),
        impact_orientation,
        impact_time: round_places(t_impact, 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(n: usize, fs: f64) -> TimeAxis {
        TimeAxis {
            time: (0..n).map(|i| i as f64 / fs).collect(),
            fs,
            synthetic: false,
        }
    }

    fn signals(n: usize, accel: f64, gyro: f64) -> ConditionedSignals {
        ConditionedSignals {
            accel_mag: vec![accel; n],
            gyro_mag: vec![gyro; n],
            gyro_z: vec![gyro; n],
        }
    }

    #[test]
    fn test_durations_and_tempo() {
        let ph = SwingPhases {
            backswing_start: 100,
            downswing_start: 180,
            peak: 195,
            impact: 200,
        };
        let records = extract(
            &[ph],
            &signals(400, 10.0, 0.0),
            &axis(400, 100.0),
            &SwingConfig::default(),
        );
        let r = &records[0];
        assert_eq!(r.swing_number, 1);
        assert!((r.backswing_time - 0.8).abs() < 1e-9);
        assert!((r.downswing_time - 0.2).abs() < 1e-9);
        assert!((r.tempo_ratio.expect("tempo defined") - 4.0).abs() < 1e-9);
        assert!((r.impact_time - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_downswing_omits_tempo() {
        // Collapsed boundaries: impact == downswing_start
        let ph = SwingPhases {
            backswing_start: 50,
            downswing_start: 100,
            peak: 100,
            impact: 100,
        };
        let records = extract(
            &[ph],
            &signals(200, 5.0, 2.0),
            &axis(200, 100.0),
            &SwingConfig::default(),
        );
        let r = &records[0];
        assert!((r.downswing_time).abs() < 1e-9);
        assert!(r.tempo_ratio.is_none());
        // Empty downswing range falls back to the global gyro maximum
        assert!((r.max_gyro_rad_s - 2.0).abs() < 1e-9);
        // No downswing: the blend's acceleration term vanishes
        assert!((r.club_speed_est - 2.0 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_club_speed_blend() {
        let ph = SwingPhases {
            backswing_start: 50,
            downswing_start: 100,
            peak: 115,
            impact: 120,
        };
        let config = SwingConfig::default();
        let records = extract(
            &[ph],
            &signals(300, 10.0, 8.0),
            &axis(300, 100.0),
            &config,
        );
        let r = &records[0];
        // 8 rad/s * 1.1 m + 10 * 0.2 s * 0.4
        let expected = 8.0 * 1.1 + 10.0 * 0.2 * 0.4;
        assert!((r.club_speed_est - round_places(expected, 2)).abs() < 1e-9);
    }

    #[test]
    fn test_orientation_integral_classifies() {
        let fs = 100.0;
        let n = 300;
        // Constant 1.309 rad/s (75 deg/s) about z over a 0.2 s downswing
        // integrates to ~15 degrees: open
        let omega = 75.0_f64.to_radians();
        let ph = SwingPhases {
            backswing_start: 50,
            downswing_start: 100,
            peak: 115,
            impact: 120,
        };
        let mut sig = signals(n, 10.0, omega);
        let records = extract(&[ph], &sig, &axis(n, fs), &SwingConfig::default());
        assert_eq!(records[0].impact_orientation, ImpactOrientation::Open);
        assert!((records[0].impact_delta_angle - 15.0).abs() < 0.2);

        // Mirror sign: closed
        sig.gyro_z.iter_mut().for_each(|v| *v = -*v);
        let records = extract(&[ph], &sig, &axis(n, fs), &SwingConfig::default());
        assert_eq!(records[0].impact_orientation, ImpactOrientation::Closed);
        assert!((records[0].impact_delta_angle + 15.0).abs() < 0.2);

        // No rotation: good
        sig.gyro_z.iter_mut().for_each(|v| *v = 0.0);
        let records = extract(&[ph], &sig, &axis(n, fs), &SwingConfig::default());
        assert_eq!(records[0].impact_orientation, ImpactOrientation::Good);
        assert!(records[0].impact_delta_angle.abs() < 1e-9);
    }

    #[test]
    fn test_trapezoid_constant() {
        let t = vec![0.0, 0.1, 0.2, 0.3];
        let y = vec![2.0, 2.0, 2.0, 2.0];
        assert!((trapezoid(&t, &y) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_rounding_at_boundary() {
        assert!((round_places(1.23456, 3) - 1.235).abs() < 1e-12);
        assert!((round_places(1.23444, 2) - 1.23).abs() < 1e-12);
    }
}
