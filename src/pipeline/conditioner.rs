//! Signal Conditioner - resultant magnitudes and zero-phase low-pass filtering
//!
//! Collapses each triaxial stream to its sample-wise Euclidean norm, converts
//! gyro samples to rad/s when the device reports deg/s, and denoises with a
//! forward-backward (zero-phase) Butterworth low-pass. Filtering is
//! best-effort: when the cutoff sits at or above Nyquist, or the recording is
//! too short for a stable forward-backward pass, the raw signal passes
//! through unchanged.

use sci_rs::signal::filter::design::{
    butter_dyn, DigitalFilter, FilterBandType, FilterOutputType, SosFormatFilter,
};
use sci_rs::signal::filter::sosfiltfilt_dyn;
use tracing::{debug, warn};

use crate::config::SwingConfig;
use crate::types::Recording;

/// Butterworth filter order.
const FILTER_ORDER: usize = 3;

/// Minimum signal length for a stable forward-backward pass. Shorter signals
/// pass through unfiltered; a dozen samples carry no swing to denoise.
const MIN_FILTFILT_LEN: usize = 16;

/// Filtered signals derived from one recording. Created once by the
/// conditioner and read-only downstream.
#[derive(Debug, Clone)]
pub struct ConditionedSignals {
    /// Filtered acceleration resultant magnitude
    pub accel_mag: Vec<f64>,
    /// Filtered angular-rate resultant magnitude (rad/s)
    pub gyro_mag: Vec<f64>,
    /// Filtered angular rate about the swing (z) axis (rad/s), used for
    /// face-orientation integration
    pub gyro_z: Vec<f64>,
}

/// Zero-phase low-pass filter, or the input unchanged when inapplicable.
pub fn lowpass(data: &[f64], cutoff_hz: f64, fs: f64) -> Vec<f64> {
    let nyquist = 0.5 * fs;
    if cutoff_hz >= nyquist || data.len() < FILTER_ORDER + 1 {
        debug!(
            cutoff_hz,
            fs,
            samples = data.len(),
            "low-pass inapplicable, passing signal through"
        );
        return data.to_vec();
    }
    if data.len() < MIN_FILTFILT_LEN {
        debug!(
            samples = data.len(),
            "signal too short for forward-backward padding, passing through"
        );
        return data.to_vec();
    }

    let filter = butter_dyn(
        FILTER_ORDER,
        vec![cutoff_hz],
        Some(FilterBandType::Lowpass),
        Some(false),
        Some(FilterOutputType::Sos),
        Some(fs),
    );
    let DigitalFilter::Sos(SosFormatFilter { sos }) = filter else {
        warn!("Butterworth design did not yield SOS sections, passing signal through");
        return data.to_vec();
    };
    sosfiltfilt_dyn(data.iter(), &sos)
}

/// Sample-wise Euclidean norm of three axis columns.
fn resultant(x: &[f64], y: &[f64], z: &[f64]) -> Vec<f64> {
    x.iter()
        .zip(y.iter())
        .zip(z.iter())
        .map(|((&xv, &yv), &zv)| (xv * xv + yv * yv + zv * zv).sqrt())
        .collect()
}

/// Condition both streams of a recording at the inferred sample rate.
pub fn condition(recording: &Recording, fs: f64, config: &SwingConfig) -> ConditionedSignals {
    let accel_mag = resultant(&recording.accel.x, &recording.accel.y, &recording.accel.z);

    // Physical estimates downstream need rad/s
    let to_rad = if config.gyro_in_radians {
        1.0
    } else {
        std::f64::consts::PI / 180.0
    };
    let gx: Vec<f64> = recording.gyro.x.iter().map(|&v| v * to_rad).collect();
    let gy: Vec<f64> = recording.gyro.y.iter().map(|&v| v * to_rad).collect();
    let gz: Vec<f64> = recording.gyro.z.iter().map(|&v| v * to_rad).collect();
    let gyro_mag = resultant(&gx, &gy, &gz);

    let cutoff = config.lowpass_cutoff_hz;
    ConditionedSignals {
        accel_mag: lowpass(&accel_mag, cutoff, fs),
        gyro_mag: lowpass(&gyro_mag, cutoff, fs),
        gyro_z: lowpass(&gz, cutoff, fs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AxisSamples;
    use std::f64::consts::PI;

    #[test]
    fn test_resultant_magnitude() {
        let mag = resultant(&[3.0, 0.0], &[4.0, 0.0], &[0.0, 2.0]);
        assert!((mag[0] - 5.0).abs() < 1e-12);
        assert!((mag[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_lowpass_passthrough_above_nyquist() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        // Nyquist of 30 Hz is 15 Hz; a 20 Hz cutoff is inapplicable
        let out = lowpass(&data, 20.0, 30.0);
        assert_eq!(out, data);
    }

    #[test]
    fn test_lowpass_passthrough_short_signal() {
        let data = vec![1.0, 2.0, 3.0];
        let out = lowpass(&data, 20.0, 100.0);
        assert_eq!(out, data);
    }

    #[test]
    fn test_lowpass_attenuates_high_frequency() {
        // 2 Hz carrier + 45 Hz noise at 100 Hz; a 20 Hz cutoff keeps the
        // carrier and strips the noise
        let fs = 100.0;
        let n = 400;
        let signal: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / fs;
                (2.0 * PI * 2.0 * t).sin() + 0.5 * (2.0 * PI * 45.0 * t).sin()
            })
            .collect();
        let filtered = lowpass(&signal, 20.0, fs);
        assert_eq!(filtered.len(), signal.len());

        // Compare mid-signal energy against the clean carrier
        let mut err = 0.0;
        for i in 100..300 {
            let t = i as f64 / fs;
            let clean = (2.0 * PI * 2.0 * t).sin();
            err += (filtered[i] - clean).powi(2);
        }
        let rms_err = (err / 200.0_f64).sqrt();
        assert!(rms_err < 0.1, "residual noise rms {rms_err} too high");
    }

    #[test]
    fn test_lowpass_preserves_dc() {
        let data = vec![7.5; 200];
        let filtered = lowpass(&data, 20.0, 100.0);
        for (i, v) in filtered.iter().enumerate() {
            assert!((v - 7.5).abs() < 0.05, "sample {i} drifted to {v}");
        }
    }

    #[test]
    fn test_condition_converts_degrees_to_radians() {
        let n = 50;
        let mut accel = AxisSamples::new();
        let mut gyro = AxisSamples::new();
        for i in 0..n {
            accel.push(i as f64, 0.0, 0.0, 9.81);
            // 90 deg/s about z
            gyro.push(i as f64, 0.0, 0.0, 90.0);
        }
        let recording = Recording::new(accel, gyro);

        let config = SwingConfig::default();
        let signals = condition(&recording, 100.0, &config);
        let expected = 90.0_f64.to_radians();
        // DC signal: the filter preserves the level
        assert!((signals.gyro_mag[n / 2] - expected).abs() < 0.05);
        assert!((signals.gyro_z[n / 2] - expected).abs() < 0.05);

        let config_rad = SwingConfig {
            gyro_in_radians: true,
            ..SwingConfig::default()
        };
        let signals_rad = condition(&recording, 100.0, &config_rad);
        assert!((signals_rad.gyro_z[n / 2] - 90.0).abs() < 0.5);
    }
}
