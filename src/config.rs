//! Analyzer Configuration - All swing-detection tunables as TOML values
//!
//! Every constant a deployment might need to calibrate per device is a field
//! in this module. Each field carries a serde default matching the reference
//! calibration, ensuring zero-change behavior when no config file is present.
//!
//! ## Loading Order
//!
//! 1. `SWING_CONFIG` environment variable (path to TOML file)
//! 2. `swing_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded config is passed by reference into each pipeline invocation.
//! There is deliberately no process-global instance: a host serving many
//! devices may analyze recordings with different calibrations concurrently.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Configuration loading / validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file {0}: {1}")]
    Parse(PathBuf, #[source] Box<toml::de::Error>),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable constants for one analysis pipeline invocation.
///
/// Defaults are the reference wrist-device calibration. Segmentation window
/// lengths and fallback offsets are *not* configurable — they are exact
/// behavioral contracts (see `pipeline::segmenter::windows`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwingConfig {
    /// Low-pass cutoff applied to both signal channels (Hz)
    #[serde(default = "default_lowpass_cutoff_hz")]
    pub lowpass_cutoff_hz: f64,

    /// Nominal device sample rate, used to score unit hypotheses and as the
    /// synthetic-axis fallback (Hz)
    #[serde(default = "default_expected_sample_rate_hz")]
    pub expected_sample_rate_hz: f64,

    /// Lower bound of the plausible sample-rate window (Hz)
    #[serde(default = "default_min_sample_rate_hz")]
    pub min_sample_rate_hz: f64,

    /// Upper bound of the plausible sample-rate window (Hz)
    #[serde(default = "default_max_sample_rate_hz")]
    pub max_sample_rate_hz: f64,

    /// Minimum spacing between two distinct swings (seconds)
    #[serde(default = "default_min_swing_interval_s")]
    pub min_swing_interval_s: f64,

    /// Wrist-to-clubhead lever arm for the rigid-arm speed model (meters)
    #[serde(default = "default_wrist_to_clubhead_radius_m")]
    pub wrist_to_clubhead_radius_m: f64,

    /// Weight of the linear-acceleration term in the clubhead-speed blend
    #[serde(default = "default_accel_blend_factor")]
    pub accel_blend_factor: f64,

    /// Set when the gyroscope already reports rad/s; otherwise samples are
    /// treated as deg/s and converted before use
    #[serde(default)]
    pub gyro_in_radians: bool,

    /// Face-rotation band classified as a square ("good") impact (degrees)
    #[serde(default = "default_orientation_threshold_deg")]
    pub orientation_threshold_deg: f64,
}

fn default_lowpass_cutoff_hz() -> f64 {
    20.0
}
fn default_expected_sample_rate_hz() -> f64 {
    208.0
}
fn default_min_sample_rate_hz() -> f64 {
    30.0
}
fn default_max_sample_rate_hz() -> f64 {
    1000.0
}
fn default_min_swing_interval_s() -> f64 {
    0.4
}
fn default_wrist_to_clubhead_radius_m() -> f64 {
    1.1
}
fn default_accel_blend_factor() -> f64 {
    0.4
}
fn default_orientation_threshold_deg() -> f64 {
    10.0
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            lowpass_cutoff_hz: default_lowpass_cutoff_hz(),
            expected_sample_rate_hz: default_expected_sample_rate_hz(),
            min_sample_rate_hz: default_min_sample_rate_hz(),
            max_sample_rate_hz: default_max_sample_rate_hz(),
            min_swing_interval_s: default_min_swing_interval_s(),
            wrist_to_clubhead_radius_m: default_wrist_to_clubhead_radius_m(),
            accel_blend_factor: default_accel_blend_factor(),
            gyro_in_radians: false,
            orientation_threshold_deg: default_orientation_threshold_deg(),
        }
    }
}

impl SwingConfig {
    /// Resolve configuration from the usual places, first hit wins:
    /// `$SWING_CONFIG`, then `./swing_config.toml`, then built-in defaults.
    #[must_use]
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("SWING_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded swing config from SWING_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from SWING_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "SWING_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("swing_config.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded swing config from ./swing_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./swing_config.toml, using defaults");
                }
            }
        }

        info!("No swing_config.toml found — using built-in defaults");
        Self::default()
    }

    /// Parse and validate a TOML config at an explicit path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), Box::new(e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Sanity-check field values and their relationships.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lowpass_cutoff_hz <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "lowpass_cutoff_hz must be positive, got {}",
                self.lowpass_cutoff_hz
            )));
        }
        if self.min_sample_rate_hz <= 0.0 || self.max_sample_rate_hz <= self.min_sample_rate_hz {
            return Err(ConfigError::Invalid(format!(
                "sample-rate window must satisfy 0 < min < max, got [{}, {}]",
                self.min_sample_rate_hz, self.max_sample_rate_hz
            )));
        }
        if self.expected_sample_rate_hz <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "expected_sample_rate_hz must be positive, got {}",
                self.expected_sample_rate_hz
            )));
        }
        if self.min_swing_interval_s <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_swing_interval_s must be positive, got {}",
                self.min_swing_interval_s
            )));
        }
        if self.wrist_to_clubhead_radius_m <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "wrist_to_clubhead_radius_m must be positive, got {}",
                self.wrist_to_clubhead_radius_m
            )));
        }
        if self.accel_blend_factor < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "accel_blend_factor must be non-negative, got {}",
                self.accel_blend_factor
            )));
        }
        if self.orientation_threshold_deg <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "orientation_threshold_deg must be positive, got {}",
                self.orientation_threshold_deg
            )));
        }
        Ok(())
    }
}
