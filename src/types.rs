//! Core data types: sample streams, recordings, and swing records.

use serde::{Deserialize, Serialize};

// ============================================================================
// Sample Streams
// ============================================================================

/// One sensor's triaxial samples in column form.
///
/// Rows are ordered by timestamp (strictly non-decreasing). The timestamp
/// unit is whatever the device emitted — seconds, milliseconds, or
/// microseconds — and is resolved later by sample-rate inference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSamples {
    /// Raw timestamps, unit unknown at ingest time
    pub timestamp: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl AxisSamples {
    /// Create an empty stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample row.
    pub fn push(&mut self, timestamp: f64, x: f64, y: f64, z: f64) {
        self.timestamp.push(timestamp);
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }

    /// Number of samples in the stream.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    /// Whether the stream holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }
}

/// A complete capture: acceleration and angular-rate streams from one
/// swing session.
///
/// The two streams are assumed index-aligned (same cadence, same length);
/// guaranteeing that alignment is the caller's obligation and is checked
/// once at pipeline entry.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    /// Accelerometer samples (device units, typically m/s²)
    pub accel: AxisSamples,
    /// Gyroscope samples (deg/s or rad/s, see `SwingConfig::gyro_in_radians`)
    pub gyro: AxisSamples,
}

impl Recording {
    #[must_use]
    pub fn new(accel: AxisSamples, gyro: AxisSamples) -> Self {
        Self { accel, gyro }
    }

    /// Number of samples in the acceleration stream.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accel.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accel.is_empty()
    }
}

// ============================================================================
// Swing Records
// ============================================================================

/// Clubface orientation accumulated over the downswing, classified from the
/// integrated angular rate about the swing axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactOrientation {
    /// Face rotated open by more than the threshold
    Open,
    /// Face rotated closed by more than the threshold
    Closed,
    /// Rotation within the threshold band
    Good,
}

impl ImpactOrientation {
    /// Classify a face-rotation delta (degrees) against a symmetric
    /// threshold band.
    #[must_use]
    pub fn classify(delta_angle_deg: f64, threshold_deg: f64) -> Self {
        if delta_angle_deg > threshold_deg {
            Self::Open
        } else if delta_angle_deg < -threshold_deg {
            Self::Closed
        } else {
            Self::Good
        }
    }
}

impl std::fmt::Display for ImpactOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Good => write!(f, "good"),
        }
    }
}

/// One detected swing with its derived kinematics.
///
/// This is the pipeline's terminal artifact: created once per swing by the
/// metric extractor and immutable thereafter. All numeric fields are rounded
/// at this boundary for presentation stability; intermediate computation is
/// never rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingRecord {
    /// 1-based ordinal within the recording
    pub swing_number: u32,
    /// Backswing duration in seconds
    pub backswing_time: f64,
    /// Downswing duration in seconds
    pub downswing_time: f64,
    /// Backswing / downswing ratio. Absent (not zero, not NaN) when the
    /// downswing duration collapsed to zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo_ratio: Option<f64>,
    /// Peak filtered acceleration magnitude at impact (device units)
    pub max_accel: f64,
    /// Peak filtered angular-rate magnitude over the downswing (rad/s)
    pub max_gyro_rad_s: f64,
    /// Estimated clubhead speed (m/s), rigid-arm approximation
    pub club_speed_est: f64,
    /// Integrated face rotation over the downswing (degrees)
    pub impact_delta_angle: f64,
    /// Classification of `impact_delta_angle`
    pub impact_orientation: ImpactOrientation,
    /// Impact instant on the normalized (zero-based) time axis, seconds
    pub impact_time: f64,
}
