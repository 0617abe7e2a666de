//! Recording Summary - headline digest for downstream presentation
//!
//! Condenses a recording's swing records into the handful of numbers a
//! frontend card or a narrative-feedback collaborator needs: the first
//! swing's tempo (displayed golf-style as "1:N"), its phase durations,
//! club speed, and face orientation. The deterministic text rendering is
//! the handoff boundary to any external feedback generator; that
//! collaborator's failures can never reach back into the records.

use serde::{Deserialize, Serialize};

use crate::types::{ImpactOrientation, SwingRecord};

/// Headline metrics from a recording, taken from its first swing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSummary {
    /// Golf-style tempo display ("1:3"); a dash when the ratio collapsed,
    /// absent when tempo was undefined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo_ratio: Option<String>,
    pub backswing_time: f64,
    pub downswing_time: f64,
    /// Club speed rounded for display (one decimal)
    pub club_speed: f64,
    pub impact_orientation: ImpactOrientation,
    pub impact_delta_angle: f64,
}

/// Build the summary from a recording's swing records.
///
/// Returns `None` for a recording with no swings.
#[must_use]
pub fn build_summary(swings: &[SwingRecord]) -> Option<RecordingSummary> {
    let first = swings.first()?;

    let tempo_ratio = first.tempo_ratio.map(|ratio| {
        if ratio > 0.0 {
            format!("1:{}", (1.0 / ratio).round() as i64)
        } else {
            "—".to_string()
        }
    });

    Some(RecordingSummary {
        tempo_ratio,
        backswing_time: first.backswing_time,
        downswing_time: first.downswing_time,
        club_speed: (first.club_speed_est * 10.0).round() / 10.0,
        impact_orientation: first.impact_orientation,
        impact_delta_angle: first.impact_delta_angle,
    })
}

/// Render swing records as plain text for a feedback collaborator.
#[must_use]
pub fn render_text(swings: &[SwingRecord]) -> String {
    let mut output = String::new();
    output.push_str("Swing Analysis\n");
    output.push_str("==============\n");
    output.push_str(&format!("Swings detected: {}\n\n", swings.len()));

    for swing in swings {
        let tempo = swing
            .tempo_ratio
            .map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"));
        output.push_str(&format!(
            "{}. backswing {:.3} s, downswing {:.3} s, tempo {}, peak accel {:.2}, \
             club speed {:.2} m/s, face {} ({:+.2}°) at t={:.3} s\n",
            swing.swing_number,
            swing.backswing_time,
            swing.downswing_time,
            tempo,
            swing.max_accel,
            swing.club_speed_est,
            swing.impact_orientation,
            swing.impact_delta_angle,
            swing.impact_time,
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tempo: Option<f64>) -> SwingRecord {
        SwingRecord {
            swing_number: 1,
            backswing_time: 0.84,
            downswing_time: 0.21,
            tempo_ratio: tempo,
            max_accel: 24.6,
            max_gyro_rad_s: 12.345,
            club_speed_est: 18.77,
            impact_delta_angle: 2.1,
            impact_orientation: ImpactOrientation::Good,
            impact_time: 3.402,
        }
    }

    #[test]
    fn test_empty_recording_has_no_summary() {
        assert!(build_summary(&[]).is_none());
    }

    #[test]
    fn test_tempo_display_ratio() {
        // Display convention is 1:round(1/ratio)
        let summary = build_summary(&[record(Some(0.33))]).expect("summary");
        assert_eq!(summary.tempo_ratio.as_deref(), Some("1:3"));

        let summary = build_summary(&[record(Some(4.0))]).expect("summary");
        assert_eq!(summary.tempo_ratio.as_deref(), Some("1:0"));
    }

    #[test]
    fn test_tempo_display_absent() {
        let summary = build_summary(&[record(None)]).expect("summary");
        assert!(summary.tempo_ratio.is_none());
    }

    #[test]
    fn test_club_speed_display_rounding() {
        let summary = build_summary(&[record(Some(3.0))]).expect("summary");
        assert!((summary.club_speed - 18.8).abs() < 1e-9);
    }

    #[test]
    fn test_render_text_lists_each_swing() {
        let text = render_text(&[record(Some(4.0))]);
        assert!(text.contains("Swings detected: 1"));
        assert!(text.contains("backswing 0.840 s"));
        assert!(text.contains("face good"));
    }
}
