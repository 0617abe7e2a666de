//! SwingSense: Golf Swing Operational Intelligence
//!
//! Batch analysis of wrist-worn IMU recordings: segments individual golf
//! swings out of raw accelerometer/gyroscope time-series and derives
//! per-swing kinematic metrics.
//!
//! ## Architecture
//!
//! - **Ingest**: CSV adapter for `{timestamp, x, y, z}` sample tables
//! - **Pipeline**: sample-rate inference → signal conditioning → impact
//!   detection → phase segmentation → metric extraction
//! - **Summary**: per-recording digest for downstream presentation or
//!   feedback generation
//!
//! The pipeline is a pure, synchronous computation over a fully-buffered
//! recording. Each invocation owns its working buffers and shares no state,
//! so a host may analyze many recordings concurrently without
//! synchronization. Device I/O, transport, and narrative feedback are the
//! host's concern.

pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod summary;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, SwingConfig};

// Re-export commonly used types
pub use types::{AxisSamples, ImpactOrientation, Recording, SwingRecord};

// Re-export pipeline entry point
pub use pipeline::{analyze, AnalysisError};

// Re-export summary builder
pub use summary::{build_summary, RecordingSummary};
