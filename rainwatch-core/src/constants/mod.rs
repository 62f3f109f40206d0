//! Constants for Rainwatch Core
//!
//! Centralized defaults used throughout the engine. Runtime code reads
//! these only through [`RainConfig`](crate::config::RainConfig) defaults,
//! so a deployment can override any of them.
//!
//! ## Organization
//!
//! - **Thresholds**: classifier rules and notification caps
//! - **Sensors**: plausibility limits for raw readings
//! - **Time**: polling intervals and the inter-sample delay

/// Classifier thresholds and per-kind notification caps.
pub mod thresholds;

/// Sensor plausibility limits.
pub mod sensors;

/// Polling intervals and delays.
pub mod time;

pub use thresholds::{
    RISE_THRESHOLD_PCT, HIGH_HUMIDITY_THRESHOLD_PCT, DEW_MARGIN_C,
    RAPID_RISE_CAP, SUSTAINED_HUMIDITY_CAP, NEAR_DEW_POINT_CAP,
};

pub use sensors::{
    HUMIDITY_SENSOR_MIN_PCT, HUMIDITY_SENSOR_MAX_PCT,
    TEMP_SENSOR_MIN_C, TEMP_SENSOR_MAX_C,
};

pub use time::{SAMPLE_DELAY_MS, SHORT_POLL_MS, LONG_POLL_MS};
