//! Rain inference and notification throttling engine
//!
//! Samples a humidity/temperature sensor, classifies the trend into a rain
//! indicator, and decides how many notifications each indicator may send
//! before going quiet until the weather clears.
//!
//! Key constraints:
//! - Runs on a microcontroller (`no_std` + `alloc`)
//! - Single owner of the sensor, strictly sequential cycles
//! - No error is fatal; the loop only stops with the process
//!
//! ```rust
//! use rainwatch_core::{AlertKind, Classifier, NotificationCaps, ThrottleState};
//!
//! let classifier = Classifier::default();
//! let mut throttle = ThrottleState::new(NotificationCaps::default());
//!
//! let classification = classifier.classify(92.0, 92.0, 20.0);
//! assert_eq!(classification.kind(), Some(AlertKind::SustainedHighHumidity));
//!
//! let decision = throttle.should_notify(AlertKind::SustainedHighHumidity);
//! assert!(decision.emit_onset);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod classifier;
pub mod config;
pub mod constants;
pub mod errors;
pub mod measurement;
pub mod messages;
pub mod monitor;
pub mod sampler;
pub mod throttle;
pub mod time;
pub mod traits;
pub mod validators;

// Public API
pub use classifier::{AlertKind, Classification, Classifier};
pub use config::{NotificationCaps, RainConfig, SamplingPolicy, Thresholds, Timing};
pub use errors::{ConfigError, SensorError, SensorResult, TransportError};
pub use measurement::{Measurement, SamplePair};
pub use messages::MessageTemplates;
pub use monitor::{CycleOutcome, CycleReport, RainMonitor};
pub use sampler::Sampler;
pub use throttle::{NotifyDecision, ThrottleState};
pub use validators::MeasurementValidator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
