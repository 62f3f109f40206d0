//! Error Types for Sensing, Delivery and Configuration
//!
//! ## Design Philosophy
//!
//! Nothing in the engine is fatal. Every error here is a value the control
//! loop logs and moves past:
//!
//! - [`SensorError`]: the cycle is skipped, alert state is left untouched,
//!   and the next scheduled cycle retries.
//! - [`TransportError`]: the notification or telemetry message is lost,
//!   throttle counters are *not* rolled back.
//! - [`ConfigError`]: raised once at startup by
//!   [`RainConfig::validate`](crate::config::RainConfig::validate).
//!
//! Like the rest of the core, the error types are small, `Copy`, and carry
//! only `&'static str` context so they can be returned from `no_std` code
//! without allocating.
//!
//! ```rust
//! use rainwatch_core::SensorError;
//!
//! fn describe(err: SensorError) -> &'static str {
//!     match err {
//!         SensorError::Checksum | SensorError::Timeout => "transient, retry next cycle",
//!         SensorError::Implausible { .. } => "sensor returned garbage",
//!         SensorError::ReadFailed { .. } => "driver failure",
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Failure to obtain a usable measurement
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// Sensor did not answer in time
    #[error("Sensor read timed out")]
    Timeout,

    /// Sensor frame failed its checksum
    #[error("Sensor checksum mismatch")]
    Checksum,

    /// Driver or transport level failure
    #[error("Sensor read failed: {reason}")]
    ReadFailed {
        /// Short description from the driver
        reason: &'static str,
    },

    /// Reading is outside what the sensor can physically report
    #[error("Implausible {quantity} reading: {value}")]
    Implausible {
        /// Which quantity failed ("humidity" or "temperature")
        quantity: &'static str,
        /// The rejected value
        value: f32,
    },
}

/// Failure to deliver a notification or telemetry message
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Transport is not connected or not configured
    #[error("Transport unavailable")]
    Unavailable,

    /// Remote end refused the message
    #[error("Message rejected with status {status}")]
    Rejected {
        /// Status code reported by the remote end
        status: u16,
    },

    /// Send did not complete in time
    #[error("Transport timed out")]
    Timeout,

    /// Any other delivery failure
    #[error("Delivery failed: {reason}")]
    Failed {
        /// Short description of the failure
        reason: &'static str,
    },
}

/// Invalid configuration value
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Threshold is negative, non-finite or out of its domain
    #[error("Invalid threshold {name}: {value}")]
    InvalidThreshold {
        /// Configuration key
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Poll interval must be non-zero
    #[error("Interval {name} must be greater than zero")]
    ZeroInterval {
        /// Configuration key
        name: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Timeout => defmt::write!(fmt, "Sensor timeout"),
            Self::Checksum => defmt::write!(fmt, "Sensor checksum"),
            Self::ReadFailed { reason } => defmt::write!(fmt, "Sensor read failed: {}", reason),
            Self::Implausible { quantity, value } =>
                defmt::write!(fmt, "Implausible {}: {}", quantity, value),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TransportError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Unavailable => defmt::write!(fmt, "Transport unavailable"),
            Self::Rejected { status } => defmt::write!(fmt, "Rejected {}", status),
            Self::Timeout => defmt::write!(fmt, "Transport timeout"),
            Self::Failed { reason } => defmt::write!(fmt, "Delivery failed: {}", reason),
        }
    }
}
