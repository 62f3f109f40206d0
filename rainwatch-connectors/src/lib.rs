//! Adapters Between the Rain Engine and the Outside World
//!
//! ## Overview
//!
//! `rainwatch-core` only knows four ports: a humidity sensor, a notifier,
//! a telemetry publisher and an alert signal. This crate implements them
//! for a hosted (`std`) deployment:
//!
//! | Feature  | Adapter                 | Port                   |
//! |----------|-------------------------|------------------------|
//! | `mqtt`   | [`mqtt::MqttTelemetry`]     | `TelemetryPublisher` |
//! | `http`   | [`telegram::TelegramNotifier`] | `Notifier`        |
//! | `replay` | [`replay::ReplaySensor`]    | `HumiditySensor`     |
//! | `gpio`   | [`gpio::SysfsAlertSignal`], [`gpio::LogAlertSignal`] | `AlertSignal` |
//!
//! ## Error Boundary
//!
//! Adapters fail with the rich [`ConnectorError`], log it with full detail,
//! and hand the control loop the compact core error
//! ([`TransportError`] or [`SensorError`](rainwatch_core::SensorError)).
//! The loop never sees an allocation-carrying error.
//!
//! ## Statistics
//!
//! Network adapters keep [`ConnectionStats`] so the daemon can report
//! delivery health without the core engine tracking it.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rainwatch_connectors::telegram::{TelegramConfig, TelegramNotifier};
//! use rainwatch_core::traits::Notifier;
//!
//! let config = TelegramConfig::new("123456:bot-token", ["987654321"]);
//! let mut telegram = TelegramNotifier::new(config)?;
//! telegram.notify("Rain indicator. Humidity is high.")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use rainwatch_core::TransportError;
use thiserror::Error;

#[cfg(feature = "mqtt")]
pub mod mqtt;

#[cfg(feature = "http")]
pub mod telegram;

#[cfg(feature = "replay")]
pub mod replay;

#[cfg(feature = "gpio")]
pub mod gpio;

// Re-export common types
#[cfg(feature = "mqtt")]
pub use mqtt::{MqttConfig, MqttTelemetry};

#[cfg(feature = "http")]
pub use telegram::{TelegramConfig, TelegramNotifier};

#[cfg(feature = "replay")]
pub use replay::ReplaySensor;

#[cfg(feature = "gpio")]
pub use gpio::{LogAlertSignal, SysfsAlertSignal};

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Not connected")]
    NotConnected,

    #[error("Timeout")]
    Timeout,

    #[error("Rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<&ConnectorError> for TransportError {
    fn from(err: &ConnectorError) -> Self {
        match err {
            ConnectorError::NotConnected | ConnectorError::Request(_) => TransportError::Unavailable,
            ConnectorError::Timeout => TransportError::Timeout,
            ConnectorError::Rejected { status, .. } => TransportError::Rejected { status: *status },
            ConnectorError::Protocol(_) => TransportError::Failed { reason: "protocol error" },
            ConnectorError::Config(_) => TransportError::Failed { reason: "misconfigured" },
            ConnectorError::Io(_) => TransportError::Failed { reason: "i/o error" },
            ConnectorError::Serialization(_) => TransportError::Failed { reason: "serialization error" },
        }
    }
}

impl From<ConnectorError> for TransportError {
    fn from(err: ConnectorError) -> Self {
        TransportError::from(&err)
    }
}

/// Connection statistics common to all network adapters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Total messages sent successfully
    pub messages_sent: u64,
    /// Total messages failed to send
    pub messages_failed: u64,
    /// Total payload bytes sent
    pub bytes_sent: u64,
    /// Number of reconnections
    pub reconnections: u32,
    /// Last error message
    pub last_error: Option<String>,
}

impl ConnectionStats {
    pub(crate) fn record_sent(&mut self, bytes: usize) {
        self.messages_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    pub(crate) fn record_failed(&mut self, err: &ConnectorError) {
        self.messages_failed += 1;
        self.last_error = Some(err.to_string());
    }
}

/// Lock shared stats, recovering them if a holder panicked
pub(crate) fn lock_stats(stats: &Mutex<ConnectionStats>) -> MutexGuard<'_, ConnectionStats> {
    stats.lock().unwrap_or_else(PoisonError::into_inner)
}
