//! `rainwatch` -- rain alert daemon.
//!
//! Samples a humidity/temperature sensor, raises rain indicators, sends
//! throttled alerts to Telegram chats, publishes every reading over MQTT
//! and drives an indicator LED.
//!
//! # Usage
//!
//! ```text
//! rainwatch [CONFIG]        # default: rainwatch.json
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `rainwatch=info`).

mod config;

use rainwatch_connectors::{
    LogAlertSignal, MqttTelemetry, SysfsAlertSignal, TelegramNotifier,
};
use rainwatch_core::{time::StdDelay, traits::AlertSignal, RainMonitor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AlertSignalConfig, DaemonConfig, DEFAULT_CONFIG_PATH};

/// Indicator chosen at startup
enum Indicator {
    Gpio(SysfsAlertSignal),
    Log(LogAlertSignal),
}

impl From<Option<AlertSignalConfig>> for Indicator {
    fn from(config: Option<AlertSignalConfig>) -> Self {
        match config {
            Some(gpio) => Self::Gpio(SysfsAlertSignal::new(gpio.path).active_low(gpio.active_low)),
            None => Self::Log(LogAlertSignal::new()),
        }
    }
}

impl AlertSignal for Indicator {
    fn set_alert_signal(&mut self, on: bool) {
        match self {
            Self::Gpio(signal) => signal.set_alert_signal(on),
            Self::Log(signal) => signal.set_alert_signal(on),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rainwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());
    let config = DaemonConfig::load(&config_path)?;

    let sensor = config.sensor.open()?;

    if config.telegram.is_none() {
        tracing::warn!("No telegram section, alerts will only be logged");
    }
    let notifier = config.telegram.map(TelegramNotifier::new).transpose()?;

    if config.mqtt.is_none() {
        tracing::info!("No mqtt section, telemetry disabled");
    }
    let publisher = config.mqtt.map(MqttTelemetry::connect).transpose()?;

    let signal = Indicator::from(config.alert_signal);

    tracing::info!(
        config = %config_path,
        short_poll_ms = config.monitor.timing.short_poll_ms,
        long_poll_ms = config.monitor.timing.long_poll_ms,
        chats = notifier.as_ref().map_or(0, |n| n.chat_ids().len()),
        "Starting rainwatch {}",
        rainwatch_core::VERSION,
    );

    let mut monitor = RainMonitor::new(config.monitor, sensor, notifier, publisher, signal, StdDelay)?;
    monitor.run()
}
