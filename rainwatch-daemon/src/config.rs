//! Daemon configuration file
//!
//! One JSON document. Every section is optional; a missing `telegram` or
//! `mqtt` section disables that channel and a missing `alert_signal` only
//! logs indicator changes.
//!
//! ```json
//! {
//!   "monitor":      { "caps": { "sustained_high_humidity": 3 } },
//!   "sensor":       { "kind": "replay", "path": "readings.jsonl", "looping": true },
//!   "mqtt":         { "host": "broker.local", "topic": "garden/rain" },
//!   "telegram":     { "token": "123456:bot-token", "chat_ids": ["987654321"] },
//!   "alert_signal": { "path": "/sys/class/gpio/gpio2/value" }
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use rainwatch_connectors::{MqttConfig, ReplaySensor, TelegramConfig};
use rainwatch_core::RainConfig;
use serde::Deserialize;

/// Path used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "rainwatch.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonConfig {
    pub monitor: RainConfig,
    pub sensor: SensorConfig,
    pub mqtt: Option<MqttConfig>,
    pub telegram: Option<TelegramConfig>,
    pub alert_signal: Option<AlertSignalConfig>,
}

/// Where readings come from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorConfig {
    /// JSON Lines recording
    Replay {
        path: PathBuf,
        #[serde(default)]
        looping: bool,
    },
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::Replay { path: PathBuf::from("readings.jsonl"), looping: false }
    }
}

impl SensorConfig {
    pub fn open(&self) -> anyhow::Result<ReplaySensor> {
        match self {
            Self::Replay { path, looping } => ReplaySensor::open(path, *looping)
                .with_context(|| format!("opening replay file {}", path.display())),
        }
    }
}

/// sysfs GPIO value file driving the indicator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertSignalConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub active_low: bool,
}

impl DaemonConfig {
    /// Read and validate the configuration at `path`
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("loading config file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid JSON")?;
        config.monitor.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DaemonConfig::parse("{}").unwrap();

        assert_eq!(config.monitor, RainConfig::default());
        assert_eq!(config.sensor, SensorConfig::default());
        assert!(config.mqtt.is_none());
        assert!(config.telegram.is_none());
        assert!(config.alert_signal.is_none());
    }

    #[test]
    fn full_document() {
        let config = DaemonConfig::parse(
            r#"{
                "monitor": { "caps": { "sustained_high_humidity": 3 } },
                "sensor": { "kind": "replay", "path": "/var/lib/rainwatch/readings.jsonl", "looping": true },
                "mqtt": { "host": "broker.local", "topic": "garden/rain" },
                "telegram": { "token": "123:abc", "chat_ids": ["1", "2"] },
                "alert_signal": { "path": "/sys/class/gpio/gpio2/value", "active_low": true }
            }"#,
        )
        .unwrap();

        assert_eq!(config.monitor.caps.sustained_high_humidity, 3);
        assert_eq!(config.monitor.caps.rapid_humidity_rise, 1);
        assert_eq!(
            config.sensor,
            SensorConfig::Replay {
                path: PathBuf::from("/var/lib/rainwatch/readings.jsonl"),
                looping: true,
            }
        );
        assert_eq!(config.mqtt.map(|m| m.topic).as_deref(), Some("garden/rain"));
        assert_eq!(config.telegram.map(|t| t.chat_ids.len()), Some(2));
        assert!(config.alert_signal.is_some_and(|s| s.active_low));
    }

    #[test]
    fn invalid_monitor_settings_are_rejected() {
        let err = DaemonConfig::parse(r#"{ "monitor": { "timing": { "short_poll_ms": 0 } } }"#);
        assert!(err.is_err());
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(DaemonConfig::parse(r#"{ "telegarm": {} }"#).is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "monitor": {{ "timing": {{ "long_poll_ms": 60000 }} }} }}"#).unwrap();

        let config = DaemonConfig::load(file.path()).unwrap();
        assert_eq!(config.monitor.timing.long_poll_ms, 60_000);

        assert!(DaemonConfig::load(file.path().with_extension("missing")).is_err());
    }

    #[test]
    fn replay_sensor_opens_from_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"humidity": 50.0, "temperature": 20.0}}"#).unwrap();

        let sensor = SensorConfig::Replay { path: file.path().to_path_buf(), looping: true }
            .open()
            .unwrap();
        assert_eq!(sensor.len(), 1);
    }
}
