//! Runtime Configuration
//!
//! Every tunable the engine accepts. Defaults reproduce the reference
//! deployment (see [`constants`](crate::constants)); a deployment only
//! needs to spell out what it changes:
//!
//! ```rust
//! # #[cfg(feature = "serde")] {
//! use rainwatch_core::RainConfig;
//!
//! let config: RainConfig = serde_json::from_str(r#"{
//!     "thresholds": { "high_humidity_pct": 85.0 },
//!     "timing": { "long_poll_ms": 60000 }
//! }"#).unwrap();
//!
//! assert_eq!(config.thresholds.high_humidity_pct, 85.0);
//! assert_eq!(config.thresholds.rise_pct, 5.0);
//! assert!(config.validate().is_ok());
//! # }
//! ```

use crate::{
    classifier::AlertKind,
    constants::{
        thresholds::{
            RISE_THRESHOLD_PCT, HIGH_HUMIDITY_THRESHOLD_PCT, DEW_MARGIN_C,
            RAPID_RISE_CAP, SUSTAINED_HUMIDITY_CAP, NEAR_DEW_POINT_CAP,
        },
        sensors::{HUMIDITY_SENSOR_MIN_PCT, HUMIDITY_SENSOR_MAX_PCT},
        time::{SAMPLE_DELAY_MS, SHORT_POLL_MS, LONG_POLL_MS},
    },
    errors::ConfigError,
    messages::MessageTemplates,
};

/// Classifier thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Thresholds {
    /// Humidity rise within one pass that counts as rapid (%RH, exclusive)
    pub rise_pct: f32,
    /// Humidity at which air counts as saturated (%RH, inclusive)
    pub high_humidity_pct: f32,
    /// Maximum temperature/dew point spread for the dew point rule (°C, inclusive)
    pub dew_margin_c: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            rise_pct: RISE_THRESHOLD_PCT,
            high_humidity_pct: HIGH_HUMIDITY_THRESHOLD_PCT,
            dew_margin_c: DEW_MARGIN_C,
        }
    }
}

/// Maximum notifications per episode, per indicator kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct NotificationCaps {
    /// Cap for [`AlertKind::RapidHumidityRise`]
    pub rapid_humidity_rise: u32,
    /// Cap for [`AlertKind::SustainedHighHumidity`]
    pub sustained_high_humidity: u32,
    /// Cap for [`AlertKind::NearDewPoint`]
    pub near_dew_point: u32,
}

impl Default for NotificationCaps {
    fn default() -> Self {
        Self {
            rapid_humidity_rise: RAPID_RISE_CAP,
            sustained_high_humidity: SUSTAINED_HUMIDITY_CAP,
            near_dew_point: NEAR_DEW_POINT_CAP,
        }
    }
}

impl NotificationCaps {
    /// Cap for one kind
    pub fn for_kind(&self, kind: AlertKind) -> u32 {
        match kind {
            AlertKind::RapidHumidityRise => self.rapid_humidity_rise,
            AlertKind::SustainedHighHumidity => self.sustained_high_humidity,
            AlertKind::NearDewPoint => self.near_dew_point,
        }
    }
}

/// Cycle timing, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Timing {
    /// Delay between the two reads of a sampling pass
    pub sample_delay_ms: u64,
    /// Sleep after a cycle with no active indicator
    pub short_poll_ms: u64,
    /// Sleep after a cycle with an active indicator
    pub long_poll_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            sample_delay_ms: SAMPLE_DELAY_MS,
            short_poll_ms: SHORT_POLL_MS,
            long_poll_ms: LONG_POLL_MS,
        }
    }
}

/// How each cycle samples the sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SamplingPolicy {
    /// Take a single reading, without the inter-sample delay, while an
    /// indicator is already active. Saves the delay on every alert cycle
    /// at the cost of not detecting a second rapid rise.
    pub skip_rise_check_when_active: bool,
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct RainConfig {
    /// Classifier thresholds
    pub thresholds: Thresholds,
    /// Per-kind notification caps
    pub caps: NotificationCaps,
    /// Cycle timing
    pub timing: Timing,
    /// Sampling policy
    pub sampling: SamplingPolicy,
    /// Notification texts
    pub messages: MessageTemplates,
}

impl RainConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;

        check_non_negative("rise_pct", t.rise_pct)?;
        check_non_negative("dew_margin_c", t.dew_margin_c)?;

        if !(HUMIDITY_SENSOR_MIN_PCT..=HUMIDITY_SENSOR_MAX_PCT).contains(&t.high_humidity_pct) {
            return Err(ConfigError::InvalidThreshold {
                name: "high_humidity_pct",
                value: t.high_humidity_pct,
            });
        }

        if self.timing.short_poll_ms == 0 {
            return Err(ConfigError::ZeroInterval { name: "short_poll_ms" });
        }
        if self.timing.long_poll_ms == 0 {
            return Err(ConfigError::ZeroInterval { name: "long_poll_ms" });
        }

        Ok(())
    }
}

fn check_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}
