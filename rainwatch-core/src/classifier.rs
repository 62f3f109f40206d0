//! Rain Indicator Classification
//!
//! ## Rules
//!
//! One sampling pass yields two humidity readings a few seconds apart and
//! the latest temperature. The classifier maps them to exactly one
//! [`Classification`], checking rules in a fixed priority order and
//! stopping at the first match:
//!
//! | Priority | Rule                                            | Result                  |
//! |----------|-------------------------------------------------|-------------------------|
//! | 1        | `second - first > rise_pct`                     | `RapidHumidityRise`     |
//! | 2        | `second >= high_humidity_pct`                   | `SustainedHighHumidity` |
//! | 3        | `T - Td <= dew_margin_c`                        | `NearDewPoint`          |
//! | 4        | otherwise                                       | `NoRain`                |
//!
//! A pair can satisfy several rules at once (a fast rise to 95% also meets
//! rule 2); only the highest priority one is reported.
//!
//! ## Dew Point
//!
//! The dew point uses the linear approximation
//! `Td = T - (100 - RH) / 5`, so the spread `T - Td` depends on humidity
//! alone. With the default margin of 2.35°C, rule 3 fires from about
//! 88.25% RH, just below the sustained-humidity rule.
//!
//! ```rust
//! use rainwatch_core::{Classifier, Classification};
//!
//! let classifier = Classifier::default();
//! let c = classifier.classify(40.0, 48.0, 20.0);
//! assert!(matches!(c, Classification::RapidHumidityRise { humidity, .. } if humidity == 48.0));
//! ```

use crate::{
    config::Thresholds,
    constants::thresholds::{DEW_POINT_DIVISOR, SATURATION_HUMIDITY_PCT},
    measurement::{Measurement, SamplePair},
};

/// The three rain indicators, i.e. every classification except `NoRain`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlertKind {
    /// Humidity jumped within one sampling pass
    RapidHumidityRise,
    /// Humidity at or above the high-water mark
    SustainedHighHumidity,
    /// Temperature close to the dew point
    NearDewPoint,
}

impl AlertKind {
    /// Every kind, in classifier priority order
    pub const ALL: [AlertKind; 3] = [
        AlertKind::RapidHumidityRise,
        AlertKind::SustainedHighHumidity,
        AlertKind::NearDewPoint,
    ];

    /// Number of kinds
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index, used for per-kind tables
    pub const fn index(self) -> usize {
        match self {
            AlertKind::RapidHumidityRise => 0,
            AlertKind::SustainedHighHumidity => 1,
            AlertKind::NearDewPoint => 2,
        }
    }

    /// Canonical human-readable description
    pub const fn description(self) -> &'static str {
        match self {
            AlertKind::RapidHumidityRise => "Rain indicator. Humidity rose rapidly.",
            AlertKind::SustainedHighHumidity => "Rain indicator. Humidity is high.",
            AlertKind::NearDewPoint => "Rain indicator. Conditions are close to the dew point.",
        }
    }

    /// Short machine name for logs
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertKind::RapidHumidityRise => "rapid_humidity_rise",
            AlertKind::SustainedHighHumidity => "sustained_high_humidity",
            AlertKind::NearDewPoint => "near_dew_point",
        }
    }
}

impl core::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    /// No indicator triggered
    NoRain,
    /// Humidity rose by more than the rise threshold within one pass
    RapidHumidityRise {
        /// Humidity after the rise (%RH)
        humidity: f32,
        /// Temperature (°C)
        temperature: f32,
    },
    /// Humidity at or above the high-humidity threshold
    SustainedHighHumidity {
        /// Humidity (%RH)
        humidity: f32,
        /// Temperature (°C)
        temperature: f32,
    },
    /// Temperature within the dew margin of the dew point
    NearDewPoint {
        /// Humidity (%RH)
        humidity: f32,
        /// Temperature (°C)
        temperature: f32,
    },
}

/// Description used when no indicator is active
pub const NO_RAIN_DESCRIPTION: &str = "No sign of rain at the moment.";

impl Classification {
    fn alert(kind: AlertKind, humidity: f32, temperature: f32) -> Self {
        match kind {
            AlertKind::RapidHumidityRise => Self::RapidHumidityRise { humidity, temperature },
            AlertKind::SustainedHighHumidity => Self::SustainedHighHumidity { humidity, temperature },
            AlertKind::NearDewPoint => Self::NearDewPoint { humidity, temperature },
        }
    }

    /// Indicator kind, `None` for `NoRain`
    pub fn kind(&self) -> Option<AlertKind> {
        match self {
            Self::NoRain => None,
            Self::RapidHumidityRise { .. } => Some(AlertKind::RapidHumidityRise),
            Self::SustainedHighHumidity { .. } => Some(AlertKind::SustainedHighHumidity),
            Self::NearDewPoint { .. } => Some(AlertKind::NearDewPoint),
        }
    }

    /// Whether an indicator is active
    pub fn is_alert(&self) -> bool {
        !matches!(self, Self::NoRain)
    }

    /// Measurement that produced an alert, `None` for `NoRain`
    pub fn measurement(&self) -> Option<Measurement> {
        match *self {
            Self::NoRain => None,
            Self::RapidHumidityRise { humidity, temperature }
            | Self::SustainedHighHumidity { humidity, temperature }
            | Self::NearDewPoint { humidity, temperature } => {
                Some(Measurement::new(humidity, temperature))
            }
        }
    }

    /// Canonical human-readable description
    pub fn description(&self) -> &'static str {
        self.kind().map_or(NO_RAIN_DESCRIPTION, AlertKind::description)
    }
}

/// Approximate dew point (°C) from temperature (°C) and relative humidity (%).
pub fn dew_point(temperature: f32, humidity: f32) -> f32 {
    temperature - ((SATURATION_HUMIDITY_PCT - humidity) / DEW_POINT_DIVISOR)
}

/// Stateless rule evaluator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Classifier {
    thresholds: Thresholds,
}

impl Classifier {
    /// Classifier with custom thresholds
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Active thresholds
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Classify two humidity readings and the latest temperature.
    ///
    /// Total and side-effect free: non-finite inputs fail every comparison
    /// and classify as `NoRain`.
    pub fn classify(&self, first_humidity: f32, second_humidity: f32, temperature: f32) -> Classification {
        Self::matching_rule(&self.thresholds, first_humidity, second_humidity, temperature)
            .map_or(Classification::NoRain, |kind| {
                Classification::alert(kind, second_humidity, temperature)
            })
    }

    /// Classify one sampling pass
    pub fn classify_pair(&self, pair: &SamplePair) -> Classification {
        self.classify(pair.first.humidity, pair.second.humidity, pair.second.temperature)
    }

    fn matching_rule(t: &Thresholds, first: f32, second: f32, temperature: f32) -> Option<AlertKind> {
        if second - first > t.rise_pct {
            return Some(AlertKind::RapidHumidityRise);
        }

        if second >= t.high_humidity_pct {
            return Some(AlertKind::SustainedHighHumidity);
        }

        if temperature - dew_point(temperature, second) <= t.dew_margin_c {
            return Some(AlertKind::NearDewPoint);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_rise_reports_second_humidity() {
        let c = Classifier::default().classify(40.0, 48.0, 20.0);
        assert_eq!(c, Classification::RapidHumidityRise { humidity: 48.0, temperature: 20.0 });
    }

    #[test]
    fn rise_of_exactly_threshold_is_not_rapid() {
        let c = Classifier::default().classify(50.0, 55.0, 20.0);
        assert_eq!(c, Classification::NoRain);
    }

    #[test]
    fn rapid_rise_outranks_high_humidity() {
        let c = Classifier::default().classify(85.0, 95.0, 20.0);
        assert_eq!(c.kind(), Some(AlertKind::RapidHumidityRise));
    }

    #[test]
    fn high_humidity_threshold_is_inclusive() {
        let c = Classifier::default().classify(90.0, 90.0, 20.0);
        assert_eq!(c.kind(), Some(AlertKind::SustainedHighHumidity));
    }

    #[test]
    fn near_dew_point_below_high_humidity() {
        // spread = (100 - 89) / 5 = 2.2 <= 2.35
        let c = Classifier::default().classify(89.0, 89.0, 15.0);
        assert_eq!(c, Classification::NearDewPoint { humidity: 89.0, temperature: 15.0 });

        // spread = (100 - 88) / 5 = 2.4 > 2.35
        let c = Classifier::default().classify(88.0, 88.0, 15.0);
        assert_eq!(c, Classification::NoRain);
    }

    #[test]
    fn dew_point_formula() {
        assert_eq!(dew_point(18.0, 60.0), 10.0);
        assert_eq!(dew_point(14.0, 70.0), 8.0);
    }

    #[test]
    fn falling_humidity_is_never_a_rise() {
        let c = Classifier::default().classify(70.0, 40.0, 25.0);
        assert_eq!(c, Classification::NoRain);
    }

    #[test]
    fn nan_classifies_as_no_rain() {
        let c = Classifier::default().classify(f32::NAN, f32::NAN, f32::NAN);
        assert_eq!(c, Classification::NoRain);
    }

    #[test]
    fn custom_thresholds_apply() {
        let classifier = Classifier::new(Thresholds {
            rise_pct: 2.0,
            high_humidity_pct: 80.0,
            dew_margin_c: 1.0,
        });
        assert_eq!(classifier.classify(50.0, 53.0, 20.0).kind(), Some(AlertKind::RapidHumidityRise));
        assert_eq!(classifier.classify(80.0, 80.0, 20.0).kind(), Some(AlertKind::SustainedHighHumidity));
    }

    #[test]
    fn descriptions_are_distinct() {
        assert_eq!(Classification::NoRain.description(), NO_RAIN_DESCRIPTION);
        for kind in AlertKind::ALL {
            assert_ne!(kind.description(), NO_RAIN_DESCRIPTION);
            assert_eq!(AlertKind::ALL[kind.index()], kind);
        }
    }
}
