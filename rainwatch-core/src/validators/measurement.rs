use crate::{
    constants::sensors::{
        HUMIDITY_SENSOR_MIN_PCT, HUMIDITY_SENSOR_MAX_PCT, TEMP_SENSOR_MIN_C, TEMP_SENSOR_MAX_C,
    },
    errors::SensorResult,
    measurement::{Measurement, SamplePair},
};

use super::utils;

/// Range validator for humidity/temperature readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementValidator {
    min_humidity_pct: f32,
    max_humidity_pct: f32,
    min_temp_c: f32,
    max_temp_c: f32,
}

impl Default for MeasurementValidator {
    fn default() -> Self {
        Self {
            min_humidity_pct: HUMIDITY_SENSOR_MIN_PCT,
            max_humidity_pct: HUMIDITY_SENSOR_MAX_PCT,
            min_temp_c: TEMP_SENSOR_MIN_C,
            max_temp_c: TEMP_SENSOR_MAX_C,
        }
    }
}

impl MeasurementValidator {
    /// Validator with a custom temperature range, e.g. for an SHT31
    /// (-40..=125 °C)
    pub fn with_temperature_range(mut self, min_c: f32, max_c: f32) -> Self {
        self.min_temp_c = min_c;
        self.max_temp_c = max_c;
        self
    }

    /// Check one reading
    pub fn validate(&self, m: &Measurement) -> SensorResult<()> {
        utils::check_range("humidity", m.humidity, self.min_humidity_pct, self.max_humidity_pct)?;
        utils::check_range("temperature", m.temperature, self.min_temp_c, self.max_temp_c)
    }

    /// Check both readings of a sampling pass
    pub fn validate_pair(&self, pair: &SamplePair) -> SensorResult<()> {
        self.validate(&pair.first)?;
        self.validate(&pair.second)
    }
}
