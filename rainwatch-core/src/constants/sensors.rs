//! Sensor Specifications and Limits
//!
//! Plausibility limits for the humidity/temperature sensor. Readings
//! outside these bounds are treated as sensor faults, not weather.

// ===== HUMIDITY =====

/// Minimum measurable relative humidity (%).
///
/// Source: Physics (0% RH = no water vapor)
pub const HUMIDITY_SENSOR_MIN_PCT: f32 = 0.0;

/// Maximum measurable relative humidity (%).
///
/// Source: Physics (100% RH = saturated)
pub const HUMIDITY_SENSOR_MAX_PCT: f32 = 100.0;

// ===== TEMPERATURE =====

/// Minimum operating temperature of the DHT22/AM2302 (°C).
///
/// Source: Aosong AM2302 datasheet
pub const TEMP_SENSOR_MIN_C: f32 = -40.0;

/// Maximum operating temperature of the DHT22/AM2302 (°C).
///
/// Source: Aosong AM2302 datasheet
pub const TEMP_SENSOR_MAX_C: f32 = 80.0;
