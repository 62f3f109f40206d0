//! Rain Indicator Thresholds and Notification Caps
//!
//! Default values for the classifier rules and the per-kind notification
//! caps. Every value here can be overridden through
//! [`RainConfig`](crate::config::RainConfig); these are the values used by
//! the reference deployment (DHT22 sensor, outdoor balcony mount).

// ===== CLASSIFIER RULES =====

/// Humidity increase between the two samples of one cycle that counts as a
/// rapid rise (%RH, exclusive).
///
/// A jump of more than 5 points within a few seconds usually means a rain
/// front or a shower arriving. Slower drifts are caught by the other rules.
pub const RISE_THRESHOLD_PCT: f32 = 5.0;

/// Relative humidity at or above which the air is considered persistently
/// saturated (%RH, inclusive).
pub const HIGH_HUMIDITY_THRESHOLD_PCT: f32 = 90.0;

/// Maximum spread between air temperature and estimated dew point that
/// still counts as "near dew point" (°C, inclusive).
pub const DEW_MARGIN_C: f32 = 2.35;

/// Divisor of the simple dew point approximation
/// `Td = T - (100 - RH) / 5`.
///
/// Accurate to about ±1°C for RH above 50%, which is the only region the
/// dew point rule can fire in.
///
/// Source: Lawrence, M. G. (2005), BAMS 86(2), "The Relationship between
/// Relative Humidity and the Dewpoint Temperature in Moist Air"
pub const DEW_POINT_DIVISOR: f32 = 5.0;

/// Saturation humidity used by the dew point approximation (%RH).
pub const SATURATION_HUMIDITY_PCT: f32 = 100.0;

// ===== NOTIFICATION CAPS =====

/// Notifications per episode for a rapid humidity rise.
///
/// A rise is an event, not a state; repeating it adds nothing.
pub const RAPID_RISE_CAP: u32 = 1;

/// Notifications per episode for sustained high humidity.
pub const SUSTAINED_HUMIDITY_CAP: u32 = 5;

/// Notifications per episode for near dew point conditions.
pub const NEAR_DEW_POINT_CAP: u32 = 1;
