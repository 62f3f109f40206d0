//! Time-Related Constants
//!
//! Polling intervals and the inter-sample delay used by the control loop.
//! All values are in milliseconds.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

// ===== CYCLE TIMING =====

/// Delay between the two reads of one sampling pass (milliseconds).
///
/// Long enough for a DHT22 to produce a fresh reading (the sensor refuses
/// reads closer than 2 s apart) and short enough that a humidity jump over
/// this window is meaningful.
///
/// Source: Aosong AM2302/DHT22 datasheet, "collecting period ≥ 2 s"
pub const SAMPLE_DELAY_MS: u64 = 3 * MS_PER_SECOND;

/// Poll interval while no rain indicator is active (milliseconds).
pub const SHORT_POLL_MS: u64 = 5 * MS_PER_SECOND;

/// Poll interval while a rain indicator is active (milliseconds).
///
/// Conditions change slowly once an alert is raised; polling less often
/// also spaces out the update notifications.
pub const LONG_POLL_MS: u64 = 10 * MS_PER_SECOND;
