//! Shared range checks
//!
//! Pure functions, no allocation. Non-finite values fail every check.

use crate::errors::{SensorError, SensorResult};

/// Check that `value` is a finite number within `[min, max]`.
pub fn check_range(quantity: &'static str, value: f32, min: f32, max: f32) -> SensorResult<()> {
    // NaN fails both comparisons, so test finiteness explicitly
    if !value.is_finite() || value < min || value > max {
        return Err(SensorError::Implausible { quantity, value });
    }
    Ok(())
}
