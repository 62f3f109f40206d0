//! Measurement Plausibility Checks
//!
//! ## Why Validate Before Classifying?
//!
//! Single-wire humidity sensors like the DHT22 fail in noisy ways: a
//! corrupted frame that still passes the checksum, a brown-out read of
//! 0.0/0.0, or a stuck bus returning 6553.5. Classifying such a reading
//! would either raise a false alarm or reset an active episode. A reading
//! outside what the sensor can physically report is therefore turned into
//! a [`SensorError::Implausible`](crate::SensorError::Implausible), and the
//! control loop treats it exactly like a failed read.
//!
//! ## Limits
//!
//! | Quantity    | Min     | Max    | Source                     |
//! |-------------|---------|--------|----------------------------|
//! | Humidity    | 0 %RH   | 100 %RH| Definition of RH           |
//! | Temperature | -40 °C  | 80 °C  | AM2302/DHT22 datasheet     |
//!
//! ```rust
//! use rainwatch_core::{Measurement, MeasurementValidator, SensorError};
//!
//! let validator = MeasurementValidator::default();
//! assert!(validator.validate(&Measurement::new(65.0, 21.0)).is_ok());
//! assert!(matches!(
//!     validator.validate(&Measurement::new(6553.5, 21.0)),
//!     Err(SensorError::Implausible { quantity: "humidity", .. })
//! ));
//! ```

mod measurement;
mod utils;

pub use measurement::MeasurementValidator;
