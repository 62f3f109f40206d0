//! Raw Sensor Measurements
//!
//! A [`Measurement`] is one humidity/temperature pair as read from the
//! sensor. A [`SamplePair`] is the two measurements taken by one sampling
//! pass; the classifier needs both humidity values to see a rapid rise.
//!
//! Measurements live for exactly one cycle. The only one kept past its
//! cycle is the last-known-good copy the control loop publishes when the
//! sensor fails.

use core::fmt::Write;

/// Capacity of an encoded telemetry payload.
///
/// `"-40.0|-40.0"` is the longest a plausible reading gets; the slack
/// covers implausible values that still get published on fault paths.
pub const PAYLOAD_CAPACITY: usize = 32;

/// Telemetry payload without heap allocation
pub type Payload = heapless::String<PAYLOAD_CAPACITY>;

/// One humidity/temperature reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Relative humidity (%RH, 0..=100)
    pub humidity: f32,
    /// Air temperature (°C)
    pub temperature: f32,
}

impl Measurement {
    /// Create a measurement
    pub const fn new(humidity: f32, temperature: f32) -> Self {
        Self { humidity, temperature }
    }

    /// Encode as the telemetry wire format `"<humidity>|<temperature>"`.
    ///
    /// One decimal place, the resolution of the DHT22. Values too large to
    /// fit [`PAYLOAD_CAPACITY`] are truncated, which only happens for
    /// readings the validator would already have rejected.
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        let _ = write!(payload, "{:.1}|{:.1}", self.humidity, self.temperature);
        payload
    }
}

/// Both readings of one sampling pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePair {
    /// Reading taken before the inter-sample delay
    pub first: Measurement,
    /// Reading taken after the inter-sample delay
    pub second: Measurement,
}

impl SamplePair {
    /// Pair two readings
    pub const fn new(first: Measurement, second: Measurement) -> Self {
        Self { first, second }
    }

    /// Pair built from a single reading (no rise can be observed)
    pub const fn single(reading: Measurement) -> Self {
        Self { first: reading, second: reading }
    }

    /// Humidity change across the pass (%RH, positive when rising)
    pub fn humidity_delta(&self) -> f32 {
        self.second.humidity - self.first.humidity
    }

    /// The measurement reported for this pass: the most recent one.
    pub fn latest(&self) -> Measurement {
        self.second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_pipe_delimited() {
        let m = Measurement::new(48.0, 21.5);
        assert_eq!(m.to_payload().as_str(), "48.0|21.5");
    }

    #[test]
    fn payload_handles_negative_temperature() {
        let m = Measurement::new(92.3, -4.2);
        assert_eq!(m.to_payload().as_str(), "92.3|-4.2");
    }

    #[test]
    fn delta_uses_second_minus_first() {
        let pair = SamplePair::new(Measurement::new(40.0, 20.0), Measurement::new(48.0, 19.5));
        assert_eq!(pair.humidity_delta(), 8.0);
        assert_eq!(pair.latest().temperature, 19.5);

        let single = SamplePair::single(Measurement::new(60.0, 18.0));
        assert_eq!(single.humidity_delta(), 0.0);
    }
}
