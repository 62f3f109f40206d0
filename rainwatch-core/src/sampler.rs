//! Two-Read Sampling Pass
//!
//! A rapid humidity rise is only visible across two reads taken a few
//! seconds apart. [`Sampler::sample`] reads, waits the inter-sample delay,
//! reads again, and hands back both readings as a [`SamplePair`]; nothing
//! depends on call order against a shared sensor handle.
//!
//! ```text
//! read ──► delay_ms(sample_delay) ──► read ──► SamplePair { first, second }
//! ```
//!
//! If either read fails the pass fails. The delay still happened when the
//! second read fails, which keeps the cycle length predictable.

use crate::{
    errors::SensorResult,
    measurement::SamplePair,
    time::{Delay, Millis},
    traits::HumiditySensor,
};

/// Stateless sampling pass with a fixed inter-sample delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    delay_ms: Millis,
}

impl Sampler {
    /// Sampler waiting `delay_ms` between its two reads
    pub const fn new(delay_ms: Millis) -> Self {
        Self { delay_ms }
    }

    /// Inter-sample delay
    pub fn delay_ms(&self) -> Millis {
        self.delay_ms
    }

    /// Read, wait, read again.
    pub fn sample<S, D>(&self, sensor: &mut S, delay: &mut D) -> SensorResult<SamplePair>
    where
        S: HumiditySensor + ?Sized,
        D: Delay + ?Sized,
    {
        let first = sensor.read_measurement()?;
        delay.delay_ms(self.delay_ms);
        let second = sensor.read_measurement()?;
        Ok(SamplePair::new(first, second))
    }

    /// Single read without delay. Both halves of the pair are the same
    /// reading, so no rise can be detected.
    pub fn sample_once<S>(&self, sensor: &mut S) -> SensorResult<SamplePair>
    where
        S: HumiditySensor + ?Sized,
    {
        sensor.read_measurement().map(SamplePair::single)
    }
}
