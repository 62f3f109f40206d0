//! Collaborator Ports
//!
//! The engine never touches hardware or the network itself. It drives four
//! ports, implemented by adapters (see the `rainwatch-connectors` crate)
//! or by test doubles:
//!
//! | Port                   | Capability                         | Failure           |
//! |------------------------|------------------------------------|-------------------|
//! | [`HumiditySensor`]     | one blocking humidity/temp read    | [`SensorError`]   |
//! | [`Notifier`]           | deliver a human-readable message   | [`TransportError`]|
//! | [`TelemetryPublisher`] | emit a humidity/temperature pair   | [`TransportError`]|
//! | [`AlertSignal`]        | switch the indicator on or off     | infallible        |
//!
//! Ports are generic parameters of the control loop, so adapters are
//! statically dispatched and a `no_std` target pays for nothing it does
//! not use.
//!
//! Sensor drivers are not assumed reentrant: the control loop is the
//! sensor's only owner and never reads it concurrently.

use crate::{
    errors::{SensorError, TransportError},
    measurement::Measurement,
};

pub use crate::time::Delay;

/// Humidity/temperature sensor
pub trait HumiditySensor {
    /// Perform one blocking read
    fn read_measurement(&mut self) -> Result<Measurement, SensorError>;
}

/// Human-readable notification channel
///
/// Delivery is best effort. Fan-out to several recipients and delivery
/// confirmation are the implementation's concern.
pub trait Notifier {
    /// Deliver one message
    fn notify(&mut self, text: &str) -> Result<(), TransportError>;
}

/// Telemetry sink for raw readings
pub trait TelemetryPublisher {
    /// Emit one humidity/temperature pair
    fn publish(&mut self, humidity: f32, temperature: f32) -> Result<(), TransportError>;
}

/// Binary alert output, e.g. an indicator LED
pub trait AlertSignal {
    /// Turn the signal on or off
    fn set_alert_signal(&mut self, on: bool);
}

impl<T: HumiditySensor + ?Sized> HumiditySensor for &mut T {
    fn read_measurement(&mut self) -> Result<Measurement, SensorError> {
        (**self).read_measurement()
    }
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn notify(&mut self, text: &str) -> Result<(), TransportError> {
        (**self).notify(text)
    }
}

impl<T: TelemetryPublisher + ?Sized> TelemetryPublisher for &mut T {
    fn publish(&mut self, humidity: f32, temperature: f32) -> Result<(), TransportError> {
        (**self).publish(humidity, temperature)
    }
}

impl<T: AlertSignal + ?Sized> AlertSignal for &mut T {
    fn set_alert_signal(&mut self, on: bool) {
        (**self).set_alert_signal(on)
    }
}

/// An absent notifier accepts and drops every message.
impl<T: Notifier> Notifier for Option<T> {
    fn notify(&mut self, text: &str) -> Result<(), TransportError> {
        match self {
            Some(inner) => inner.notify(text),
            None => Ok(()),
        }
    }
}

/// An absent publisher accepts and drops every pair.
impl<T: TelemetryPublisher> TelemetryPublisher for Option<T> {
    fn publish(&mut self, humidity: f32, temperature: f32) -> Result<(), TransportError> {
        match self {
            Some(inner) => inner.publish(humidity, temperature),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(usize);

    impl Notifier for Counter {
        fn notify(&mut self, _text: &str) -> Result<(), TransportError> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn optional_notifier() {
        let mut absent: Option<Counter> = None;
        assert!(absent.notify("dropped").is_ok());

        let mut present = Some(Counter(0));
        present.notify("kept").unwrap();
        assert_eq!(present.map(|c| c.0), Some(1));
    }
}
