//! Common test doubles for integration tests
//!
//! Every collaborator is a cheap clonable handle over shared state, so a
//! test can hand one clone to the monitor and keep another to inspect what
//! the monitor did between ticks.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use rainwatch_core::{
    time::{Delay, Millis},
    traits::{AlertSignal, HumiditySensor, Notifier, TelemetryPublisher},
    Measurement, RainConfig, RainMonitor, SensorError, TransportError,
};

pub mod scenarios;

/// Sensor replaying a script of readings. Runs dry with `Timeout`.
#[derive(Clone, Default)]
pub struct ScriptedSensor {
    readings: Rc<RefCell<VecDeque<Result<Measurement, SensorError>>>>,
}

impl ScriptedSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one reading
    pub fn push(&self, humidity: f32, temperature: f32) {
        self.readings
            .borrow_mut()
            .push_back(Ok(Measurement::new(humidity, temperature)));
    }

    /// Queue both reads of one sampling pass
    pub fn push_pass(&self, first_humidity: f32, second_humidity: f32, temperature: f32) {
        self.push(first_humidity, temperature);
        self.push(second_humidity, temperature);
    }

    /// Queue a steady pass (no humidity change)
    pub fn push_steady(&self, humidity: f32, temperature: f32) {
        self.push_pass(humidity, humidity, temperature);
    }

    /// Queue a failed read
    pub fn push_error(&self, err: SensorError) {
        self.readings.borrow_mut().push_back(Err(err));
    }

    /// Readings not consumed yet
    pub fn remaining(&self) -> usize {
        self.readings.borrow().len()
    }
}

impl HumiditySensor for ScriptedSensor {
    fn read_measurement(&mut self) -> Result<Measurement, SensorError> {
        self.readings
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(SensorError::Timeout))
    }
}

/// Notifier recording every delivered message
#[derive(Clone, Default)]
pub struct Outbox {
    messages: Rc<RefCell<Vec<String>>>,
    attempts: Rc<Cell<usize>>,
    failing: Rc<Cell<bool>>,
}

impl Outbox {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }

    /// Make every delivery fail until switched back
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl Notifier for Outbox {
    fn notify(&mut self, text: &str) -> Result<(), TransportError> {
        self.attempts.set(self.attempts.get() + 1);
        if self.failing.get() {
            return Err(TransportError::Unavailable);
        }
        self.messages.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Telemetry sink recording every published pair
#[derive(Clone, Default)]
pub struct TelemetryLog {
    pairs: Rc<RefCell<Vec<(f32, f32)>>>,
    failing: Rc<Cell<bool>>,
}

impl TelemetryLog {
    pub fn pairs(&self) -> Vec<(f32, f32)> {
        self.pairs.borrow().clone()
    }

    pub fn last(&self) -> Option<(f32, f32)> {
        self.pairs.borrow().last().copied()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl TelemetryPublisher for TelemetryLog {
    fn publish(&mut self, humidity: f32, temperature: f32) -> Result<(), TransportError> {
        if self.failing.get() {
            return Err(TransportError::Timeout);
        }
        self.pairs.borrow_mut().push((humidity, temperature));
        Ok(())
    }
}

/// Indicator LED double
#[derive(Clone, Default)]
pub struct Indicator {
    on: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl Indicator {
    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl AlertSignal for Indicator {
    fn set_alert_signal(&mut self, on: bool) {
        self.on.set(on);
        self.writes.set(self.writes.get() + 1);
    }
}

/// Delay recording requested waits instead of sleeping
#[derive(Clone, Default)]
pub struct RecordingDelay {
    waits: Rc<RefCell<Vec<Millis>>>,
}

impl RecordingDelay {
    pub fn waits(&self) -> Vec<Millis> {
        self.waits.borrow().clone()
    }

    pub fn total(&self) -> Millis {
        self.waits.borrow().iter().sum()
    }
}

impl Delay for RecordingDelay {
    fn delay_ms(&mut self, ms: Millis) {
        self.waits.borrow_mut().push(ms);
    }
}

pub type TestMonitor = RainMonitor<ScriptedSensor, Outbox, TelemetryLog, Indicator, RecordingDelay>;

/// A monitor and handles to all of its collaborators
pub struct Rig {
    pub monitor: TestMonitor,
    pub sensor: ScriptedSensor,
    pub outbox: Outbox,
    pub telemetry: TelemetryLog,
    pub indicator: Indicator,
    pub delay: RecordingDelay,
}

impl Rig {
    pub fn new(config: RainConfig) -> Self {
        let sensor = ScriptedSensor::new();
        let outbox = Outbox::default();
        let telemetry = TelemetryLog::default();
        let indicator = Indicator::default();
        let delay = RecordingDelay::default();

        let monitor = RainMonitor::new(
            config,
            sensor.clone(),
            outbox.clone(),
            telemetry.clone(),
            indicator.clone(),
            delay.clone(),
        )
        .expect("test config is valid");

        Self { monitor, sensor, outbox, telemetry, indicator, delay }
    }

    pub fn with_defaults() -> Self {
        Self::new(RainConfig::default())
    }
}
