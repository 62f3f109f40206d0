//! Control Loop
//!
//! ## Cycle
//!
//! [`RainMonitor`] owns the sensor, the collaborators and the
//! [`ThrottleState`], and runs one strictly sequential cycle at a time:
//!
//! ```text
//!            ┌──────────────────────────────────────────────────────────┐
//!            ▼                                                          │
//!   sample ─► validate ─► classify ─► publish ─┬─► alert-active ─► sleep(long)
//!      │          │                            └─► alert-clear  ─► sleep(short)
//!      └──────────┴─► sensor fault ─► publish last-known-good ─► sleep(unchanged)
//! ```
//!
//! - **Alert-active**: signal on, ask the throttle, send the onset bundle
//!   (preamble, tips, status) or the status line alone, or nothing.
//! - **Alert-clear**: signal off, every throttle counter back to zero.
//! - **Sensor fault**: no classification, so alert state, signal and
//!   counters are left exactly as they were.
//!
//! Telemetry is published every cycle regardless of classification or
//! throttling. Transport failures are logged and counted in the
//! [`CycleReport`]; they never abort the cycle and never roll back a
//! throttle counter.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # #[cfg(feature = "std")] {
//! use rainwatch_core::{RainConfig, RainMonitor, time::StdDelay};
//! # use rainwatch_core::{traits::*, Measurement, SensorError, TransportError};
//! # struct Dht22; impl HumiditySensor for Dht22 { fn read_measurement(&mut self) -> Result<Measurement, SensorError> { Ok(Measurement::new(50.0, 20.0)) } }
//! # struct Led; impl AlertSignal for Led { fn set_alert_signal(&mut self, _on: bool) {} }
//! # struct Chat; impl Notifier for Chat { fn notify(&mut self, _t: &str) -> Result<(), TransportError> { Ok(()) } }
//! # struct Broker; impl TelemetryPublisher for Broker { fn publish(&mut self, _h: f32, _t: f32) -> Result<(), TransportError> { Ok(()) } }
//!
//! let mut monitor = RainMonitor::new(
//!     RainConfig::default(),
//!     Dht22,
//!     Chat,
//!     Broker,
//!     Led,
//!     StdDelay,
//! )?;
//!
//! monitor.run()
//! # }
//! # Ok::<(), rainwatch_core::ConfigError>(())
//! ```

use crate::{
    classifier::{AlertKind, Classification, Classifier},
    config::{RainConfig, SamplingPolicy, Timing},
    errors::{ConfigError, SensorError, SensorResult, TransportError},
    measurement::{Measurement, SamplePair},
    messages::MessageTemplates,
    sampler::Sampler,
    throttle::{NotifyDecision, ThrottleState},
    time::{Delay, Millis},
    traits::{AlertSignal, HumiditySensor, Notifier, TelemetryPublisher},
    validators::MeasurementValidator,
};

/// How a cycle ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// An indicator is active
    AlertActive(AlertKind),
    /// No indicator is active
    AlertClear,
    /// The sampling pass failed; nothing was classified
    SensorFault(SensorError),
}

/// Everything one cycle did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// How the cycle ended
    pub outcome: CycleOutcome,
    /// Classification, `None` on sensor fault
    pub classification: Option<Classification>,
    /// Throttle decision, silent unless an indicator is active
    pub decision: NotifyDecision,
    /// Notifications delivered
    pub notifications_sent: usize,
    /// Notifications that failed to deliver
    pub notifications_failed: usize,
    /// Telemetry result, `None` when there was nothing to publish
    pub published: Option<Result<(), TransportError>>,
    /// Sleep before the next cycle
    pub next_delay_ms: Millis,
}

/// The rain monitor control loop
pub struct RainMonitor<S, N, P, A, D> {
    sensor: S,
    notifier: N,
    publisher: P,
    signal: A,
    delay: D,

    classifier: Classifier,
    sampler: Sampler,
    validator: MeasurementValidator,
    messages: MessageTemplates,
    timing: Timing,
    sampling: SamplingPolicy,

    throttle: ThrottleState,
    alert_active: bool,
    last_good: Option<Measurement>,
    next_delay_ms: Millis,
    cycles: u64,
}

impl<S, N, P, A, D> RainMonitor<S, N, P, A, D>
where
    S: HumiditySensor,
    N: Notifier,
    P: TelemetryPublisher,
    A: AlertSignal,
    D: Delay,
{
    /// Build a monitor after validating `config`.
    pub fn new(
        config: RainConfig,
        sensor: S,
        notifier: N,
        publisher: P,
        signal: A,
        delay: D,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            sensor,
            notifier,
            publisher,
            signal,
            delay,
            classifier: Classifier::new(config.thresholds),
            sampler: Sampler::new(config.timing.sample_delay_ms),
            validator: MeasurementValidator::default(),
            messages: config.messages,
            timing: config.timing,
            sampling: config.sampling,
            throttle: ThrottleState::new(config.caps),
            alert_active: false,
            last_good: None,
            next_delay_ms: config.timing.short_poll_ms,
            cycles: 0,
        })
    }

    /// Replace the plausibility validator
    pub fn with_validator(mut self, validator: MeasurementValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Throttle counters
    pub fn throttle(&self) -> &ThrottleState {
        &self.throttle
    }

    /// Whether the last classified cycle raised an indicator
    pub fn is_alert_active(&self) -> bool {
        self.alert_active
    }

    /// Most recent reading that passed validation
    pub fn last_good(&self) -> Option<Measurement> {
        self.last_good
    }

    /// Cycles run so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run forever. Only process termination stops the loop.
    pub fn run(&mut self) -> ! {
        loop {
            let report = self.tick();
            self.delay.delay_ms(report.next_delay_ms);
        }
    }

    /// Run one cycle, without the trailing inter-cycle sleep.
    pub fn tick(&mut self) -> CycleReport {
        self.cycles += 1;

        let pair = match self.sample() {
            Ok(pair) => pair,
            Err(err) => return self.sensor_fault(err),
        };

        let latest = pair.latest();
        self.last_good = Some(latest);

        let classification = self.classifier.classify_pair(&pair);
        log_debug!(
            "cycle {}: {:.1}% -> {:.1}% at {:.1}C, {:?}",
            self.cycles,
            pair.first.humidity,
            pair.second.humidity,
            latest.temperature,
            classification,
        );

        let published = Some(self.publish(latest));

        match classification.kind() {
            Some(kind) => self.alert_active_cycle(kind, classification, latest, published),
            None => self.alert_clear_cycle(classification, published),
        }
    }

    fn sample(&mut self) -> SensorResult<SamplePair> {
        let pair = if self.sampling.skip_rise_check_when_active && self.alert_active {
            self.sampler.sample_once(&mut self.sensor)?
        } else {
            self.sampler.sample(&mut self.sensor, &mut self.delay)?
        };

        self.validator.validate_pair(&pair)?;
        Ok(pair)
    }

    fn sensor_fault(&mut self, err: SensorError) -> CycleReport {
        log_warn!("cycle {}: sensor fault, skipping classification: {}", self.cycles, err);

        let last_good = self.last_good;
        let published = last_good.map(|m| self.publish(m));

        CycleReport {
            outcome: CycleOutcome::SensorFault(err),
            classification: None,
            decision: NotifyDecision::SILENT,
            notifications_sent: 0,
            notifications_failed: 0,
            published,
            next_delay_ms: self.next_delay_ms,
        }
    }

    fn alert_active_cycle(
        &mut self,
        kind: AlertKind,
        classification: Classification,
        latest: Measurement,
        published: Option<Result<(), TransportError>>,
    ) -> CycleReport {
        if !self.alert_active {
            log_info!("alert raised: {}", kind);
        }
        self.alert_active = true;
        self.signal.set_alert_signal(true);

        let decision = self.throttle.should_notify(kind);
        let humidity = classification.measurement().map_or(latest.humidity, |m| m.humidity);
        let (sent, failed) = self.deliver(kind, humidity, decision);

        self.next_delay_ms = self.timing.long_poll_ms;

        CycleReport {
            outcome: CycleOutcome::AlertActive(kind),
            classification: Some(classification),
            decision,
            notifications_sent: sent,
            notifications_failed: failed,
            published,
            next_delay_ms: self.next_delay_ms,
        }
    }

    fn alert_clear_cycle(
        &mut self,
        classification: Classification,
        published: Option<Result<(), TransportError>>,
    ) -> CycleReport {
        if self.alert_active {
            log_info!("alert cleared");
        }
        self.alert_active = false;
        self.signal.set_alert_signal(false);
        self.throttle.reset_all();

        self.next_delay_ms = self.timing.short_poll_ms;

        CycleReport {
            outcome: CycleOutcome::AlertClear,
            classification: Some(classification),
            decision: NotifyDecision::SILENT,
            notifications_sent: 0,
            notifications_failed: 0,
            published,
            next_delay_ms: self.next_delay_ms,
        }
    }

    fn deliver(&mut self, kind: AlertKind, humidity: f32, decision: NotifyDecision) -> (usize, usize) {
        if decision.is_silent() {
            log_debug!(
                "{} already reported {} time(s), staying silent",
                kind,
                self.throttle.count(kind),
            );
            return (0, 0);
        }

        if decision.emit_onset {
            log_info!("{} onset, sending alert bundle", kind);
        } else {
            log_info!("{} update {}/{}", kind, self.throttle.count(kind), self.throttle.cap(kind));
        }

        let mut sent = 0;
        let mut failed = 0;
        for text in self.messages.compose(kind, humidity, decision.emit_onset) {
            match self.notifier.notify(&text) {
                Ok(()) => sent += 1,
                Err(err) => {
                    log_warn!("notification for {} failed: {}", kind, err);
                    failed += 1;
                }
            }
        }
        (sent, failed)
    }

    fn publish(&mut self, m: Measurement) -> Result<(), TransportError> {
        let result = self.publisher.publish(m.humidity, m.temperature);
        if let Err(err) = &result {
            log_warn!("telemetry publish failed: {}", err);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::String, vec::Vec};

    struct Fixed(Measurement);

    impl HumiditySensor for Fixed {
        fn read_measurement(&mut self) -> Result<Measurement, SensorError> {
            Ok(self.0)
        }
    }

    #[derive(Default)]
    struct Inbox(Vec<String>);

    impl Notifier for Inbox {
        fn notify(&mut self, text: &str) -> Result<(), TransportError> {
            self.0.push(String::from(text));
            Ok(())
        }
    }

    struct Sink;

    impl TelemetryPublisher for Sink {
        fn publish(&mut self, _humidity: f32, _temperature: f32) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Led(bool);

    impl AlertSignal for Led {
        fn set_alert_signal(&mut self, on: bool) {
            self.0 = on;
        }
    }

    struct NoWait;

    impl Delay for NoWait {
        fn delay_ms(&mut self, _ms: Millis) {}
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = RainConfig::default();
        config.timing.short_poll_ms = 0;
        let result = RainMonitor::new(
            config,
            Fixed(Measurement::new(50.0, 20.0)),
            Inbox::default(),
            Sink,
            Led::default(),
            NoWait,
        );
        assert!(result.is_err());
    }

    #[test]
    fn steady_high_humidity_raises_alert() {
        let mut inbox = Inbox::default();
        let mut led = Led::default();
        let mut monitor = RainMonitor::new(
            RainConfig::default(),
            Fixed(Measurement::new(92.0, 20.0)),
            &mut inbox,
            Sink,
            &mut led,
            NoWait,
        )
        .unwrap();

        let report = monitor.tick();
        assert_eq!(report.outcome, CycleOutcome::AlertActive(AlertKind::SustainedHighHumidity));
        assert_eq!(report.notifications_sent, 3);
        assert_eq!(report.next_delay_ms, 10_000);
        assert!(monitor.is_alert_active());
        drop(monitor);

        assert!(led.0);
        assert_eq!(inbox.0.len(), 3);
    }
}
