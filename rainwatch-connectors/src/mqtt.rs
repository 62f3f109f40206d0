//! MQTT Telemetry Publisher
//!
//! Publishes every reading to one topic as the `"<humidity>|<temperature>"`
//! payload produced by [`Measurement::to_payload`].
//!
//! `rumqttc`'s synchronous [`Client`] only queues requests; the network
//! I/O happens while its [`Connection`] is polled. [`MqttTelemetry::connect`]
//! hands the connection to a background thread that drains it, tracks the
//! broker session and counts reconnections. Publishing never blocks the
//! control loop: while the broker is unreachable a publish fails fast with
//! [`TransportError::Unavailable`].

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread,
    time::Duration,
};

use rainwatch_core::{traits::TelemetryPublisher, Measurement, TransportError};
use rumqttc::{Client, Connection, ConnectionError, Event, MqttOptions, Packet, QoS};
use serde::{Deserialize, Serialize};

use crate::{lock_stats, ConnectionStats, ConnectorError};

/// Broker connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub topic: String,
    pub keep_alive_secs: u64,
    /// 0, 1 or 2
    pub qos: u8,
    pub retain: bool,
    /// Outgoing requests buffered before publishes start failing
    pub request_capacity: usize,
    /// Pause before polling again after a connection error
    pub reconnect_delay_ms: u64,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 1883,
            client_id: "rainwatch".into(),
            topic: "rainwatch/telemetry".into(),
            keep_alive_secs: 30,
            qos: 0,
            retain: false,
            request_capacity: 10,
            reconnect_delay_ms: 5_000,
        }
    }
}

impl MqttConfig {
    /// Configuration for `host:port` with defaults for everything else
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port, ..Self::default() }
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    fn validate(&self) -> Result<QoS, ConnectorError> {
        if self.host.is_empty() {
            return Err(ConnectorError::Config("MQTT host is empty".into()));
        }
        if self.topic.is_empty() || self.topic.contains(['+', '#']) {
            return Err(ConnectorError::Config(format!("invalid MQTT topic {:?}", self.topic)));
        }
        if self.keep_alive_secs == 0 {
            return Err(ConnectorError::Config("MQTT keep-alive must be non-zero".into()));
        }
        qos_level(self.qos)
    }
}

fn qos_level(level: u8) -> Result<QoS, ConnectorError> {
    match level {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        other => Err(ConnectorError::Config(format!("MQTT QoS must be 0, 1 or 2, got {other}"))),
    }
}

/// Telemetry publisher over MQTT
pub struct MqttTelemetry {
    client: Client,
    topic: String,
    qos: QoS,
    retain: bool,
    connected: Arc<AtomicBool>,
    stats: Arc<Mutex<ConnectionStats>>,
}

impl MqttTelemetry {
    /// Create the client and start the background event loop.
    ///
    /// Returns immediately; the broker session is established by the event
    /// loop thread and re-established after every connection error.
    pub fn connect(config: MqttConfig) -> Result<Self, ConnectorError> {
        let qos = config.validate()?;

        let mut options = MqttOptions::new(config.client_id.as_str(), config.host.as_str(), config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));

        let (client, connection) = Client::new(options, config.request_capacity.max(1));
        let connected = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(Mutex::new(ConnectionStats::default()));

        let event_loop = EventLoopDrain {
            connected: Arc::clone(&connected),
            stats: Arc::clone(&stats),
            reconnect_delay: Duration::from_millis(config.reconnect_delay_ms),
        };
        thread::Builder::new()
            .name("rainwatch-mqtt".into())
            .spawn(move || event_loop.run(connection))?;

        log::info!(
            "MQTT publisher for {}:{} topic {} started",
            config.host,
            config.port,
            config.topic
        );

        Ok(Self {
            client,
            topic: config.topic,
            qos,
            retain: config.retain,
            connected,
            stats,
        })
    }

    /// Whether the broker has acknowledged the current session
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> ConnectionStats {
        lock_stats(&self.stats).clone()
    }

    fn send(&mut self, payload: &str) -> Result<(), ConnectorError> {
        if !self.is_connected() {
            return Err(ConnectorError::NotConnected);
        }
        self.client
            .try_publish(self.topic.as_str(), self.qos, self.retain, payload.as_bytes().to_vec())
            .map_err(|e| ConnectorError::Protocol(e.to_string()))
    }
}

impl TelemetryPublisher for MqttTelemetry {
    fn publish(&mut self, humidity: f32, temperature: f32) -> Result<(), TransportError> {
        let payload = Measurement::new(humidity, temperature).to_payload();

        match self.send(&payload) {
            Ok(()) => {
                log::debug!("MQTT {} <- {}", self.topic, payload);
                lock_stats(&self.stats).record_sent(payload.len());
                Ok(())
            }
            Err(err) => {
                log::warn!("MQTT publish to {} failed: {}", self.topic, err);
                let transport = TransportError::from(&err);
                lock_stats(&self.stats).record_failed(&err);
                Err(transport)
            }
        }
    }
}

/// Background poller for the rumqttc connection
struct EventLoopDrain {
    connected: Arc<AtomicBool>,
    stats: Arc<Mutex<ConnectionStats>>,
    reconnect_delay: Duration,
}

impl EventLoopDrain {
    fn run(self, mut connection: Connection) {
        let mut sessions = 0u32;

        for notification in connection.iter() {
            match notification {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    if sessions > 0 {
                        lock_stats(&self.stats).reconnections += 1;
                    }
                    sessions += 1;
                    self.connected.store(true, Ordering::Release);
                    log::info!("MQTT broker session established");
                }
                Ok(Event::Incoming(Packet::Disconnect)) => {
                    self.connected.store(false, Ordering::Release);
                    log::warn!("MQTT broker closed the session");
                }
                Ok(_) => {}
                Err(ConnectionError::RequestsDone) => {
                    log::debug!("MQTT client dropped, stopping event loop");
                    break;
                }
                Err(err) => {
                    if self.connected.swap(false, Ordering::AcqRel) {
                        log::warn!("MQTT connection lost: {}", err);
                    } else {
                        log::debug!("MQTT connection attempt failed: {}", err);
                    }
                    lock_stats(&self.stats).last_error = Some(err.to_string());
                    thread::sleep(self.reconnect_delay);
                }
            }
        }

        self.connected.store(false, Ordering::Release);
    }
}
