//! Telegram Bot API Notifier
//!
//! ## Overview
//!
//! Delivers alert text through the Bot API `sendMessage` method to every
//! configured chat. Each message is a JSON POST:
//!
//! ```json
//! {"chat_id": "987654321", "text": "...", "parse_mode": "HTML"}
//! ```
//!
//! ## Delivery
//!
//! - Chats are sent to in configuration order, one request each.
//! - A failed chat is logged and the remaining chats are still tried.
//! - `notify` fails with the first error if any chat failed, so the control
//!   loop counts the message as failed even if some chats got it.
//! - No retries: the next alert cycle is the retry.
//!
//! The bot token is part of the request path and is never logged.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rainwatch_core::{traits::Notifier, TransportError};
use serde::{Deserialize, Serialize};

use crate::{lock_stats, ConnectionStats, ConnectorError};

/// Public Bot API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Bot credentials and recipients
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_ids: Vec<String>,
    pub api_base: String,
    pub timeout_secs: u64,
    /// `None` sends plain text
    pub parse_mode: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_ids: Vec::new(),
            api_base: DEFAULT_API_BASE.into(),
            timeout_secs: 10,
            parse_mode: Some("HTML".into()),
        }
    }
}

// Keeps the token out of debug logs
impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"<redacted>")
            .field("chat_ids", &self.chat_ids)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("parse_mode", &self.parse_mode)
            .finish()
    }
}

impl TelegramConfig {
    pub fn new<I, S>(token: impl Into<String>, chat_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token: token.into(),
            chat_ids: chat_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Point at another Bot API server, e.g. a local one
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn validate(&self) -> Result<(), ConnectorError> {
        if self.token.trim().is_empty() {
            return Err(ConnectorError::Config("Telegram bot token is empty".into()));
        }
        if self.chat_ids.is_empty() {
            return Err(ConnectorError::Config("no Telegram chat ids configured".into()));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ConnectorError::Config("API base must start with http:// or https://".into()));
        }
        Ok(())
    }
}

/// Notifier fanning each message out to every configured chat
pub struct TelegramNotifier {
    config: TelegramConfig,
    endpoint: String,
    agent: ureq::Agent,
    stats: Arc<Mutex<ConnectionStats>>,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self, ConnectorError> {
        config.validate()?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&format!("rainwatch/{}", rainwatch_core::VERSION))
            .build();

        let endpoint = format!(
            "{}/bot{}/sendMessage",
            config.api_base.trim_end_matches('/'),
            config.token
        );

        Ok(Self {
            config,
            endpoint,
            agent,
            stats: Arc::new(Mutex::new(ConnectionStats::default())),
        })
    }

    pub fn chat_ids(&self) -> &[String] {
        &self.config.chat_ids
    }

    pub fn stats(&self) -> ConnectionStats {
        lock_stats(&self.stats).clone()
    }

    fn request_body(&self, chat_id: &str, text: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(mode) = &self.config.parse_mode {
            body["parse_mode"] = serde_json::Value::from(mode.as_str());
        }
        body
    }

    fn send_to(&self, chat_id: &str, text: &str) -> Result<usize, ConnectorError> {
        let body = serde_json::to_string(&self.request_body(chat_id, text))?;

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&body);

        match response {
            Ok(_) => Ok(body.len()),
            Err(ureq::Error::Status(status, resp)) => Err(ConnectorError::Rejected {
                status,
                message: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(e)) => {
                if e.kind() == ureq::ErrorKind::Io && e.to_string().contains("timed out") {
                    Err(ConnectorError::Timeout)
                } else {
                    Err(ConnectorError::Request(e.to_string()))
                }
            }
        }
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&mut self, text: &str) -> Result<(), TransportError> {
        let mut first_error = None;

        for chat_id in &self.config.chat_ids {
            log::debug!("Sending Telegram message to chat {}", chat_id);

            match self.send_to(chat_id, text) {
                Ok(bytes) => lock_stats(&self.stats).record_sent(bytes),
                Err(err) => {
                    log::warn!("Telegram delivery to chat {} failed: {}", chat_id, err);
                    lock_stats(&self.stats).record_failed(&err);
                    first_error.get_or_insert(TransportError::from(&err));
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TelegramConfig::new("123:abc", ["1", "2"])
            .api_base("http://localhost:8081/")
            .timeout_secs(3);

        assert_eq!(config.chat_ids, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.parse_mode.as_deref(), Some("HTML"));

        let telegram = TelegramNotifier::new(config).unwrap();
        assert_eq!(telegram.endpoint, "http://localhost:8081/bot123:abc/sendMessage");
    }

    #[test]
    fn test_config_validation() {
        let no_chats: [&str; 0] = [];
        assert!(TelegramNotifier::new(TelegramConfig::new("", ["1"])).is_err());
        assert!(TelegramNotifier::new(TelegramConfig::new("123:abc", no_chats)).is_err());
        assert!(TelegramNotifier::new(TelegramConfig::new("123:abc", ["1"]).api_base("not-a-url")).is_err());
    }

    #[test]
    fn test_token_not_in_debug_output() {
        let config = TelegramConfig::new("123:secret", ["1"]);
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("chat_ids"));
    }

    #[test]
    fn test_request_body() {
        let telegram = TelegramNotifier::new(TelegramConfig::new("123:abc", ["42"])).unwrap();
        let body = telegram.request_body("42", "Rain indicator. Humidity is high.");

        assert_eq!(
            body,
            serde_json::json!({
                "chat_id": "42",
                "text": "Rain indicator. Humidity is high.",
                "parse_mode": "HTML",
            })
        );

        let mut plain = TelegramConfig::new("123:abc", ["42"]);
        plain.parse_mode = None;
        let telegram = TelegramNotifier::new(plain).unwrap();
        assert!(telegram.request_body("42", "hi").get("parse_mode").is_none());
    }

    #[test]
    fn test_unreachable_api_tries_every_chat() {
        let config = TelegramConfig::new("123:abc", ["1", "2", "3"])
            .api_base("http://127.0.0.1:1")
            .timeout_secs(2);
        let mut telegram = TelegramNotifier::new(config).unwrap();

        assert!(telegram.notify("hello").is_err());

        let stats = telegram.stats();
        assert_eq!(stats.messages_sent, 0);
        assert_eq!(stats.messages_failed, 3);
        assert!(stats.last_error.is_some());
    }
}
