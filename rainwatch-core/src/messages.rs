//! Notification Texts
//!
//! An onset sends three messages, an update one:
//!
//! ```text
//! onset:   preamble ─► tips for the kind ─► status line
//! update:  status line
//! ```
//!
//! The status line is the kind's icon, its canonical description, and the
//! current humidity:
//!
//! ```text
//! 🌧  Rain indicator. Humidity is high.
//! 💧  Humidity at 92.0%
//! ```
//!
//! Texts are plain UTF-8 and safe to send with Telegram's HTML parse mode.

use alloc::{format, string::String, vec, vec::Vec};

use crate::classifier::AlertKind;

/// Icon and tips for one indicator kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct KindMessages {
    /// Prefix of the status line
    pub icon: String,
    /// Advice sent once per episode, one tip per line
    pub tips: Vec<String>,
}

impl KindMessages {
    fn new(icon: &str, tips: &[&str]) -> Self {
        Self {
            icon: String::from(icon),
            tips: tips.iter().map(|tip| String::from(*tip)).collect(),
        }
    }
}

/// All notification texts
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct MessageTemplates {
    /// First message of every onset
    pub preamble: String,
    /// Label of the humidity line, followed by the value
    pub humidity_label: String,
    /// Texts for [`AlertKind::RapidHumidityRise`]
    pub rapid_humidity_rise: KindMessages,
    /// Texts for [`AlertKind::SustainedHighHumidity`]
    pub sustained_high_humidity: KindMessages,
    /// Texts for [`AlertKind::NearDewPoint`]
    pub near_dew_point: KindMessages,
}

const TIP_CLOTHESLINE: &str = "\u{1F45A}  Don't forget to take the clothes off the line";
const TIP_UMBRELLA: &str = "\u{2614}  Going out? Don't forget your umbrella";
const TIP_COAT: &str = "\u{1F9E3}  It got colder, don't forget your coat";

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            preamble: String::from(
                "\u{26A0}  ATTENTION  \u{26A0}\n\u{26C5}  Receiving weather updates  \u{26C5}\n",
            ),
            humidity_label: String::from("\u{1F4A7}  Humidity at"),
            rapid_humidity_rise: KindMessages::new("\u{2602}", &[TIP_CLOTHESLINE]),
            sustained_high_humidity: KindMessages::new(
                "\u{1F327}",
                &[TIP_CLOTHESLINE, TIP_UMBRELLA],
            ),
            near_dew_point: KindMessages::new("\u{2744}", &[TIP_COAT]),
        }
    }
}

impl MessageTemplates {
    /// Texts for one kind
    pub fn for_kind(&self, kind: AlertKind) -> &KindMessages {
        match kind {
            AlertKind::RapidHumidityRise => &self.rapid_humidity_rise,
            AlertKind::SustainedHighHumidity => &self.sustained_high_humidity,
            AlertKind::NearDewPoint => &self.near_dew_point,
        }
    }

    /// Tip list for a kind, one tip per line. `None` when the kind has no tips.
    pub fn tips(&self, kind: AlertKind) -> Option<String> {
        let tips = &self.for_kind(kind).tips;
        if tips.is_empty() {
            return None;
        }

        let mut text = String::new();
        for tip in tips {
            text.push_str(tip);
            text.push('\n');
        }
        Some(text)
    }

    /// Per-cycle status line
    pub fn status(&self, kind: AlertKind, humidity: f32) -> String {
        format!(
            "{}  {}\n{} {:.1}%",
            self.for_kind(kind).icon,
            kind.description(),
            self.humidity_label,
            humidity,
        )
    }

    /// Messages to send for one throttle decision, in send order
    pub fn compose(&self, kind: AlertKind, humidity: f32, onset: bool) -> Vec<String> {
        if !onset {
            return vec![self.status(kind, humidity)];
        }

        let mut messages = vec![self.preamble.clone()];
        messages.extend(self.tips(kind));
        messages.push(self.status(kind, humidity));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_format() {
        let templates = MessageTemplates::default();
        let status = templates.status(AlertKind::SustainedHighHumidity, 92.0);
        assert_eq!(
            status,
            "\u{1F327}  Rain indicator. Humidity is high.\n\u{1F4A7}  Humidity at 92.0%"
        );
    }

    #[test]
    fn tips_one_per_line() {
        let templates = MessageTemplates::default();
        let tips = templates.tips(AlertKind::SustainedHighHumidity).unwrap();
        assert_eq!(tips.lines().count(), 2);
        assert!(tips.ends_with('\n'));
    }

    #[test]
    fn onset_sends_preamble_tips_then_status() {
        let templates = MessageTemplates::default();
        let messages = templates.compose(AlertKind::RapidHumidityRise, 48.0, true);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], templates.preamble);
        assert!(messages[1].contains("clothes"));
        assert!(messages[2].contains("Humidity rose rapidly"));
        assert!(messages[2].ends_with("48.0%"));
    }

    #[test]
    fn update_sends_status_only() {
        let templates = MessageTemplates::default();
        let messages = templates.compose(AlertKind::NearDewPoint, 89.0, false);
        assert_eq!(messages, vec![templates.status(AlertKind::NearDewPoint, 89.0)]);
    }

    #[test]
    fn onset_without_tips_skips_tip_message() {
        let mut templates = MessageTemplates::default();
        templates.near_dew_point.tips.clear();
        let messages = templates.compose(AlertKind::NearDewPoint, 89.0, true);
        assert_eq!(messages.len(), 2);
    }
}
