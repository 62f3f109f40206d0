//! Per-Kind Notification Throttle
//!
//! ## Overview
//!
//! A persistent condition (humidity stuck above 90% for an afternoon)
//! would otherwise produce a notification every cycle. The throttle keeps
//! one counter per [`AlertKind`] and lets each kind speak at most `cap`
//! times per episode:
//!
//! ```text
//! counter:  0 ──onset+update──► 1 ──update──► 2 ... cap ──(silent)──► cap
//!           ▲                                                          │
//!           └──────────────────── reset_all() on NoRain ◄──────────────┘
//! ```
//!
//! Counters only grow between resets, and a reset clears every kind at
//! once: the episode ends when the weather clears, not when the kind
//! changes.
//!
//! The counter is incremented when emission is *permitted*, independent of
//! whether the send later succeeds.
//!
//! ```rust
//! use rainwatch_core::{AlertKind, NotificationCaps, ThrottleState};
//!
//! let mut throttle = ThrottleState::new(NotificationCaps::default());
//!
//! let first = throttle.should_notify(AlertKind::RapidHumidityRise);
//! assert!(first.emit_onset && first.emit_update);
//!
//! // cap is 1 for rapid rises
//! assert!(throttle.should_notify(AlertKind::RapidHumidityRise).is_silent());
//!
//! throttle.reset_all();
//! assert_eq!(throttle.count(AlertKind::RapidHumidityRise), 0);
//! ```

use crate::{classifier::AlertKind, config::NotificationCaps};

/// What to emit for one classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyDecision {
    /// Send the preamble and the kind's tips
    pub emit_onset: bool,
    /// Send the status line
    pub emit_update: bool,
}

impl NotifyDecision {
    /// Nothing to send
    pub const SILENT: Self = Self { emit_onset: false, emit_update: false };

    /// Whether nothing is sent
    pub fn is_silent(&self) -> bool {
        !self.emit_onset && !self.emit_update
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KindCounter {
    emitted: u32,
    cap: u32,
}

/// Notification counters, one per indicator kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleState {
    counters: [KindCounter; AlertKind::COUNT],
}

impl Default for ThrottleState {
    fn default() -> Self {
        Self::new(NotificationCaps::default())
    }
}

impl ThrottleState {
    /// All counters at zero
    pub fn new(caps: NotificationCaps) -> Self {
        let mut counters = [KindCounter::default(); AlertKind::COUNT];
        for kind in AlertKind::ALL {
            counters[kind.index()].cap = caps.for_kind(kind);
        }
        Self { counters }
    }

    /// Decide emission for `kind` and advance its counter if permitted.
    ///
    /// A cap of zero silences the kind entirely.
    pub fn should_notify(&mut self, kind: AlertKind) -> NotifyDecision {
        let counter = &mut self.counters[kind.index()];

        if counter.emitted >= counter.cap {
            return NotifyDecision::SILENT;
        }

        let onset = counter.emitted == 0;
        counter.emitted += 1;

        NotifyDecision { emit_onset: onset, emit_update: true }
    }

    /// Zero every counter. Idempotent.
    pub fn reset_all(&mut self) {
        for counter in &mut self.counters {
            counter.emitted = 0;
        }
    }

    /// Notifications permitted so far in this episode
    pub fn count(&self, kind: AlertKind) -> u32 {
        self.counters[kind.index()].emitted
    }

    /// Cap for `kind`
    pub fn cap(&self, kind: AlertKind) -> u32 {
        self.counters[kind.index()].cap
    }

    /// Whether `kind` has used up its cap
    pub fn is_exhausted(&self, kind: AlertKind) -> bool {
        let counter = &self.counters[kind.index()];
        counter.emitted >= counter.cap
    }

    /// Whether every counter is zero
    pub fn is_clear(&self) -> bool {
        self.counters.iter().all(|c| c.emitted == 0)
    }
}
