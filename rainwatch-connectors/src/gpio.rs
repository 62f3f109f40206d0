//! Alert signal outputs
//!
//! [`SysfsAlertSignal`] drives an indicator LED through a Linux sysfs GPIO
//! value file (`/sys/class/gpio/gpioN/value`), which must already be
//! exported and configured as an output. [`LogAlertSignal`] stands in when
//! no GPIO is wired up and only logs transitions.
//!
//! Neither ever fails the control loop: a write error is logged and the
//! next cycle writes the level again.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rainwatch_core::traits::AlertSignal;

/// Indicator on a sysfs GPIO line
#[derive(Debug)]
pub struct SysfsAlertSignal {
    path: PathBuf,
    active_low: bool,
    level: Option<bool>,
    write_errors: u64,
}

impl SysfsAlertSignal {
    /// Signal writing to the value file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), active_low: false, level: None, write_errors: 0 }
    }

    /// Write `0` for on and `1` for off, for LEDs wired to the supply rail
    pub fn active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last level written successfully
    pub fn level(&self) -> Option<bool> {
        self.level
    }

    pub fn write_errors(&self) -> u64 {
        self.write_errors
    }
}

impl AlertSignal for SysfsAlertSignal {
    fn set_alert_signal(&mut self, on: bool) {
        let value = if on != self.active_low { "1" } else { "0" };

        match fs::write(&self.path, value) {
            Ok(()) => {
                if self.level != Some(on) {
                    log::info!("Alert signal {}", if on { "on" } else { "off" });
                }
                self.level = Some(on);
            }
            Err(err) => {
                self.write_errors += 1;
                log::warn!("Writing alert signal to {} failed: {}", self.path.display(), err);
            }
        }
    }
}

/// Indicator that only logs
#[derive(Debug, Default)]
pub struct LogAlertSignal {
    on: Option<bool>,
}

impl LogAlertSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on.unwrap_or(false)
    }
}

impl AlertSignal for LogAlertSignal {
    fn set_alert_signal(&mut self, on: bool) {
        if self.on != Some(on) {
            log::info!("Alert signal {}", if on { "on" } else { "off" });
        }
        self.on = Some(on);
    }
}
