//! Blocking Delays
//!
//! The control loop suspends in exactly two places: between the two reads
//! of a sampling pass and between cycles. Both go through [`Delay`] so the
//! engine runs the same on an RTOS tick, a bare-metal timer, a Linux
//! thread, or a test that only records how long it was asked to wait.

/// Duration in milliseconds
pub type Millis = u64;

/// Blocking delay provider
///
/// ## Example Implementation
///
/// ```rust
/// use rainwatch_core::time::{Delay, Millis};
///
/// struct BusyWait {
///     ticks_per_ms: u32,
/// }
///
/// impl Delay for BusyWait {
///     fn delay_ms(&mut self, ms: Millis) {
///         for _ in 0..ms * self.ticks_per_ms as u64 {
///             core::hint::spin_loop();
///         }
///     }
/// }
/// ```
pub trait Delay {
    /// Suspend the caller for `ms` milliseconds
    fn delay_ms(&mut self, ms: Millis);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_ms(&mut self, ms: Millis) {
        (**self).delay_ms(ms)
    }
}

/// Thread sleep (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: Millis) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}
