//! Millisecond time sources for the ramp filters.

use core::cell::Cell;

/// Something which reports elapsed wall-clock time in milliseconds.
///
/// Readings must be measured from one fixed, clock-specific origin
/// (e.g. device startup) and should never decrease.
pub trait Clock {
    fn millis(&self) -> u64;
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    fn millis(&self) -> u64 {
        self()
    }
}

/// Monotonic clock backed by the operating system.
///
/// The origin is captured once at construction. The clock is `Copy`, so one
/// instance can be created at startup and handed to every filter that should
/// share the same time base.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to.
///
/// Share it with a filter through a closure:
///
/// ```
/// use accel_ramp::{ManualClock, RampLimiter};
///
/// let clock = ManualClock::new();
/// let mut ramp = RampLimiter::new(|| clock.now(), 1.0).unwrap();
/// ramp.get_output(1.0);
/// clock.advance(500);
/// assert!(ramp.get_output(1.0) > 0.0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn set(&self, millis: u64) {
        self.now.set(millis);
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn millis(&self) -> u64 {
        self.now()
    }
}
