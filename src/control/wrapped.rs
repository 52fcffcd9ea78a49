use super::Controller;
use crate::{clock::Clock, error::non_negative, ConfigError};
use log::debug;

/// Closed-loop controller with a one-shot startup ramp.
///
/// The ramp value `±elapsed / accel_time` is tracked from construction (or
/// the last [`initialize`](Self::initialize)) until it first reaches the
/// controller output; from then on the ramp stays released until re-armed.
///
/// The controller output is returned unmodified. Hosts that want a soft
/// start can read [`ramp_value`](Self::ramp_value) while
/// [`is_ramping`](Self::is_ramping) holds and apply it themselves.
#[derive(Debug, Clone)]
pub struct AccelWrapped<K, C> {
    controller: K,
    clock: C,
    accel_time: f32,
    ramping: bool,
    ramp_value: f32,
    start_time: u64,
}

impl<K, C> AccelWrapped<K, C>
where
    K: Controller,
    C: Clock,
{
    /// Wrap `controller` with a ramp reaching an output of 1 after
    /// `accel_time` seconds. A time of zero disables the ramp.
    pub fn new(controller: K, clock: C, accel_time: f32) -> Result<Self, ConfigError> {
        let accel_time = non_negative("accel_time", accel_time)?;
        let start_time = clock.millis();
        Ok(Self {
            controller,
            clock,
            accel_time,
            ramping: accel_time > 0.,
            ramp_value: 0.,
            start_time,
        })
    }

    /// Controller output for the measured `position` and the desired `target`.
    pub fn compute(&mut self, position: f32, target: f32) -> f32 {
        let output = self.controller.compute(position, target);

        if self.ramping {
            let sign = if output < 0. { -1. } else { 1. };
            let elapsed = self.clock.millis().saturating_sub(self.start_time) as f32;
            self.ramp_value = sign * elapsed / (1000. * self.accel_time);

            if !(self.ramp_value < output) {
                debug!(
                    "startup ramp released at {} for output {}",
                    self.ramp_value, output
                );
                self.ramping = false;
            }
        }

        output
    }

    /// Re-arm the startup ramp and restart its timer.
    pub fn initialize(&mut self) {
        self.ramping = self.accel_time > 0.;
        self.ramp_value = 0.;
        self.start_time = self.clock.millis();
    }

    pub fn is_ramping(&self) -> bool {
        self.ramping
    }

    /// Ramp value computed by the last [`compute`](Self::compute) call.
    pub fn ramp_value(&self) -> f32 {
        self.ramp_value
    }

    pub fn controller(&self) -> &K {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut K {
        &mut self.controller
    }

    pub fn accel_time(&self) -> f32 {
        self.accel_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;
    use approx::assert_abs_diff_eq;

    fn proportional(position: f32, target: f32) -> f32 {
        0.5 * (target - position)
    }

    #[test]
    fn output_passes_through_while_ramping() {
        let clock = ManualClock::new();
        let mut wrapped = AccelWrapped::new(proportional, || clock.now(), 1.).unwrap();

        assert_eq!(wrapped.compute(0., 1.), 0.5);
        assert!(wrapped.is_ramping());
        assert_eq!(wrapped.ramp_value(), 0.);

        clock.advance(300);
        assert_eq!(wrapped.compute(0., 1.), 0.5);
        assert!(wrapped.is_ramping());
        assert_abs_diff_eq!(wrapped.ramp_value(), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn ramp_latches_off_until_initialized() {
        let clock = ManualClock::new();
        let mut wrapped = AccelWrapped::new(proportional, || clock.now(), 1.).unwrap();

        clock.advance(600);
        assert_eq!(wrapped.compute(0., 1.), 0.5);
        assert!(!wrapped.is_ramping());

        // Larger output later does not re-arm the ramp
        assert_eq!(wrapped.compute(0., 4.), 2.);
        assert!(!wrapped.is_ramping());

        wrapped.initialize();
        assert!(wrapped.is_ramping());
        assert_eq!(wrapped.compute(0., 4.), 2.);
        assert!(wrapped.is_ramping());
    }

    #[test]
    fn negative_output_releases_ramp() {
        let clock = ManualClock::new();
        let mut wrapped = AccelWrapped::new(proportional, || clock.now(), 1.).unwrap();

        clock.advance(100);
        assert_eq!(wrapped.compute(1., 0.), -0.5);
        assert!(!wrapped.is_ramping());
        assert_abs_diff_eq!(wrapped.ramp_value(), -0.1, epsilon = 1e-6);
    }

    #[test]
    fn stateful_controller_is_reachable() {
        let mut calls = 0_u32;
        let counting = |_: f32, _: f32| {
            calls += 1;
            0_f32
        };
        let mut wrapped = AccelWrapped::new(counting, || 0_u64, 0.).unwrap();
        assert!(!wrapped.is_ramping());
        wrapped.compute(0., 0.);
        wrapped.compute(0., 0.);
        drop(wrapped);
        assert_eq!(calls, 2);
    }

    #[test]
    fn negative_accel_time_is_rejected() {
        assert!(AccelWrapped::new(proportional, || 0_u64, -1.).is_err());
    }
}
