//! # Ramp limiter
//!
//! Smooths a stream of speed targets into an output that changes at a bounded
//! rate. The filter is called once per control loop iteration and measures the
//! wall-clock time since the current phase began, so jitter in the loop period
//! does not change the ramp rate.
//!
//! ## Phases
//!
//! * **Steady**: the target did not change since the previous call; the
//!   target is passed through.
//! * **Accelerating**: the target moved away from zero; the output climbs by
//!   `max_speed / accel_time` per second until it reaches the target.
//! * **Decelerating**: the target moved towards zero or flipped sign; the
//!   output falls by `max_speed / decel_time` per second until it reaches the
//!   target or zero. A direction change always decelerates to zero first.
//!
//! The call on which the phase changes returns the output the new phase
//! starts from; ramping begins with the following call.
//!
//! Timing is measured from the start of the phase, not from the previous
//! call. A new target that keeps the current phase (a higher target while
//! accelerating, say) does not restart the ramp, so the output can jump
//! straight to it once enough time has passed since the phase began.
//!
//! A ramp time of zero disables that ramp: the output jumps to the target
//! (deceleration still stops at zero before a direction change).
//!
//! ## Example
//!
//! ```
//! use accel_ramp::{ManualClock, Phase, RampLimiter};
//!
//! let clock = ManualClock::new();
//! let mut ramp = RampLimiter::builder()
//!     .accel_time(1.0)
//!     .decel_time(0.5)
//!     .build(|| clock.now())
//!     .unwrap();
//!
//! assert_eq!(ramp.get_output(1.0), 0.0); // phase change
//! assert_eq!(ramp.phase(), Phase::Accelerating);
//!
//! clock.advance(250);
//! assert!((ramp.get_output(1.0) - 0.25).abs() < 1e-6);
//! ```

use crate::{
    clock::Clock,
    error::{non_negative, positive},
    range, ConfigError,
};
use log::{debug, trace};
use num_traits::Float;

const MILLIS_PER_SECOND: f32 = 1000.;

/// Rate-of-change regime of a [`RampLimiter`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Steady,
    Accelerating,
    Decelerating,
}

/// Ramp limiter configuration.
///
/// Doubles as a builder:
///
/// ```
/// use accel_ramp::RampConfig;
///
/// let config = RampConfig::default().accel_time(0.5).max_speed(12.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RampConfig {
    /// Seconds to accelerate from 0 to `±max_speed`; zero disables the ramp.
    pub accel_time: f32,

    /// Seconds to decelerate from `±max_speed` to 0; zero disables the ramp.
    pub decel_time: f32,

    /// Output magnitude ceiling.
    pub max_speed: f32,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            accel_time: 0.,
            decel_time: 0.,
            max_speed: 1.,
        }
    }
}

impl RampConfig {
    pub fn accel_time(mut self, accel_time: f32) -> Self {
        self.accel_time = accel_time;
        self
    }

    pub fn decel_time(mut self, decel_time: f32) -> Self {
        self.decel_time = decel_time;
        self
    }

    pub fn max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("accel_time", self.accel_time)?;
        non_negative("decel_time", self.decel_time)?;
        positive("max_speed", self.max_speed)?;
        Ok(())
    }

    /// Validate the configuration and create a re-armed limiter reading `clock`.
    pub fn build<C: Clock>(self, clock: C) -> Result<RampLimiter<C>, ConfigError> {
        self.validate()?;

        let mut ramp = RampLimiter {
            clock,
            config: self,
            phase: Phase::Steady,
            start_time: 0,
            last_output: 0.,
            last_speed: 0.,
            pending_sync: true,
        };
        ramp.initialize();
        Ok(ramp)
    }
}

/// Acceleration and deceleration ramp for one motor or axis.
///
/// `Clone` gives an independent copy; modify the copy to derive a limiter
/// with different settings without touching the original.
#[derive(Debug, Clone)]
pub struct RampLimiter<C> {
    clock: C,
    config: RampConfig,
    phase: Phase,

    /// Clock reading at which the current phase began.
    start_time: u64,

    /// Output the current phase ramps from, or the target once reached.
    last_output: f32,

    /// Clamped target (or ramped output) returned by the previous call.
    last_speed: f32,

    /// `last_output` has not caught up with `last_speed` in this phase.
    pending_sync: bool,
}

impl RampLimiter<()> {
    pub fn builder() -> RampConfig {
        RampConfig::default()
    }
}

impl<C: Clock> RampLimiter<C> {
    /// Limiter with an acceleration ramp only.
    pub fn new(clock: C, accel_time: f32) -> Result<Self, ConfigError> {
        RampConfig::default().accel_time(accel_time).build(clock)
    }

    /// Limiter with acceleration and deceleration ramps.
    pub fn with_decel(clock: C, accel_time: f32, decel_time: f32) -> Result<Self, ConfigError> {
        RampConfig::default()
            .accel_time(accel_time)
            .decel_time(decel_time)
            .build(clock)
    }

    /// Ramp-limited output for the target `speed`.
    pub fn get_output(&mut self, speed: f32) -> f32 {
        let speed = range::clamp_magnitude(speed, self.config.max_speed);
        let sign = range::sign(speed);
        let last_out_sign = range::sign(self.last_output);
        let last_sign = range::sign(self.last_speed);

        let phase = if speed == self.last_speed {
            self.last_output = speed;
            Phase::Steady
        } else if sign == last_sign {
            if Float::abs(speed) > Float::abs(self.last_speed) {
                Phase::Accelerating
            } else {
                Phase::Decelerating
            }
        } else if last_sign == 0 {
            Phase::Accelerating
        } else {
            // Reversing: stop first
            Phase::Decelerating
        };

        if phase != self.phase {
            debug!(
                "ramp phase {:?} -> {:?} at output {}",
                self.phase, phase, self.last_output
            );
            self.start_time = self.clock.millis();
            self.phase = phase;
            if self.pending_sync {
                self.last_output = self.last_speed;
            }
            self.pending_sync = true;

            return self.last_output;
        }

        let elapsed = self.clock.millis().saturating_sub(self.start_time) as f32;
        let output = match phase {
            Phase::Steady => speed,
            Phase::Accelerating => self.accelerate(speed, sign, elapsed),
            Phase::Decelerating => self.decelerate(speed, last_out_sign, elapsed),
        };
        trace!("ramp target {} output {}", speed, output);

        self.last_speed = output;
        output
    }

    /// Re-arm the limiter at zero output, keeping its configuration.
    ///
    /// The first non-zero target afterwards is a phase change and returns 0;
    /// ramping starts with the call after it.
    pub fn initialize(&mut self) {
        debug!("ramp initialized");
        self.phase = Phase::Steady;
        self.start_time = self.clock.millis();
        self.last_output = 0.;
        self.last_speed = 0.;
        self.pending_sync = true;
    }

    fn accelerate(&mut self, speed: f32, sign: i32, elapsed: f32) -> f32 {
        let candidate = if self.config.accel_time == 0. {
            speed
        } else {
            self.last_output + sign as f32 * self.config.max_speed
                / (MILLIS_PER_SECOND * self.config.accel_time)
                * elapsed
        };

        let below_target = match sign {
            1 => candidate < speed,
            -1 => candidate > speed,
            _ => false,
        };

        if below_target {
            candidate
        } else {
            self.last_output = speed;
            self.pending_sync = false;
            speed
        }
    }

    fn decelerate(&mut self, speed: f32, last_out_sign: i32, elapsed: f32) -> f32 {
        let candidate = if self.config.decel_time == 0. {
            speed
        } else {
            self.last_output
                - last_out_sign as f32 * self.config.max_speed
                    / (MILLIS_PER_SECOND * self.config.decel_time)
                    * elapsed
        };

        let above_target = match last_out_sign {
            1 => candidate > speed && candidate > 0.,
            -1 => candidate < speed && candidate < 0.,
            _ => false,
        };

        if above_target {
            return candidate;
        }

        let crossed_zero =
            (last_out_sign == 1 && candidate <= 0.) || (last_out_sign == -1 && candidate >= 0.);
        // Stopped at zero: the next call accelerates towards the new target
        let settled = if crossed_zero { 0. } else { speed };
        self.last_output = settled;
        self.pending_sync = false;
        settled
    }
}

impl<C> RampLimiter<C> {
    /// Set the time to accelerate from 0 to `±max_speed`, in seconds.
    pub fn set_accel_time(&mut self, accel_time: f32) -> Result<&mut Self, ConfigError> {
        self.config.accel_time = non_negative("accel_time", accel_time)?;
        Ok(self)
    }

    /// Set the time to decelerate from `±max_speed` to 0, in seconds.
    pub fn set_decel_time(&mut self, decel_time: f32) -> Result<&mut Self, ConfigError> {
        self.config.decel_time = non_negative("decel_time", decel_time)?;
        Ok(self)
    }

    /// Set both ramp times. Neither is changed if one is rejected.
    pub fn set_accel_times(
        &mut self,
        accel_time: f32,
        decel_time: f32,
    ) -> Result<&mut Self, ConfigError> {
        let accel_time = non_negative("accel_time", accel_time)?;
        let decel_time = non_negative("decel_time", decel_time)?;
        self.config.accel_time = accel_time;
        self.config.decel_time = decel_time;
        Ok(self)
    }

    pub fn set_max_speed(&mut self, max_speed: f32) -> Result<&mut Self, ConfigError> {
        self.config.max_speed = positive("max_speed", max_speed)?;
        Ok(self)
    }

    pub fn config(&self) -> RampConfig {
        self.config
    }

    pub fn accel_time(&self) -> f32 {
        self.config.accel_time
    }

    pub fn decel_time(&self) -> f32 {
        self.config.decel_time
    }

    pub fn max_speed(&self) -> f32 {
        self.config.max_speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_output(&self) -> f32 {
        self.last_output
    }
}
