use crate::{error::positive, range, ConfigError};
use log::{debug, warn};
use num_traits::Float;

/// Delta acceleration limiter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeltaAccelConfig {
    /// Target acceleration, in units/s².
    pub target_accel: f32,

    /// Output magnitude ceiling, in units/s.
    pub max_vel: f32,

    /// Nominal seconds between calls.
    pub period: f32,
}

impl Default for DeltaAccelConfig {
    fn default() -> Self {
        Self {
            target_accel: 1.,
            max_vel: 1.,
            period: 0.02,
        }
    }
}

impl DeltaAccelConfig {
    pub fn target_accel(mut self, target_accel: f32) -> Self {
        self.target_accel = target_accel;
        self
    }

    pub fn max_vel(mut self, max_vel: f32) -> Self {
        self.max_vel = max_vel;
        self
    }

    pub fn period(mut self, period: f32) -> Self {
        self.period = period;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("target_accel", self.target_accel)?;
        positive("max_vel", self.max_vel)?;
        positive("period", self.period)?;
        Ok(())
    }

    pub fn build(self) -> Result<DeltaAccelLimiter, ConfigError> {
        self.validate()?;
        Ok(DeltaAccelLimiter {
            config: self,
            last_vel: 0.,
        })
    }
}

/// Velocity filter that moves the output by `target_accel * period` per call.
///
/// Unlike [`RampLimiter`](super::RampLimiter) it assumes a fixed call period
/// instead of reading a clock. Setters reject invalid values by returning
/// `false` and keep the previous setting.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaAccelLimiter {
    config: DeltaAccelConfig,
    last_vel: f32,
}

impl DeltaAccelLimiter {
    /// Limiter with a maximum velocity of 1.
    pub fn new(target_accel: f32) -> Result<Self, ConfigError> {
        DeltaAccelConfig::default()
            .target_accel(target_accel)
            .build()
    }

    pub fn with_max_vel(target_accel: f32, max_vel: f32) -> Result<Self, ConfigError> {
        DeltaAccelConfig::default()
            .target_accel(target_accel)
            .max_vel(max_vel)
            .build()
    }

    /// Acceleration-limited output for the requested `velocity`.
    ///
    /// A NaN request holds the previous output.
    pub fn get_output(&mut self, velocity: f32) -> f32 {
        if velocity.is_nan() {
            warn!("delta accel limiter ignored NaN request");
            return self.last_vel;
        }

        let DeltaAccelConfig {
            target_accel,
            max_vel,
            period,
        } = self.config;

        let velocity = range::clamp_magnitude(velocity, max_vel);
        let accel = (velocity - self.last_vel) / period;

        // Shift the request by the acceleration headroom (negative if exceeded)
        let velocity =
            velocity + range::sign(accel) as f32 * period * (target_accel - Float::abs(accel));

        self.last_vel = range::clamp_magnitude(velocity, max_vel);
        self.last_vel
    }

    /// Forget the previous velocity.
    pub fn reset(&mut self) {
        debug!("delta accel limiter reset");
        self.last_vel = 0.;
    }

    /// Set the target acceleration and maximum velocity.
    ///
    /// Both values are applied independently; returns `false` if either was
    /// rejected.
    pub fn set(&mut self, target_accel: f32, max_vel: f32) -> bool {
        let accel_ok = self.set_target_accel(target_accel);
        let vel_ok = self.set_max_vel(max_vel);
        accel_ok && vel_ok
    }

    pub fn set_target_accel(&mut self, target_accel: f32) -> bool {
        accept(&mut self.config.target_accel, "target_accel", target_accel)
    }

    pub fn set_max_vel(&mut self, max_vel: f32) -> bool {
        accept(&mut self.config.max_vel, "max_vel", max_vel)
    }

    pub fn set_period(&mut self, period: f32) -> bool {
        accept(&mut self.config.period, "period", period)
    }

    pub fn config(&self) -> DeltaAccelConfig {
        self.config
    }

    pub fn target_accel(&self) -> f32 {
        self.config.target_accel
    }

    pub fn max_vel(&self) -> f32 {
        self.config.max_vel
    }

    pub fn period(&self) -> f32 {
        self.config.period
    }

    pub fn last_vel(&self) -> f32 {
        self.last_vel
    }
}

fn accept(field: &mut f32, name: &'static str, value: f32) -> bool {
    match positive(name, value) {
        Ok(value) => {
            *field = value;
            true
        }
        Err(err) => {
            warn!("{}", err);
            false
        }
    }
}
