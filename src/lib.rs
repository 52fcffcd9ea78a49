//! Velocity ramp limiting for motor control loops.
//!
//! * [`RampLimiter`] ramps towards each new speed target with separate
//!   acceleration and deceleration times, measured against a [`Clock`].
//! * [`DeltaAccelLimiter`] caps the velocity change per call, assuming a fixed
//!   call period.
//! * [`AccelWrapped`] runs a closed-loop [`Controller`] with a one-shot
//!   startup ramp.
//! * [`range`] holds the clamp, deadband, sign and rounding helpers.
//!
//! The filters are plain state machines: call them once per loop iteration
//! from a single owner.
//!
//! ```
//! use accel_ramp::{DeltaAccelLimiter, ManualClock, RampLimiter};
//!
//! let clock = ManualClock::new();
//! let mut ramp = RampLimiter::with_decel(|| clock.now(), 2.0, 1.0).unwrap();
//! let mut delta = DeltaAccelLimiter::new(5.0).unwrap();
//!
//! for _ in 0..10 {
//!     clock.advance(20);
//!     let speed = ramp.get_output(0.8);
//!     let velocity = delta.get_output(speed);
//!     assert!(velocity.abs() <= 1.0);
//! }
//! ```

#![no_std]
#[cfg(feature = "std")]
extern crate std;

pub mod clock;
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{Clock, ManualClock};

pub mod control;
pub use control::{
    AccelWrapped, Controller, DeltaAccelConfig, DeltaAccelLimiter, Phase, RampConfig, RampLimiter,
};

mod error;
pub use error::ConfigError;

pub mod range;
