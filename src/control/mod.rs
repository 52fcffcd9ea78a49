mod delta;
pub use delta::{DeltaAccelConfig, DeltaAccelLimiter};

pub mod ramp;
pub use ramp::{Phase, RampConfig, RampLimiter};

mod wrapped;
pub use wrapped::AccelWrapped;

/// Closed-loop controller, e.g. a PID position loop.
pub trait Controller {
    /// Calculate the actuator output for the measured `position` and the desired `target`.
    fn compute(&mut self, position: f32, target: f32) -> f32;
}

impl<F> Controller for F
where
    F: FnMut(f32, f32) -> f32,
{
    fn compute(&mut self, position: f32, target: f32) -> f32 {
        self(position, target)
    }
}
