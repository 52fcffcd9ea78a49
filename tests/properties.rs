use accel_ramp::{range, DeltaAccelLimiter, ManualClock, RampLimiter};
use proptest::prelude::*;

proptest! {
    #[test]
    fn clamp_is_idempotent(x in -1e6f64..1e6, a in -1e3f64..1e3, b in -1e3f64..1e3) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let once = range::clamp(x, lo, hi).unwrap();
        prop_assert_eq!(range::clamp(once, lo, hi).unwrap(), once);
        prop_assert!(range::is_within_range(once, lo, hi).unwrap());
    }

    #[test]
    fn deadband_zeroes_or_passes(x in -10f64..10., band in 0f64..5.) {
        let out = range::deadband(x, band).unwrap();
        prop_assert!(out == 0. || out == x);
        prop_assert_eq!(out == 0., x.abs() <= band);
    }

    #[test]
    fn sign_matches_comparison(x in any::<f32>()) {
        let s = range::sign(x);
        prop_assert!((-1..=1).contains(&s));
        prop_assert_eq!(s == 1, x > 0.);
        prop_assert_eq!(s == -1, x < 0.);
    }

    #[test]
    fn ramp_output_stays_within_max_speed(
        accel_time in 0f32..3.,
        decel_time in 0f32..3.,
        max_speed in 0.1f32..10.,
        steps in prop::collection::vec((-20f32..20., 0u64..400), 1..60),
    ) {
        let clock = ManualClock::new();
        let mut ramp = RampLimiter::builder()
            .accel_time(accel_time)
            .decel_time(decel_time)
            .max_speed(max_speed)
            .build(|| clock.now())
            .unwrap();

        for (target, dt) in steps {
            clock.advance(dt);
            let output = ramp.get_output(target);
            prop_assert!(output.abs() <= max_speed, "{} exceeds {}", output, max_speed);
        }
    }

    #[test]
    fn ramp_never_jumps_across_zero(
        decel_time in 0.1f32..3.,
        dts in prop::collection::vec(0u64..200, 1..40),
    ) {
        let clock = ManualClock::new();
        let mut ramp = RampLimiter::with_decel(|| clock.now(), 0., decel_time).unwrap();
        for _ in 0..4 {
            ramp.get_output(1.);
        }

        let mut previous = ramp.get_output(1.);
        for dt in dts {
            clock.advance(dt);
            let output = ramp.get_output(-1.);
            // A positive output may only be followed by zero or another positive value
            prop_assert!(!(previous > 0. && output < 0.));
            previous = output;
        }
    }

    #[test]
    fn delta_output_stays_within_max_vel(
        target_accel in 0.1f32..100.,
        max_vel in 0.1f32..10.,
        requests in prop::collection::vec(-50f32..50., 1..60),
    ) {
        let mut limiter = DeltaAccelLimiter::with_max_vel(target_accel, max_vel).unwrap();
        for request in requests {
            prop_assert!(limiter.get_output(request).abs() <= max_vel);
        }
    }
}
