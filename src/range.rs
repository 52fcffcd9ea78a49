//! Range helpers for controller inputs and motor outputs.
//!
//! Pure functions: clamping, deadbands, sign extraction and decimal rounding.
//! Functions that take a range or a band size reject inverted ranges and
//! negative bands with a [`ConfigError`].

use crate::ConfigError;
use num_traits::Float;

/// Keep `value` within `[lower, upper]`.
///
/// Fails if `lower > upper`.
pub fn clamp<F: Float>(value: F, lower: F, upper: F) -> Result<F, ConfigError> {
    check_range(lower, upper)?;

    Ok(if value > upper {
        upper
    } else if value < lower {
        lower
    } else {
        value
    })
}

/// Keep `value` within `[-|limit|, |limit|]`.
pub fn clamp_magnitude<F: Float>(value: F, limit: F) -> F {
    let limit = limit.abs();
    if value > limit {
        limit
    } else if value < -limit {
        -limit
    } else {
        value
    }
}

/// Zero `value` if it lies inside the inclusive deadband `[-band, band]`.
pub fn deadband<F: Float>(value: F, band: F) -> Result<F, ConfigError> {
    deadband_with(value, band, true)
}

/// Zero `value` if it lies inside the deadband around zero.
///
/// With `inclusive` set, a value of exactly `±band` is zeroed as well.
/// Fails if `band` is negative.
pub fn deadband_with<F: Float>(value: F, band: F, inclusive: bool) -> Result<F, ConfigError> {
    if band < F::zero() {
        return Err(ConfigError::Negative {
            name: "deadband",
            value: as_f64(band),
        });
    }

    let inside = if inclusive {
        value.abs() <= band
    } else {
        value.abs() < band
    };

    Ok(if inside { F::zero() } else { value })
}

/// Check if `value` lies in the inclusive range `[lower, upper]`.
pub fn is_within_range<F: Float>(value: F, lower: F, upper: F) -> Result<bool, ConfigError> {
    is_within_range_with(value, lower, upper, true)
}

/// Check if `value` lies between `lower` and `upper`.
///
/// Fails if `lower > upper`.
pub fn is_within_range_with<F: Float>(
    value: F,
    lower: F,
    upper: F,
    inclusive: bool,
) -> Result<bool, ConfigError> {
    check_range(lower, upper)?;

    Ok(if inclusive {
        value >= lower && value <= upper
    } else {
        value > lower && value < upper
    })
}

/// Sign of `value` as `1`, `0` or `-1`.
///
/// Unlike [`Float::signum`], zero (of either sign) and NaN map to `0`.
pub fn sign<F: Float>(value: F) -> i32 {
    if value > F::zero() {
        1
    } else if value < F::zero() {
        -1
    } else {
        0
    }
}

/// Round `value` to `places` decimal places, ties to even.
///
/// Rounding happens on the binary value, so a decimal literal that is not
/// exactly representable (e.g. `2.675`) rounds by its nearest `f64`.
pub fn round(value: f64, places: u32) -> f64 {
    let scale = Float::powi(10f64, places as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }

    let rounded = if Float::abs(scaled - Float::trunc(scaled)) == 0.5 {
        // Tie: pick the even neighbour
        2. * Float::round(scaled / 2.)
    } else {
        Float::round(scaled)
    };

    rounded / scale
}

fn check_range<F: Float>(lower: F, upper: F) -> Result<(), ConfigError> {
    if lower > upper {
        Err(ConfigError::InvertedRange {
            lower: as_f64(lower),
            upper: as_f64(upper),
        })
    } else {
        Ok(())
    }
}

fn as_f64<F: Float>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_ok() {
        assert_eq!(clamp(5.0, -1.0, 1.0), Ok(1.0));
        assert_eq!(clamp(-5.0, -1.0, 1.0), Ok(-1.0));
        assert_eq!(clamp(0.25_f32, -1.0, 1.0), Ok(0.25));
        assert_eq!(clamp(3.0, 3.0, 3.0), Ok(3.0));
    }

    #[test]
    fn clamp_rejects_inverted_range() {
        assert_eq!(
            clamp(0.0, 1.0, -1.0),
            Err(ConfigError::InvertedRange {
                lower: 1.0,
                upper: -1.0
            })
        );
    }

    #[test]
    fn clamp_magnitude_ignores_limit_sign() {
        assert_eq!(clamp_magnitude(2.0_f32, 1.5), 1.5);
        assert_eq!(clamp_magnitude(-2.0_f32, -1.5), -1.5);
        assert_eq!(clamp_magnitude(0.5_f32, 1.5), 0.5);
    }

    #[test]
    fn deadband_inclusive_and_exclusive() {
        assert_eq!(deadband(0.1, 0.1), Ok(0.0));
        assert_eq!(deadband(-0.05, 0.1), Ok(0.0));
        assert_eq!(deadband(0.2, 0.1), Ok(0.2));
        assert_eq!(deadband_with(0.1, 0.1, false), Ok(0.1));
        assert_eq!(deadband_with(0.09, 0.1, false), Ok(0.0));
    }

    #[test]
    fn deadband_rejects_negative_band() {
        assert_eq!(
            deadband(0.5, -0.1),
            Err(ConfigError::Negative {
                name: "deadband",
                value: -0.1
            })
        );
    }

    #[test]
    fn within_range() {
        assert_eq!(is_within_range(1.0, 0.0, 1.0), Ok(true));
        assert_eq!(is_within_range_with(1.0, 0.0, 1.0, false), Ok(false));
        assert_eq!(is_within_range(1.5, 0.0, 1.0), Ok(false));
        assert!(is_within_range(0.0, 2.0, 1.0).is_err());
    }

    #[test]
    fn sign_of_values() {
        assert_eq!(sign(3.2), 1);
        assert_eq!(sign(-0.001_f32), -1);
        assert_eq!(sign(0.0), 0);
        assert_eq!(sign(-0.0), 0);
        assert_eq!(sign(f64::NAN), 0);
    }

    #[test]
    fn round_half_to_even() {
        assert_eq!(round(2.5, 0), 2.0);
        assert_eq!(round(3.5, 0), 4.0);
        assert_eq!(round(-2.5, 0), -2.0);
        assert_eq!(round(0.125, 2), 0.12);
        assert_eq!(round(0.375, 2), 0.38);
        assert_eq!(round(1.26, 1), 1.3);
        assert_eq!(round(-7.0, 3), -7.0);
    }
}
