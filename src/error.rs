use thiserror::Error;

/// Rejected configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("illegal {name} value {value}: value cannot be negative")]
    Negative { name: &'static str, value: f64 },

    #[error("illegal {name} value {value}: value must be greater than 0")]
    NotPositive { name: &'static str, value: f64 },

    #[error("illegal lower/upper value {lower}/{upper}: upper must not be below lower")]
    InvertedRange { lower: f64, upper: f64 },
}

/// Accept `value` if it is zero or positive.
pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    // NaN fails the comparison as well
    if value >= 0. {
        Ok(value)
    } else {
        Err(ConfigError::Negative {
            name,
            value: value.into(),
        })
    }
}

/// Accept `value` if it is strictly positive.
pub(crate) fn positive(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value > 0. {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive {
            name,
            value: value.into(),
        })
    }
}
