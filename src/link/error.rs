use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LinkError {
    #[error("relative velocity {0} km/s is not below the speed of light")]
    SuperLuminal(f64),
    #[error("{quantity} out of range: {value}")]
    OutOfRange { quantity: &'static str, value: f64 },
}

/// Require a finite, strictly positive input.
pub(crate) fn positive(quantity: &'static str, value: f64) -> Result<f64, LinkError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LinkError::OutOfRange { quantity, value })
    }
}
