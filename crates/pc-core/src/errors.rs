//! Input validation errors shared by every crate that builds a check request.

use thiserror::Error;

/// A coordinate or radius fell outside the accepted input bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The value is NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// The value is outside the closed range accepted for this field.
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The radius must be strictly positive.
    #[error("r must be positive, got {value}")]
    NonPositiveRadius { value: f64 },
}

impl InputError {
    /// Name of the offending field (`x`, `y` or `r`).
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NotFinite { field, .. } | Self::OutOfRange { field, .. } => field,
            Self::NonPositiveRadius { .. } => "r",
        }
    }
}
