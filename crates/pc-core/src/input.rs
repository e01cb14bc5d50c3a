//! Input bounds, the validated check request, and the saved form snapshot.

use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// Accepted range for `x`.
pub const X_RANGE: (f64, f64) = (-3.0, 3.0);
/// Accepted range for `y`.
pub const Y_RANGE: (f64, f64) = (-5.0, 3.0);
/// Accepted range for `r` (the lower bound is exclusive).
pub const R_RANGE: (f64, f64) = (0.0, 3.0);

/// A point/radius triple that passed input validation.
///
/// Serializes to the `{x, y, r}` body of `POST /api/points/check`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckRequest {
    x: f64,
    y: f64,
    r: f64,
}

impl CheckRequest {
    /// Validate and build a request.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] naming the first field that is not finite or is
    /// outside its range.
    pub fn new(x: f64, y: f64, r: f64) -> Result<Self, InputError> {
        check_range("x", x, X_RANGE)?;
        check_range("y", y, Y_RANGE)?;
        check_finite("r", r)?;
        if r <= R_RANGE.0 {
            return Err(InputError::NonPositiveRadius { value: r });
        }
        check_range("r", r, R_RANGE)?;
        Ok(Self { x, y, r })
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub const fn r(&self) -> f64 {
        self.r
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NotFinite { field, value })
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), InputError> {
    check_finite(field, value)?;
    if value < min || value > max {
        return Err(InputError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Last-used form input, persisted so the next session starts where the
/// previous one stopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_r")]
    pub r: f64,
}

const fn default_r() -> f64 {
    1.0
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            r: default_r(),
        }
    }
}

impl FormSnapshot {
    /// The snapshot as a check request, if it is valid.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the saved values no longer pass validation.
    pub fn to_request(&self) -> Result<CheckRequest, InputError> {
        CheckRequest::new(self.x, self.y, self.r)
    }
}

impl From<CheckRequest> for FormSnapshot {
    fn from(request: CheckRequest) -> Self {
        Self {
            x: request.x,
            y: request.y,
            r: request.r,
        }
    }
}
