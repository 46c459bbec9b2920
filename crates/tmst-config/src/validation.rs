//! Parameter validation.
//!
//! Every parameter struct implements [`Validate`]. Checks are collected rather
//! than short-circuited so a profile with several mistakes reports all of them.
//!
//! # Example
//!
//! ```rust
//! use tmst_config::{ModulationRange, Validate};
//!
//! let range = ModulationRange { mfmin: 10.0, mfmax: 1.0, n_mod: 5 };
//! assert!(range.validate().is_err());
//! ```

use thiserror::Error;
use tmst_core::TmstError;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Lower bound of a pair is not below its upper bound.
    #[error("'{low}' ({low_value}) must be below '{high}' ({high_value})")]
    InvertedRange {
        /// Name of the lower bound.
        low: String,
        /// Value of the lower bound.
        low_value: f64,
        /// Name of the upper bound.
        high: String,
        /// Value of the upper bound.
        high_value: f64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<ValidationError> for TmstError {
    fn from(err: ValidationError) -> Self {
        TmstError::InvalidRange(err.to_string())
    }
}

/// Types whose fields can be checked against their valid ranges.
pub trait Validate {
    /// Push every violation into `errors`.
    fn collect_errors(&self, errors: &mut Vec<ValidationError>);

    /// Validate, folding several violations into [`ValidationError::Multiple`].
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();
        self.collect_errors(&mut errors);
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

/// Check `min <= value <= max` (and finiteness).
pub(crate) fn check_range(errors: &mut Vec<ValidationError>, param: &str, value: f64, min: f64, max: f64) {
    if !(value.is_finite() && value >= min && value <= max) {
        errors.push(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min,
            max,
        });
    }
}

/// Check `value > 0` (and finiteness).
pub(crate) fn check_positive(errors: &mut Vec<ValidationError>, param: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min: f64::MIN_POSITIVE,
            max: f64::INFINITY,
        });
    }
}

/// Check `low < high`.
pub(crate) fn check_ordered(errors: &mut Vec<ValidationError>, low: (&str, f64), high: (&str, f64)) {
    if low.1.is_finite() && high.1.is_finite() && low.1 >= high.1 {
        errors.push(ValidationError::InvertedRange {
            low: low.0.to_string(),
            low_value: low.1,
            high: high.0.to_string(),
            high_value: high.1,
        });
    }
}
