//! Entry-point validation and sample time axes.

use crate::error::{Result, TmstError};

/// Validate a signal and its sample rate before any computation.
///
/// A non-finite sample rate, an empty signal or a non-finite sample is
/// [`TmstError::InvalidInput`]; a finite but non-positive sample rate is
/// [`TmstError::InvalidRange`].
pub fn validate_signal(signal: &[f64], fs: f64) -> Result<()> {
    if !fs.is_finite() {
        return Err(TmstError::invalid_input(format!(
            "sample rate must be a finite number, got {fs}"
        )));
    }
    if fs <= 0.0 {
        return Err(TmstError::invalid_range(format!(
            "sample rate must be positive, got {fs}"
        )));
    }
    if signal.is_empty() {
        return Err(TmstError::invalid_input("signal is empty"));
    }
    if let Some(idx) = signal.iter().position(|x| !x.is_finite()) {
        return Err(TmstError::invalid_input(format!(
            "signal contains a non-finite sample at index {idx}"
        )));
    }
    Ok(())
}

/// Validate that `value` is a finite, strictly positive parameter.
pub fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TmstError::invalid_range(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

/// Validate an ordered frequency pair `low < high`, both positive.
pub fn require_band(name: &str, low: f64, high: f64) -> Result<()> {
    require_positive(name, low)?;
    if !high.is_finite() || high <= low {
        return Err(TmstError::invalid_range(format!(
            "{name} upper bound {high} must exceed lower bound {low}"
        )));
    }
    Ok(())
}

/// One-based sample times: `t[n] = (n + 1) / fs`.
pub fn time_axis(len: usize, fs: f64) -> Vec<f64> {
    (1..=len).map(|n| n as f64 / fs).collect()
}
