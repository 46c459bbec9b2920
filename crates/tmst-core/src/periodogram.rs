//! Periodogram evaluated at arbitrary query frequencies.
//!
//! Each query frequency is evaluated with a Goertzel recursion, so the cost is
//! one second-order pass over the signal per frequency instead of a full FFT.
//! The estimate is the two-sided power spectral density of the rectangular-
//! windowed signal:
//!
//! ```text
//! P(f) = |sum_n x[n] exp(-j 2 pi f n / fs)|^2 / (fs * N)
//! ```
//!
//! Callers that want a one-sided spectrum double the result.

use std::f64::consts::PI;

/// Squared DFT magnitude of `signal` at `freq` Hz.
#[inline]
fn goertzel_power(signal: &[f64], fs: f64, freq: f64) -> f64 {
    let omega = 2.0 * PI * freq / fs;
    let cos_omega = omega.cos();
    let coeff = 2.0 * cos_omega;

    let mut s1 = 0.0;
    let mut s2 = 0.0;
    for &x in signal {
        let s0 = x + coeff * s1 - s2;
        s2 = s1;
        s1 = s0;
    }

    (s1 * s1 + s2 * s2 - coeff * s1 * s2).max(0.0)
}

/// Power spectral density of `signal` at each of `freqs`.
///
/// Returns zeros for an empty signal.
pub fn periodogram(signal: &[f64], fs: f64, freqs: &[f64]) -> Vec<f64> {
    periodogram_padded(signal, signal.len(), fs, freqs)
}

/// Periodogram of `signal` zero-padded to `padded_len` samples.
///
/// Trailing zeros leave the DFT sum unchanged, so only the normalisation uses
/// `padded_len`. A `padded_len` shorter than the signal is treated as the
/// signal length.
pub fn periodogram_padded(signal: &[f64], padded_len: usize, fs: f64, freqs: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return vec![0.0; freqs.len()];
    }
    let scale = 1.0 / (fs * padded_len.max(signal.len()) as f64);
    freqs
        .iter()
        .map(|&f| goertzel_power(signal, fs, f) * scale)
        .collect()
}
