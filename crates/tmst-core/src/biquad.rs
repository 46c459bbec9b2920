//! Biquad (bi-quadratic) filter structure.
//!
//! Second-order IIR section used by the modulation filterbank. Coefficient
//! calculation uses the RBJ Audio EQ Cookbook formulas, in double precision
//! because modulation filters sit very close to DC relative to the sample rate.

use std::f64::consts::PI;

/// Biquad coefficients and state.
///
/// Implements the Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,

    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a biquad from `(b0, b1, b2, a0, a1, a2)` coefficients.
    pub fn from_coefficients(coeffs: (f64, f64, f64, f64, f64, f64)) -> Self {
        let mut biquad = Self::new();
        let (b0, b1, b2, a0, a1, a2) = coeffs;
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);
        biquad
    }

    /// Sets the biquad coefficients, normalizing by `a0`.
    pub fn set_coefficients(&mut self, b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Filters a whole block from a cleared state.
    pub fn filter(&mut self, input: &[f64]) -> Vec<f64> {
        self.clear();
        input.iter().map(|&x| self.process(x)).collect()
    }

    /// Clears the delay lines.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Band-pass coefficients with 0 dB peak gain at `frequency` (RBJ cookbook).
///
/// # Arguments
///
/// * `frequency` - Centre frequency in Hz
/// * `q` - Quality factor (bandwidth = frequency / Q)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn bandpass_coefficients(frequency: f64, q: f64, sample_rate: f64) -> (f64, f64, f64, f64, f64, f64) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = omega.cos();
    let sin_omega = omega.sin();
    let alpha = sin_omega / (2.0 * q);

    let b0 = alpha;
    let b1 = 0.0;
    let b2 = -alpha;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, fs: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * freq * i as f64 / fs).sin()).collect()
    }

    fn rms(x: &[f64]) -> f64 {
        (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
    }

    #[test]
    fn passthrough_by_default() {
        let mut bq = Biquad::new();
        assert_eq!(bq.process(0.5), 0.5);
        assert_eq!(bq.process(-0.25), -0.25);
    }

    #[test]
    fn bandpass_unity_at_centre() {
        let fs = 1000.0;
        let mut bq = Biquad::from_coefficients(bandpass_coefficients(10.0, 1.0, fs));
        let out = bq.filter(&sine(10.0, fs, 5000));
        let ratio = rms(&out[2000..]) / rms(&sine(10.0, fs, 5000)[2000..]);
        assert!((ratio - 1.0).abs() < 0.02, "centre gain {ratio}");
    }

    #[test]
    fn bandpass_blocks_dc() {
        let fs = 1000.0;
        let mut bq = Biquad::from_coefficients(bandpass_coefficients(10.0, 1.0, fs));
        let out = bq.filter(&vec![1.0; 5000]);
        assert!(out[4999].abs() < 1e-6, "DC leak {}", out[4999]);
    }

    #[test]
    fn filter_resets_state() {
        let fs = 1000.0;
        let mut bq = Biquad::from_coefficients(bandpass_coefficients(20.0, 2.0, fs));
        let input = sine(20.0, fs, 256);
        let first = bq.filter(&input);
        let second = bq.filter(&input);
        assert_eq!(first, second);
    }
}
