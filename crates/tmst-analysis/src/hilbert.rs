//! Hilbert transform for computing analytic signals.
//!
//! The envelope stage of every AM analysis is the magnitude of the analytic
//! signal of each auditory channel, computed over the whole channel at once.
//!
//! # Algorithm
//!
//! The Hilbert transform is computed using the FFT method:
//! 1. Compute FFT of the real signal
//! 2. Double positive frequencies
//! 3. Keep DC (and Nyquist, for even lengths) unchanged
//! 4. Zero out negative frequencies
//! 5. Inverse FFT gives the analytic signal
//!
//! # Example
//!
//! ```rust
//! use tmst_analysis::hilbert::HilbertTransform;
//! use std::f64::consts::PI;
//!
//! let signal: Vec<f64> = (0..1000)
//!     .map(|i| (2.0 * PI * 50.0 * i as f64 / 1000.0).sin())
//!     .collect();
//!
//! let envelope = HilbertTransform::new(signal.len()).envelope(&signal);
//! assert!((envelope[500] - 1.0).abs() < 1e-6);
//! ```

use crate::fft::Fft;
use rustfft::num_complex::Complex;

/// Hilbert transform processor for computing analytic signals.
pub struct HilbertTransform {
    fft: Fft,
    fft_size: usize,
}

impl HilbertTransform {
    /// Create a new Hilbert transform processor.
    ///
    /// Input signals are zero-padded or truncated to `fft_size`. The AM
    /// analyses use the signal length itself, which matches the reference
    /// envelope exactly.
    pub fn new(fft_size: usize) -> Self {
        Self {
            fft: Fft::new(fft_size),
            fft_size,
        }
    }

    /// Compute the analytic signal `x + i H{x}`.
    ///
    /// Returns as many samples as the input (up to the FFT size).
    pub fn analytic_signal(&self, signal: &[f64]) -> Vec<Complex<f64>> {
        let n = signal.len().min(self.fft_size);
        let mut buffer = self.fft.forward(&signal[..n]);

        let size = self.fft_size;
        // Bins 1..(size+1)/2 are strictly positive frequencies for both parities.
        let positive_end = size.div_ceil(2);
        for sample in buffer.iter_mut().take(positive_end).skip(1) {
            *sample *= 2.0;
        }
        for sample in buffer.iter_mut().skip(size / 2 + 1) {
            *sample = Complex::new(0.0, 0.0);
        }

        self.fft.inverse_complex(&mut buffer);
        buffer.truncate(n);
        buffer
    }

    /// Instantaneous amplitude (envelope): `|analytic signal|`.
    pub fn envelope(&self, signal: &[f64]) -> Vec<f64> {
        self.analytic_signal(signal).iter().map(|c| c.norm()).collect()
    }
}

/// Envelope of `signal` using an FFT of exactly the signal length.
pub fn analytic_envelope(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    HilbertTransform::new(signal.len()).envelope(signal)
}
