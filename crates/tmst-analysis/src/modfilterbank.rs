//! Modulation filterbank applied to channel envelopes.
//!
//! [`King2019Filterbank`] uses one second-order band-pass per modulation
//! frequency, log-spaced from `mfmin` to `mfmax` inclusive, all sharing one
//! quality factor. Each filter has 0 dB gain at its centre, so the RMS of a
//! band output estimates the amplitude of envelope fluctuations at that rate.

use rayon::prelude::*;
use tmst_config::ModulationRange;
use tmst_core::{Biquad, Result, TmstError, bandpass_coefficients, logspace, require_band};

/// Band-filtered envelopes.
#[derive(Debug, Clone, PartialEq)]
pub struct ModFilterbankOutput {
    /// `bands[channel][mod][sample]`.
    pub bands: Vec<Vec<Vec<f64>>>,
    /// Modulation filter centre frequencies in Hz.
    pub mf: Vec<f64>,
}

/// Splits envelopes into modulation-frequency bands.
pub trait ModulationFilterbank: Send + Sync {
    /// Filter every row of `envelopes` through a bank spanning `range` with
    /// quality factor `q`.
    fn filter(
        &self,
        envelopes: &[Vec<f64>],
        fs: f64,
        range: &ModulationRange,
        q: f64,
    ) -> Result<ModFilterbankOutput>;
}

/// Constant-Q band-pass modulation filterbank (King et al., 2019).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct King2019Filterbank;

impl King2019Filterbank {
    /// Create the filterbank.
    pub fn new() -> Self {
        Self
    }

    /// Centre frequencies for `range`: `n_mod` points log-spaced from `mfmin`
    /// to `mfmax`; a single filter sits at `mfmin`.
    pub fn centre_frequencies(range: &ModulationRange) -> Vec<f64> {
        logspace(range.mfmin, range.mfmax, range.n_mod)
    }
}

impl ModulationFilterbank for King2019Filterbank {
    fn filter(
        &self,
        envelopes: &[Vec<f64>],
        fs: f64,
        range: &ModulationRange,
        q: f64,
    ) -> Result<ModFilterbankOutput> {
        require_band("modulation range", range.mfmin, range.mfmax)?;
        if range.n_mod < 1 {
            return Err(TmstError::invalid_range("need at least one modulation filter"));
        }
        if range.mfmax >= fs / 2.0 {
            return Err(TmstError::invalid_range(format!(
                "modulation mfmax {} Hz must be below the Nyquist frequency {} Hz",
                range.mfmax,
                fs / 2.0
            )));
        }
        if !(q.is_finite() && q > 0.0) {
            return Err(TmstError::invalid_range(format!(
                "modulation filter Q must be positive, got {q}"
            )));
        }

        let mf = Self::centre_frequencies(range);
        let filters: Vec<Biquad> = mf
            .iter()
            .map(|&f| Biquad::from_coefficients(bandpass_coefficients(f, q, fs)))
            .collect();

        let bands = envelopes
            .par_iter()
            .map(|env| {
                filters
                    .iter()
                    .map(|bq| bq.clone().filter(env))
                    .collect::<Vec<_>>()
            })
            .collect();

        tracing::debug!(channels = envelopes.len(), filters = mf.len(), q, "modulation filterbank");
        Ok(ModFilterbankOutput { bands, mf })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn centres_are_inclusive() {
        let mf = King2019Filterbank::centre_frequencies(&ModulationRange::new(2.0, 32.0, 5));
        assert_eq!(mf.len(), 5);
        assert_eq!(mf[0], 2.0);
        assert_eq!(mf[4], 32.0);
        assert!((mf[2] - 8.0).abs() < 1e-9);
        assert_eq!(
            King2019Filterbank::centre_frequencies(&ModulationRange::new(3.0, 30.0, 1)),
            vec![3.0]
        );
    }

    #[test]
    fn output_shape() {
        let env = vec![vec![1.0; 500]; 3];
        let out = King2019Filterbank::new()
            .filter(&env, 1000.0, &ModulationRange::new(1.0, 100.0, 4), 1.0)
            .unwrap();
        assert_eq!(out.bands.len(), 3);
        assert!(out.bands.iter().all(|c| c.len() == 4 && c.iter().all(|b| b.len() == 500)));
    }

    #[test]
    fn band_at_modulation_rate_passes() {
        let fs = 1000.0;
        let env: Vec<f64> = (0..4000)
            .map(|i| 1.0 + 0.5 * (2.0 * PI * 8.0 * i as f64 / fs).sin())
            .collect();
        let out = King2019Filterbank::new()
            .filter(&[env], fs, &ModulationRange::new(2.0, 32.0, 5), 1.0)
            .unwrap();
        let rms = |x: &[f64]| (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt();
        let levels: Vec<f64> = out.bands[0].iter().map(|b| rms(&b[2000..]) * 2f64.sqrt()).collect();
        assert!((levels[2] - 0.5).abs() < 0.02, "8 Hz band {}", levels[2]);
        assert!(levels[0] < levels[2] && levels[4] < levels[2]);
    }

    #[test]
    fn rejects_bad_parameters() {
        let env = vec![vec![0.0; 10]];
        let fb = King2019Filterbank::new();
        let ok = ModulationRange::new(1.0, 10.0, 3);
        assert!(fb.filter(&env, 100.0, &ok, 0.0).unwrap_err().is_invalid_range());
        assert!(fb.filter(&env, 100.0, &ModulationRange::new(1.0, 60.0, 3), 1.0).unwrap_err().is_invalid_range());
        assert!(fb.filter(&env, 100.0, &ModulationRange::new(1.0, 10.0, 0), 1.0).unwrap_err().is_invalid_range());
    }
}
