//! Shared logarithmic modulation-frequency axis.

use crate::error::{Result, TmstError};

/// Modulation frequencies at which every analysis reports, with their bins.
///
/// `edges` has one more entry than `centers`; bin `i` spans
/// `[edges[i], edges[i + 1]]` and `centers[i]` is its geometric mean.
#[derive(Debug, Clone, PartialEq)]
pub struct ModulationAxis {
    /// Representative modulation frequencies in Hz, strictly increasing.
    pub centers: Vec<f64>,
    /// Bin edges in Hz, strictly increasing, `centers.len() + 1` entries.
    pub edges: Vec<f64>,
}

impl ModulationAxis {
    /// Number of modulation bins.
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// True when the axis has no bins.
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Index of the bin containing `freq`, if it lies on the axis.
    pub fn bin_of(&self, freq: f64) -> Option<usize> {
        let last = self.centers.len().checked_sub(1)?;
        if freq < self.edges[0] || freq > self.edges[last + 1] {
            return None;
        }
        Some(self.edges[1..=last].partition_point(|&e| e <= freq))
    }
}

/// `n` points spaced logarithmically from `low` to `high` inclusive.
///
/// A single point collapses onto `low`.
pub fn logspace(low: f64, high: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let (log_low, log_high) = (low.ln(), high.ln());
            let step = (log_high - log_low) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == 0 {
                        low
                    } else if i == n - 1 {
                        high
                    } else {
                        (log_low + i as f64 * step).exp()
                    }
                })
                .collect()
        }
    }
}

/// Build the modulation axis spanning `[mfmin, mfmax]` with `n_mod` bins.
///
/// Fails with [`TmstError::InvalidRange`] when the range is inverted,
/// degenerate, non-positive or non-finite, or when `n_mod < 1`.
pub fn define_modulation_axis(mfmin: f64, mfmax: f64, n_mod: usize) -> Result<ModulationAxis> {
    if !mfmin.is_finite() || !mfmax.is_finite() || mfmin <= 0.0 {
        return Err(TmstError::invalid_range(format!(
            "modulation range must be positive and finite, got [{mfmin}, {mfmax}]"
        )));
    }
    if mfmin >= mfmax {
        return Err(TmstError::invalid_range(format!(
            "modulation range is inverted or empty: mfmin {mfmin} >= mfmax {mfmax}"
        )));
    }
    if n_mod < 1 {
        return Err(TmstError::invalid_range("need at least one modulation bin"));
    }

    let edges = logspace(mfmin, mfmax, n_mod + 1);
    let centers = edges.windows(2).map(|w| (w[0] * w[1]).sqrt()).collect();
    Ok(ModulationAxis { centers, edges })
}
