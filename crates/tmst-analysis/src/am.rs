//! Amplitude-modulation analyses.
//!
//! All three share one front end: auditory filterbank, then the Hilbert
//! envelope of every channel. [`AmAnalyzer`] then measures envelope power per
//! modulation frequency, either over the whole signal or in windows sized to
//! each modulation period; [`AmiAnalyzer`] instead runs a modulation
//! filterbank and reports modulation depth relative to the envelope mean.

use rayon::prelude::*;
use tmst_config::{AmConfig, AmiConfig, AuditoryRange, Validate};
use tmst_core::{
    Result, SCALOGRAM_SHIFT, Scalogram, aud_filt_bw, centered_row, define_modulation_axis,
    periodogram, periodogram_padded, require_positive, scalogram_rows, time_axis,
    validate_signal, window_geometry, window_ranges,
};

use crate::gammatone::{AuditoryFilterbank, FilterbankOutput, GammatoneFilterbank};
use crate::hilbert::analytic_envelope;
use crate::modfilterbank::{King2019Filterbank, ModulationFilterbank};
use crate::params::{AmaScalogramParams, AmaSpectrumParams, AmiSpectrumParams, grid_time_axis};

/// Reference frequency of the two-point periodogram in each scalogram window.
const REFERENCE_FREQ: f64 = 0.01;

/// AM power spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct AmaSpectrum {
    /// Envelope power `spectrum[mod][channel]`.
    pub spectrum: Vec<Vec<f64>>,
    /// Channel centre frequencies (Hz).
    pub fc: Vec<f64>,
    /// Modulation axis centres (Hz).
    pub f_spectra: Vec<f64>,
    /// Pipeline intermediates.
    pub params: AmaSpectrumParams,
}

impl AmaSpectrum {
    /// Spectrum of one channel across modulation frequencies.
    pub fn channel(&self, channel: usize) -> Vec<f64> {
        self.spectrum.iter().map(|row| row[channel]).collect()
    }
}

/// AM scalogram summed over channels.
#[derive(Debug, Clone, PartialEq)]
pub struct AmaScalogram {
    /// Time × modulation-frequency grid.
    pub scalogram: Scalogram,
    /// Modulation frequency per column (Hz).
    pub f_spectra: Vec<f64>,
    /// Pipeline intermediates.
    pub params: AmaScalogramParams,
}

/// AM intensity (modulation index) spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct AmiSpectrum {
    /// Modulation index `spectrum[mod][channel]`; `None` where the channel
    /// envelope has no DC.
    pub spectrum: Vec<Vec<Option<f64>>>,
    /// Channel centre frequencies (Hz).
    pub fc: Vec<f64>,
    /// Modulation filter centres (Hz).
    pub mf: Vec<f64>,
    /// Pipeline intermediates.
    pub params: AmiSpectrumParams,
}

/// Filterbank decomposition plus per-channel envelopes.
fn envelope_front_end<F: AuditoryFilterbank>(
    filterbank: &F,
    signal: &[f64],
    fs: f64,
    auditory: &AuditoryRange,
) -> Result<(FilterbankOutput, Vec<Vec<f64>>)> {
    let decomposition = filterbank.decompose(signal, fs, auditory.fmin, auditory.fmax)?;
    let envelopes: Vec<Vec<f64>> = decomposition
        .responses
        .par_iter()
        .map(|r| analytic_envelope(r))
        .collect();
    tracing::debug!(
        channels = decomposition.channels(),
        samples = signal.len(),
        "envelope front end"
    );
    Ok((decomposition, envelopes))
}

/// Scalogram of a single channel envelope.
///
/// Column `j` uses windows of `window_nt / f_spectra[j]` seconds every 0.1 s,
/// the last one zero-padded. Each window contributes twice its periodogram
/// value at the column frequency, stored at the row centred on the window.
/// `rows` must come from [`scalogram_rows`] for the same inputs.
pub fn ama_scalogram_channel(
    envelope: &[f64],
    fs: f64,
    f_spectra: &[f64],
    window_nt: f64,
    rows: usize,
) -> Scalogram {
    let mut grid = Scalogram::new(rows, f_spectra.len());
    for (col, &f) in f_spectra.iter().enumerate() {
        let window_len = window_nt / f;
        let (window, _) = window_geometry(fs, window_len, SCALOGRAM_SHIFT);
        let ranges = window_ranges(envelope.len(), fs, window_len, SCALOGRAM_SHIFT, true);
        for (iwin, range) in ranges.enumerate() {
            let power = periodogram_padded(&envelope[range], window, fs, &[REFERENCE_FREQ, f]);
            grid.set(centered_row(iwin, window_len, SCALOGRAM_SHIFT), col, 2.0 * power[1]);
        }
    }
    grid
}

/// AM spectrum and scalogram analyzer.
#[derive(Debug, Clone)]
pub struct AmAnalyzer<F = GammatoneFilterbank> {
    filterbank: F,
    config: AmConfig,
}

impl AmAnalyzer {
    /// Analyzer using the gammatone filterbank.
    pub fn new(config: AmConfig) -> Self {
        Self::with_filterbank(config, GammatoneFilterbank::new())
    }
}

impl<F: AuditoryFilterbank> AmAnalyzer<F> {
    /// Analyzer using a custom auditory filterbank.
    pub fn with_filterbank(config: AmConfig, filterbank: F) -> Self {
        Self { filterbank, config }
    }

    /// Current parameters.
    pub fn config(&self) -> &AmConfig {
        &self.config
    }

    /// Envelope power per channel at every modulation-axis centre.
    pub fn spectrum(&self, signal: &[f64], fs: f64) -> Result<AmaSpectrum> {
        let _span = tracing::debug_span!("ama_spectrum", samples = signal.len(), fs).entered();
        validate_signal(signal, fs)?;
        self.config.validate()?;
        let m = &self.config.modulation;
        let axis = define_modulation_axis(m.mfmin, m.mfmax, m.n_mod)?;

        let (decomposition, envelopes) =
            envelope_front_end(&self.filterbank, signal, fs, &self.config.auditory)?;

        let per_channel: Vec<Vec<f64>> = envelopes
            .par_iter()
            .map(|env| {
                periodogram(env, fs, &axis.centers)
                    .into_iter()
                    .map(|p| 2.0 * p)
                    .collect::<Vec<_>>()
            })
            .collect();
        let spectrum: Vec<Vec<f64>> = (0..axis.len())
            .map(|k| per_channel.iter().map(|ch| ch[k]).collect())
            .collect();

        let FilterbankOutput { responses, fc } = decomposition;
        Ok(AmaSpectrum {
            spectrum,
            f_spectra: axis.centers.clone(),
            params: AmaSpectrumParams {
                t: time_axis(signal.len(), fs),
                aud_bw: aud_filt_bw(&fc),
                gamma_responses: responses,
                envelope: envelopes,
                f_spectra: axis.centers,
                f_spectra_intervals: axis.edges,
            },
            fc,
        })
    }

    /// Windowed envelope power, summed over channels.
    ///
    /// `window_nt` is the window length in modulation periods.
    pub fn scalogram(&self, signal: &[f64], fs: f64, window_nt: f64) -> Result<AmaScalogram> {
        let _span = tracing::debug_span!("ama_scalogram", samples = signal.len(), fs, window_nt).entered();
        validate_signal(signal, fs)?;
        require_positive("window_nt", window_nt)?;
        self.config.validate()?;
        let m = &self.config.modulation;
        let axis = define_modulation_axis(m.mfmin, m.mfmax, m.n_mod)?;

        let (decomposition, envelopes) =
            envelope_front_end(&self.filterbank, signal, fs, &self.config.auditory)?;

        let rows = scalogram_rows(signal.len(), fs, &axis.centers, window_nt, SCALOGRAM_SHIFT, true);
        let channel_grids: Vec<Scalogram> = envelopes
            .par_iter()
            .map(|env| ama_scalogram_channel(env, fs, &axis.centers, window_nt, rows))
            .collect();

        let mut scalogram = Scalogram::new(rows, axis.len());
        for grid in &channel_grids {
            scalogram.merge_sum(grid);
        }
        tracing::debug!(
            rows,
            cols = axis.len(),
            filled = scalogram.filled_count(),
            "ama scalogram grid"
        );

        let FilterbankOutput { responses, fc } = decomposition;
        Ok(AmaScalogram {
            scalogram,
            f_spectra: axis.centers.clone(),
            params: AmaScalogramParams {
                t: grid_time_axis(rows, SCALOGRAM_SHIFT),
                aud_bw: aud_filt_bw(&fc),
                gamma_responses: responses,
                envelope: envelopes,
                scale: axis.centers,
                fc,
            },
        })
    }
}

/// AM intensity analyzer.
#[derive(Debug, Clone)]
pub struct AmiAnalyzer<F = GammatoneFilterbank, M = King2019Filterbank> {
    filterbank: F,
    modulation_filterbank: M,
    config: AmiConfig,
}

impl AmiAnalyzer {
    /// Analyzer using the gammatone and King2019 filterbanks.
    pub fn new(config: AmiConfig) -> Self {
        Self::with_filterbanks(config, GammatoneFilterbank::new(), King2019Filterbank::new())
    }
}

impl<F: AuditoryFilterbank, M: ModulationFilterbank> AmiAnalyzer<F, M> {
    /// Analyzer using custom filterbanks.
    pub fn with_filterbanks(config: AmiConfig, filterbank: F, modulation_filterbank: M) -> Self {
        Self {
            filterbank,
            modulation_filterbank,
            config,
        }
    }

    /// Current parameters.
    pub fn config(&self) -> &AmiConfig {
        &self.config
    }

    /// Modulation index per channel and modulation filter.
    pub fn spectrum(&self, signal: &[f64], fs: f64) -> Result<AmiSpectrum> {
        let _span = tracing::debug_span!("ami_spectrum", samples = signal.len(), fs).entered();
        validate_signal(signal, fs)?;
        self.config.validate()?;

        let (decomposition, envelopes) =
            envelope_front_end(&self.filterbank, signal, fs, &self.config.auditory)?;
        let filtered = self.modulation_filterbank.filter(
            &envelopes,
            fs,
            &self.config.modulation,
            self.config.q_factor,
        )?;

        let am_rms: Vec<Vec<f64>> = filtered
            .bands
            .iter()
            .map(|bands| {
                bands
                    .iter()
                    .map(|b| {
                        let mean_sq = b.iter().map(|v| v * v).sum::<f64>() / b.len() as f64;
                        mean_sq.sqrt() * std::f64::consts::SQRT_2
                    })
                    .collect()
            })
            .collect();
        let dc: Vec<f64> = envelopes
            .iter()
            .map(|env| env.iter().sum::<f64>() / env.len() as f64)
            .collect();

        let spectrum: Vec<Vec<Option<f64>>> = (0..filtered.mf.len())
            .map(|k| {
                am_rms
                    .iter()
                    .zip(&dc)
                    .map(|(rms, &d)| (d > 0.0).then(|| rms[k] / d))
                    .collect()
            })
            .collect();
        let degenerate = dc.iter().filter(|&&d| d <= 0.0).count();
        if degenerate > 0 {
            tracing::debug!(degenerate, "channels without envelope DC");
        }

        let FilterbankOutput { responses, fc } = decomposition;
        Ok(AmiSpectrum {
            spectrum,
            mf: filtered.mf,
            params: AmiSpectrumParams {
                t: time_axis(signal.len(), fs),
                aud_bw: aud_filt_bw(&fc),
                gamma_responses: responses,
                envelope: envelopes,
                am_rms,
                dc,
            },
            fc,
        })
    }
}
