//! f0-modulation analyses.
//!
//! The pitch track is extracted once per call and cleaned before any spectral
//! estimate:
//!
//! 1. track f0 every `undersample` samples,
//! 2. discard frames whose aperiodicity exceeds `ap0_thresh`,
//! 3. remove artifacts (octave jumps, short runs, regional outliers).
//!
//! The spectrum then fits a Lomb-Scargle periodogram to the surviving samples
//! and averages it onto the modulation axis bins. The scalogram instead takes
//! a single Lomb-Scargle point estimate per window at the column frequency.
//! The two deliberately differ.

use rayon::prelude::*;
use tmst_config::{F0mConfig, Validate};
use tmst_core::{
    ModulationAxis, Result, SCALOGRAM_SHIFT, Scalogram, TmstError, centered_row,
    define_modulation_axis, interpmean, lombscargle, lombscargle_optional, remove_artifacts,
    require_positive, scalogram_rows, time_axis, validate_signal, window_ranges,
};

use crate::params::{F0mScalogramParams, F0mSpectrumParams, grid_time_axis};
use crate::yin::{PitchSettings, PitchTracker, Yin};

/// Reference frequency of the two-point Lomb-Scargle in each window.
const REFERENCE_FREQ: f64 = 0.01;

/// f0M spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct F0mSpectrum {
    /// Binned power per modulation bin; all `None` when the cleaned track
    /// holds fewer than two samples.
    pub spectrum: Vec<Option<f64>>,
    /// Modulation axis centres (Hz).
    pub f_spectra: Vec<f64>,
    /// Pipeline intermediates.
    pub params: F0mSpectrumParams,
}

/// f0M scalogram.
#[derive(Debug, Clone, PartialEq)]
pub struct F0mScalogram {
    /// Time × modulation-frequency grid.
    pub scalogram: Scalogram,
    /// Modulation frequency per column (Hz).
    pub f_spectra: Vec<f64>,
    /// Pipeline intermediates.
    pub params: F0mScalogramParams,
}

/// Cleaned pitch track at the undersampled rate.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanTrack {
    /// f0 in Hz per frame; rejected frames are `None`.
    pub f0: Vec<Option<f64>>,
    /// Frame rate in Hz.
    pub fs_track: f64,
}

impl CleanTrack {
    /// Number of frames that survived cleaning.
    pub fn valid_count(&self) -> usize {
        self.f0.iter().filter(|v| v.is_some()).count()
    }
}

/// f0M spectrum and scalogram analyzer.
#[derive(Debug, Clone)]
pub struct F0mAnalyzer<P = Yin> {
    tracker: P,
    config: F0mConfig,
}

impl F0mAnalyzer {
    /// Analyzer using the YIN tracker.
    pub fn new(config: F0mConfig) -> Self {
        Self::with_tracker(config, Yin::new())
    }
}

impl<P: PitchTracker> F0mAnalyzer<P> {
    /// Analyzer using a custom pitch tracker.
    pub fn with_tracker(config: F0mConfig, tracker: P) -> Self {
        Self { tracker, config }
    }

    /// Current parameters.
    pub fn config(&self) -> &F0mConfig {
        &self.config
    }

    fn prepare(&self, signal: &[f64], fs: f64) -> Result<ModulationAxis> {
        validate_signal(signal, fs)?;
        self.config.validate()?;
        let m = &self.config.modulation;
        define_modulation_axis(m.mfmin, m.mfmax, m.n_mod)
    }

    /// Track, gate and clean f0.
    pub fn clean_track(&self, signal: &[f64], fs: f64) -> Result<CleanTrack> {
        let cfg = &self.config;
        let track = self.tracker.track(signal, fs, &PitchSettings::from(cfg))?;
        let frames = signal.len().div_ceil(cfg.undersample);
        if track.log_f0.len() != frames || track.aperiodicity.len() != frames {
            return Err(TmstError::collaborator(
                "pitch tracker",
                format!(
                    "expected {frames} frames, got {} f0 and {} aperiodicity values",
                    track.log_f0.len(),
                    track.aperiodicity.len()
                ),
            ));
        }

        let gated: Vec<Option<f64>> = track
            .log_f0
            .iter()
            .zip(&track.aperiodicity)
            .map(|(&l, &ap)| (ap <= cfg.ap0_thresh).then(|| 440.0 * l.exp2()))
            .collect();

        let fs_track = fs / cfg.undersample as f64;
        let f0 = remove_artifacts(&gated, &cfg.artifact_params(fs_track));
        let clean = CleanTrack { f0, fs_track };

        tracing::debug!(
            frames,
            gated = gated.iter().filter(|v| v.is_some()).count(),
            kept = clean.valid_count(),
            "f0 track"
        );
        if clean.valid_count() == 0 {
            tracing::warn!(frames, "no valid f0 samples after cleaning");
        }
        Ok(clean)
    }

    /// Lomb-Scargle spectrum of the cleaned track, averaged onto the
    /// modulation axis bins.
    pub fn spectrum(&self, signal: &[f64], fs: f64) -> Result<F0mSpectrum> {
        let _span = tracing::debug_span!("f0m_spectrum", samples = signal.len(), fs).entered();
        let axis = self.prepare(signal, fs)?;
        let clean = self.clean_track(signal, fs)?;

        // Time stamps of frame starts, one-based in samples.
        let undersample = self.config.undersample as f64;
        let (times, values): (Vec<f64>, Vec<f64>) = clean
            .f0
            .iter()
            .enumerate()
            .filter_map(|(k, v)| v.map(|f| ((1.0 + k as f64 * undersample) / fs, f)))
            .unzip();

        let binned = lombscargle(&times, &values, &axis.centers).and_then(|power| {
            let doubled: Vec<f64> = power.iter().map(|p| 2.0 * p).collect();
            interpmean(&axis.centers, &doubled, &axis.edges)
        });
        let spectrum = match binned {
            Some(values) => values.into_iter().map(Some).collect(),
            None => vec![None; axis.len()],
        };

        Ok(F0mSpectrum {
            spectrum,
            f_spectra: axis.centers.clone(),
            params: F0mSpectrumParams {
                t: time_axis(clean.f0.len(), clean.fs_track),
                f0: clean.f0,
                f_spectra: axis.centers,
                f_spectra_intervals: axis.edges,
            },
        })
    }

    /// Windowed Lomb-Scargle point estimates of the cleaned track.
    ///
    /// `window_nt` is the window length in modulation periods.
    pub fn scalogram(&self, signal: &[f64], fs: f64, window_nt: f64) -> Result<F0mScalogram> {
        let _span = tracing::debug_span!("f0m_scalogram", samples = signal.len(), fs, window_nt).entered();
        let axis = self.prepare(signal, fs)?;
        require_positive("window_nt", window_nt)?;
        let clean = self.clean_track(signal, fs)?;
        let fs_track = clean.fs_track;
        let t_track = time_axis(clean.f0.len(), fs_track);

        let rows = scalogram_rows(clean.f0.len(), fs_track, &axis.centers, window_nt, SCALOGRAM_SHIFT, false);
        let columns: Vec<Vec<(usize, f64)>> = axis
            .centers
            .par_iter()
            .map(|&f| {
                let window_len = window_nt / f;
                window_ranges(clean.f0.len(), fs_track, window_len, SCALOGRAM_SHIFT, false)
                    .enumerate()
                    .filter_map(|(iwin, range)| {
                        let power = lombscargle_optional(
                            &t_track[range.clone()],
                            &clean.f0[range],
                            &[REFERENCE_FREQ, f],
                        )?;
                        Some((centered_row(iwin, window_len, SCALOGRAM_SHIFT), 2.0 * power[1]))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut scalogram = Scalogram::new(rows, axis.len());
        for (col, cells) in columns.iter().enumerate() {
            for &(row, value) in cells {
                scalogram.set(row, col, value);
            }
        }
        tracing::debug!(rows, cols = axis.len(), filled = scalogram.filled_count(), "f0m scalogram grid");

        Ok(F0mScalogram {
            scalogram,
            f_spectra: axis.centers.clone(),
            params: F0mScalogramParams {
                t_track,
                f0: clean.f0,
                f_spectra: axis.centers,
                f_spectra_intervals: axis.edges,
                t: grid_time_axis(rows, SCALOGRAM_SHIFT),
            },
        })
    }
}
