//! Fundamental-frequency tracking.
//!
//! [`Yin`] implements the YIN estimator (de Cheveigné & Kawahara, 2002):
//! squared difference function, cumulative mean normalisation, absolute
//! threshold with descent to the local minimum, and parabolic interpolation
//! of the chosen lag. The normalised difference at the chosen lag doubles as
//! the frame's aperiodicity.
//!
//! Frames start every `undersample` samples; frames running past the end of
//! the signal read zeros.

use rayon::prelude::*;
use tmst_config::F0mConfig;
use tmst_core::{Result, TmstError, require_band};

/// Settings for one pitch-tracking pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchSettings {
    /// Lowest detectable f0 in Hz.
    pub fmin: f64,
    /// Highest detectable f0 in Hz.
    pub fmax: f64,
    /// Hop between frames in samples.
    pub undersample: usize,
    /// Absolute threshold on the normalised difference function.
    pub threshold: f64,
}

impl From<&F0mConfig> for PitchSettings {
    fn from(cfg: &F0mConfig) -> Self {
        Self {
            fmin: cfg.fmin,
            fmax: cfg.fmax,
            undersample: cfg.undersample,
            threshold: cfg.yin_thresh,
        }
    }
}

/// Per-frame pitch estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchTrack {
    /// `log2(f0 / 440)` per frame.
    pub log_f0: Vec<f64>,
    /// Aperiodicity in `[0, 1]` per frame; 1 means no periodicity found.
    pub aperiodicity: Vec<f64>,
}

impl PitchTrack {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.log_f0.len()
    }

    /// True when the track holds no frames.
    pub fn is_empty(&self) -> bool {
        self.log_f0.is_empty()
    }

    /// f0 in Hz per frame.
    pub fn f0_hz(&self) -> Vec<f64> {
        self.log_f0.iter().map(|&l| 440.0 * l.exp2()).collect()
    }
}

/// Estimates f0 and aperiodicity frame by frame.
pub trait PitchTracker: Send + Sync {
    /// Track `signal` sampled at `fs`, one frame every `settings.undersample`
    /// samples (`ceil(len / undersample)` frames).
    fn track(&self, signal: &[f64], fs: f64, settings: &PitchSettings) -> Result<PitchTrack>;
}

/// YIN pitch estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Yin;

impl Yin {
    /// Create the estimator.
    pub fn new() -> Self {
        Self
    }

    /// Cumulative mean normalised difference for lags `0..=max_lag` of the
    /// frame starting at `start`, integrating over `window` samples.
    fn cmndf(signal: &[f64], start: usize, window: usize, max_lag: usize) -> Vec<f64> {
        let at = |i: usize| signal.get(i).copied().unwrap_or(0.0);

        let mut out = vec![1.0; max_lag + 1];
        let mut running = 0.0;
        for tau in 1..=max_lag {
            let d: f64 = (0..window)
                .map(|j| {
                    let diff = at(start + j) - at(start + j + tau);
                    diff * diff
                })
                .sum();
            running += d;
            out[tau] = if running > 0.0 {
                d * tau as f64 / running
            } else {
                1.0
            };
        }
        out
    }

    /// Choose a lag in `min_lag..=max_lag` and refine it.
    ///
    /// Returns `(refined lag, normalised difference at the integer lag)`.
    fn pick_lag(cmndf: &[f64], min_lag: usize, max_lag: usize, threshold: f64) -> (f64, f64) {
        let mut tau = (min_lag..=max_lag).find(|&t| cmndf[t] < threshold);
        if let Some(mut t) = tau {
            while t < max_lag && cmndf[t + 1] < cmndf[t] {
                t += 1;
            }
            tau = Some(t);
        }
        let tau = tau.unwrap_or_else(|| {
            (min_lag..=max_lag)
                .min_by(|&a, &b| cmndf[a].total_cmp(&cmndf[b]))
                .unwrap_or(min_lag)
        });

        let mut refined = tau as f64;
        if tau > min_lag && tau < max_lag {
            let (prev, cur, next) = (cmndf[tau - 1], cmndf[tau], cmndf[tau + 1]);
            let curvature = prev - 2.0 * cur + next;
            if curvature > 0.0 {
                let shift = 0.5 * (prev - next) / curvature;
                if shift.abs() < 1.0 {
                    refined += shift;
                }
            }
        }
        (refined, cmndf[tau])
    }
}

impl PitchTracker for Yin {
    fn track(&self, signal: &[f64], fs: f64, settings: &PitchSettings) -> Result<PitchTrack> {
        require_band("pitch range", settings.fmin, settings.fmax)?;
        if settings.fmax >= fs / 2.0 {
            return Err(TmstError::invalid_range(format!(
                "pitch fmax {} Hz must be below the Nyquist frequency {} Hz",
                settings.fmax,
                fs / 2.0
            )));
        }
        if settings.undersample < 1 {
            return Err(TmstError::invalid_range("undersample must be at least 1"));
        }
        if !(settings.threshold > 0.0 && settings.threshold <= 1.0) {
            return Err(TmstError::invalid_range(format!(
                "YIN threshold must lie in (0, 1], got {}",
                settings.threshold
            )));
        }

        let max_lag = (fs / settings.fmin).ceil() as usize;
        let min_lag = ((fs / settings.fmax).floor() as usize).max(1);
        let window = max_lag;
        let frames = signal.len().div_ceil(settings.undersample);

        let estimates: Vec<(f64, f64)> = (0..frames)
            .into_par_iter()
            .map(|k| {
                let cmndf = Self::cmndf(signal, k * settings.undersample, window, max_lag);
                let (lag, ap) = Self::pick_lag(&cmndf, min_lag, max_lag, settings.threshold);
                ((fs / lag / 440.0).log2(), ap.clamp(0.0, 1.0))
            })
            .collect();
        let (log_f0, aperiodicity) = estimates.into_iter().unzip();

        tracing::debug!(frames, min_lag, max_lag, "yin");
        Ok(PitchTrack { log_f0, aperiodicity })
    }
}
