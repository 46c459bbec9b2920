//! TMST Analysis - amplitude and f0 modulation spectra of audio signals
//!
//! Five entry points share two front ends:
//!
//! - Envelope front end: [`gammatone`] filterbank, then the [`hilbert`]
//!   envelope of every channel. Feeds [`ama_spectrum`], [`ama_scalogram`]
//!   and, through the [`modfilterbank`], [`ami_spectrum`].
//! - Pitch front end: [`yin`] f0 tracking, aperiodicity gating and artifact
//!   removal. Feeds [`f0m_spectrum`] and [`f0m_scalogram`].
//!
//! Every entry point returns its result together with a diagnostics struct
//! from [`params`] holding the intermediate arrays. The free functions use the
//! default collaborators; the analyzer types ([`AmAnalyzer`], [`AmiAnalyzer`],
//! [`F0mAnalyzer`]) accept any implementation of the collaborator traits.
//!
//! Channels and modulation frequencies are processed in parallel with rayon.
//! Results do not depend on the thread count.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tmst_analysis::ama_spectrum;
//! use tmst_config::AmConfig;
//! use std::f64::consts::PI;
//!
//! let fs = 16000.0;
//! let signal: Vec<f64> = (0..32000)
//!     .map(|i| {
//!         let t = i as f64 / fs;
//!         (1.0 + (2.0 * PI * 4.0 * t).cos()) * (2.0 * PI * 1000.0 * t).sin()
//!     })
//!     .collect();
//!
//! let result = ama_spectrum(&signal, fs, &AmConfig::default()).unwrap();
//! println!("{} channels x {} modulation bins", result.fc.len(), result.f_spectra.len());
//! ```

pub mod am;
pub mod f0m;
pub mod fft;
pub mod gammatone;
pub mod hilbert;
pub mod modfilterbank;
pub mod params;
pub mod yin;

pub use am::{AmAnalyzer, AmaScalogram, AmaSpectrum, AmiAnalyzer, AmiSpectrum, ama_scalogram_channel};
pub use f0m::{CleanTrack, F0mAnalyzer, F0mScalogram, F0mSpectrum};
pub use gammatone::{AuditoryFilterbank, FilterbankOutput, GammatoneFilterbank};
pub use hilbert::{HilbertTransform, analytic_envelope};
pub use modfilterbank::{King2019Filterbank, ModFilterbankOutput, ModulationFilterbank};
pub use params::{
    AmaScalogramParams, AmaSpectrumParams, AmiSpectrumParams, F0mScalogramParams,
    F0mSpectrumParams,
};
pub use yin::{PitchSettings, PitchTrack, PitchTracker, Yin};

use tmst_config::{AmConfig, AmiConfig, F0mConfig};
use tmst_core::Result;

/// AM power spectrum with the gammatone filterbank.
///
/// Returns envelope power `[mod][channel]` at the modulation axis centres.
pub fn ama_spectrum(signal: &[f64], fs: f64, config: &AmConfig) -> Result<AmaSpectrum> {
    AmAnalyzer::new(*config).spectrum(signal, fs)
}

/// AM scalogram with the gammatone filterbank, windows `window_nt`
/// modulation periods long.
pub fn ama_scalogram(signal: &[f64], fs: f64, window_nt: f64, config: &AmConfig) -> Result<AmaScalogram> {
    AmAnalyzer::new(*config).scalogram(signal, fs, window_nt)
}

/// AM intensity spectrum with the gammatone and King2019 filterbanks.
pub fn ami_spectrum(signal: &[f64], fs: f64, config: &AmiConfig) -> Result<AmiSpectrum> {
    AmiAnalyzer::new(*config).spectrum(signal, fs)
}

/// f0M spectrum with the YIN tracker.
pub fn f0m_spectrum(signal: &[f64], fs: f64, config: &F0mConfig) -> Result<F0mSpectrum> {
    F0mAnalyzer::new(*config).spectrum(signal, fs)
}

/// f0M scalogram with the YIN tracker, windows `window_nt` modulation periods
/// long.
pub fn f0m_scalogram(signal: &[f64], fs: f64, window_nt: f64, config: &F0mConfig) -> Result<F0mScalogram> {
    F0mAnalyzer::new(*config).scalogram(signal, fs, window_nt)
}
