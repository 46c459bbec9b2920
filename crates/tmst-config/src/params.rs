//! Analysis parameter structs.
//!
//! Each struct deserializes with the toolbox defaults for every field that is
//! left out, so an empty TOML table is a complete configuration.

use serde::{Deserialize, Serialize};
use tmst_core::ArtifactParams;

use crate::validation::{
    Validate, ValidationError, check_ordered, check_positive, check_range,
};

fn default_mfmin() -> f64 {
    0.5
}
fn default_mfmax() -> f64 {
    200.0
}
fn default_n_mod() -> usize {
    200
}
fn default_aud_fmin() -> f64 {
    70.0
}
fn default_aud_fmax() -> f64 {
    6700.0
}
fn default_q_factor() -> f64 {
    1.0
}
fn default_max_jump() -> f64 {
    10.0
}
fn default_min_duration() -> f64 {
    0.08
}
fn default_ratio_bounds() -> [f64; 2] {
    [0.4, 2.5]
}
fn default_max_gap_ms() -> f64 {
    1500.0
}
fn default_undersample() -> usize {
    20
}
fn default_f0_fmin() -> f64 {
    60.0
}
fn default_f0_fmax() -> f64 {
    550.0
}
fn default_yin_thresh() -> f64 {
    0.2
}
fn default_ap0_thresh() -> f64 {
    0.8
}

/// Modulation-frequency range and number of bins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ModulationRange {
    /// Lowest modulation frequency in Hz.
    #[serde(default = "default_mfmin")]
    pub mfmin: f64,
    /// Highest modulation frequency in Hz.
    #[serde(default = "default_mfmax")]
    pub mfmax: f64,
    /// Number of modulation bins.
    #[serde(default = "default_n_mod")]
    pub n_mod: usize,
}

impl ModulationRange {
    /// Create a range from explicit bounds and bin count.
    pub fn new(mfmin: f64, mfmax: f64, n_mod: usize) -> Self {
        Self { mfmin, mfmax, n_mod }
    }
}

impl Default for ModulationRange {
    fn default() -> Self {
        Self {
            mfmin: default_mfmin(),
            mfmax: default_mfmax(),
            n_mod: default_n_mod(),
        }
    }
}

impl Validate for ModulationRange {
    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        check_positive(errors, "mfmin", self.mfmin);
        check_positive(errors, "mfmax", self.mfmax);
        check_ordered(errors, ("mfmin", self.mfmin), ("mfmax", self.mfmax));
        if self.n_mod < 1 {
            errors.push(ValidationError::OutOfRange {
                param: "n_mod".to_string(),
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            });
        }
    }
}

/// Frequency range covered by the auditory filterbank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AuditoryRange {
    /// Lowest channel centre frequency in Hz.
    #[serde(default = "default_aud_fmin")]
    pub fmin: f64,
    /// Highest channel centre frequency in Hz.
    #[serde(default = "default_aud_fmax")]
    pub fmax: f64,
}

impl AuditoryRange {
    /// Create a range from explicit bounds.
    pub fn new(fmin: f64, fmax: f64) -> Self {
        Self { fmin, fmax }
    }
}

impl Default for AuditoryRange {
    fn default() -> Self {
        Self {
            fmin: default_aud_fmin(),
            fmax: default_aud_fmax(),
        }
    }
}

impl Validate for AuditoryRange {
    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        check_positive(errors, "fmin", self.fmin);
        check_positive(errors, "fmax", self.fmax);
        check_ordered(errors, ("fmin", self.fmin), ("fmax", self.fmax));
    }
}

/// Parameters shared by the AM spectrum and AM scalogram.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AmConfig {
    /// Modulation axis.
    #[serde(default)]
    pub modulation: ModulationRange,
    /// Auditory filterbank range.
    #[serde(default)]
    pub auditory: AuditoryRange,
}

impl Validate for AmConfig {
    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        self.modulation.collect_errors(errors);
        self.auditory.collect_errors(errors);
    }
}

/// Parameters for the AM intensity spectrum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AmiConfig {
    /// Modulation filter centres.
    #[serde(default)]
    pub modulation: ModulationRange,
    /// Auditory filterbank range.
    #[serde(default)]
    pub auditory: AuditoryRange,
    /// Quality factor of every modulation filter.
    #[serde(default = "default_q_factor")]
    pub q_factor: f64,
}

impl Default for AmiConfig {
    fn default() -> Self {
        Self {
            modulation: ModulationRange::default(),
            auditory: AuditoryRange::default(),
            q_factor: default_q_factor(),
        }
    }
}

impl Validate for AmiConfig {
    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        self.modulation.collect_errors(errors);
        self.auditory.collect_errors(errors);
        check_positive(errors, "q_factor", self.q_factor);
    }
}

/// Parameters for f0-track artifact removal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ArtifactConfig {
    /// Largest accepted frame-to-frame jump in semitones.
    #[serde(default = "default_max_jump")]
    pub max_jump: f64,
    /// Shortest accepted voiced run in seconds.
    #[serde(default = "default_min_duration")]
    pub min_duration: f64,
    /// Accepted ratio to the regional median, `[low, high]`.
    #[serde(default = "default_ratio_bounds")]
    pub ratio_bounds: [f64; 2],
    /// Gap (ms) that separates median regions.
    #[serde(default = "default_max_gap_ms")]
    pub max_gap_ms: f64,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            max_jump: default_max_jump(),
            min_duration: default_min_duration(),
            ratio_bounds: default_ratio_bounds(),
            max_gap_ms: default_max_gap_ms(),
        }
    }
}

impl Validate for ArtifactConfig {
    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        check_positive(errors, "max_jump", self.max_jump);
        check_range(errors, "min_duration", self.min_duration, 0.0, f64::MAX);
        check_positive(errors, "ratio_bounds[0]", self.ratio_bounds[0]);
        check_ordered(
            errors,
            ("ratio_bounds[0]", self.ratio_bounds[0]),
            ("ratio_bounds[1]", self.ratio_bounds[1]),
        );
        check_range(errors, "max_gap_ms", self.max_gap_ms, 0.0, f64::MAX);
    }
}

/// Parameters for the f0M spectrum and scalogram.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct F0mConfig {
    /// Modulation axis.
    #[serde(default)]
    pub modulation: ModulationRange,
    /// Pitch-tracker hop in samples.
    #[serde(default = "default_undersample")]
    pub undersample: usize,
    /// Lowest accepted f0 in Hz.
    #[serde(default = "default_f0_fmin")]
    pub fmin: f64,
    /// Highest accepted f0 in Hz.
    #[serde(default = "default_f0_fmax")]
    pub fmax: f64,
    /// YIN absolute threshold.
    #[serde(default = "default_yin_thresh")]
    pub yin_thresh: f64,
    /// Frames with aperiodicity above this are discarded.
    #[serde(default = "default_ap0_thresh")]
    pub ap0_thresh: f64,
    /// Artifact removal.
    #[serde(default)]
    pub artifacts: ArtifactConfig,
}

impl Default for F0mConfig {
    fn default() -> Self {
        Self {
            modulation: ModulationRange::default(),
            undersample: default_undersample(),
            fmin: default_f0_fmin(),
            fmax: default_f0_fmax(),
            yin_thresh: default_yin_thresh(),
            ap0_thresh: default_ap0_thresh(),
            artifacts: ArtifactConfig::default(),
        }
    }
}

impl F0mConfig {
    /// Artifact-removal parameters for a track sampled at `track_fs`, using
    /// the pitch bounds as frequency bounds.
    pub fn artifact_params(&self, track_fs: f64) -> ArtifactParams {
        ArtifactParams {
            fs: track_fs,
            max_jump: self.artifacts.max_jump,
            min_duration: self.artifacts.min_duration,
            freq_bounds: (self.fmin, self.fmax),
            ratio_bounds: (self.artifacts.ratio_bounds[0], self.artifacts.ratio_bounds[1]),
            max_gap_ms: self.artifacts.max_gap_ms,
        }
    }
}

impl Validate for F0mConfig {
    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        self.modulation.collect_errors(errors);
        if self.undersample < 1 {
            errors.push(ValidationError::OutOfRange {
                param: "undersample".to_string(),
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        check_positive(errors, "fmin", self.fmin);
        check_positive(errors, "fmax", self.fmax);
        check_ordered(errors, ("fmin", self.fmin), ("fmax", self.fmax));
        check_range(errors, "yin_thresh", self.yin_thresh, 0.0, 1.0);
        check_range(errors, "ap0_thresh", self.ap0_thresh, 0.0, 1.0);
        self.artifacts.collect_errors(errors);
    }
}
