//! Analysis profile file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::params::{AmConfig, AmiConfig, F0mConfig};
use crate::validation::{Validate, ValidationError};

/// A named set of parameters for every analysis.
///
/// # TOML Format
///
/// ```toml
/// name = "speech"
/// description = "Syllable-rate modulations"
/// sample_rate = 16000.0
///
/// [am.modulation]
/// mfmin = 0.5
/// mfmax = 32.0
/// n_mod = 64
///
/// [am.auditory]
/// fmin = 100.0
/// fmax = 6000.0
///
/// [ami]
/// q_factor = 1.0
///
/// [f0m]
/// undersample = 20
/// fmin = 70.0
/// fmax = 400.0
/// ```
///
/// Every table is optional and falls back to the toolbox defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisProfile {
    /// Name of the profile.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Expected sample rate of the material, in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,

    /// AM spectrum and scalogram parameters.
    #[serde(default)]
    pub am: AmConfig,

    /// AM intensity parameters.
    #[serde(default)]
    pub ami: AmiConfig,

    /// f0M spectrum and scalogram parameters.
    #[serde(default)]
    pub f0m: F0mConfig,
}

impl AnalysisProfile {
    /// Create a profile with default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: None,
            am: AmConfig::default(),
            ami: AmiConfig::default(),
            f0m: F0mConfig::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Replace the AM parameters.
    pub fn with_am(mut self, am: AmConfig) -> Self {
        self.am = am;
        self
    }

    /// Replace the AM intensity parameters.
    pub fn with_ami(mut self, ami: AmiConfig) -> Self {
        self.ami = ami;
        self
    }

    /// Replace the f0M parameters.
    pub fn with_f0m(mut self, f0m: F0mConfig) -> Self {
        self.f0m = f0m;
        self
    }

    /// Load a profile from a TOML file and validate it.
    ///
    /// Out-of-range parameters are reported as [`ConfigError::Validation`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let profile = Self::from_toml(&content)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Parse a profile from a TOML string without validating it.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the profile to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the profile to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self::new("default")
    }
}

impl Validate for AnalysisProfile {
    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        if let Some(fs) = self.sample_rate
            && !(fs.is_finite() && fs > 0.0)
        {
            errors.push(ValidationError::OutOfRange {
                param: "sample_rate".to_string(),
                value: fs,
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            });
        }
        self.am.collect_errors(errors);
        self.ami.collect_errors(errors);
        self.f0m.collect_errors(errors);
    }
}
