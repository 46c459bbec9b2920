//! Configuration for the TMST modulation analyses.
//!
//! Holds the parameter structs consumed by `tmst-analysis`, range validation
//! for each of them, and named [`AnalysisProfile`]s persisted as TOML.
//!
//! # Example
//!
//! ```rust,no_run
//! use tmst_config::{AnalysisProfile, ModulationRange, Validate};
//!
//! let mut profile = AnalysisProfile::new("speech").with_sample_rate(16000.0);
//! profile.am.modulation = ModulationRange::new(0.5, 32.0, 64);
//! profile.validate().unwrap();
//! profile.save("profiles/speech.toml").unwrap();
//!
//! let loaded = AnalysisProfile::load("profiles/speech.toml").unwrap();
//! assert_eq!(loaded, profile);
//! ```

mod error;
mod params;
mod profile;

/// Parameter validation.
pub mod validation;

pub use error::ConfigError;
pub use params::{AmConfig, AmiConfig, ArtifactConfig, AuditoryRange, F0mConfig, ModulationRange};
pub use profile::AnalysisProfile;
pub use validation::{Validate, ValidationError, ValidationResult};
