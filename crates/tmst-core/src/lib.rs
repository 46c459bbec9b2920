//! TMST Core - numeric building blocks for temporal modulation analysis
//!
//! This crate provides the signal-independent utilities shared by every
//! amplitude- and f0-modulation analysis:
//!
//! - [`axis`] - Logarithmic modulation-frequency axis and its bin edges
//! - [`segment`] - Fixed-shift segmentation into overlapping windows
//! - [`periodogram`] - Goertzel periodogram at arbitrary query frequencies
//! - [`lombscargle`] - Lomb-Scargle periodogram for irregular sampling
//! - [`interp`] - Piecewise-mean binning onto the modulation axis
//! - [`artifacts`] - f0 track artifact removal
//! - [`grid`] - Scalogram grid with explicit missing cells
//! - [`erb`] - ERB-rate scale and auditory filter bandwidths
//! - [`biquad`] - Second-order IIR section (RBJ cookbook)
//!
//! Missing values are modelled as `Option<f64>` throughout; no NaN sentinels.
//!
//! # Example
//!
//! ```rust
//! use tmst_core::axis::define_modulation_axis;
//!
//! let axis = define_modulation_axis(1.0, 10.0, 5).unwrap();
//! assert_eq!(axis.centers.len(), 5);
//! assert_eq!(axis.edges.len(), 6);
//! ```

pub mod artifacts;
pub mod axis;
pub mod biquad;
pub mod erb;
pub mod error;
pub mod grid;
pub mod interp;
pub mod lombscargle;
pub mod periodogram;
pub mod segment;
pub mod signal;

pub use artifacts::{ArtifactParams, remove_artifacts};
pub use axis::{ModulationAxis, define_modulation_axis, logspace};
pub use biquad::{Biquad, bandpass_coefficients};
pub use erb::{aud_filt_bw, aud_filt_bw_hz, erb_to_freq, erbspace_bw, freq_to_erb};
pub use error::{Result, TmstError};
pub use grid::{SCALOGRAM_SHIFT, Scalogram, centered_row, scalogram_rows};
pub use interp::interpmean;
pub use lombscargle::{lombscargle, lombscargle_optional};
pub use periodogram::{periodogram, periodogram_padded};
pub use segment::{segment_into_windows, window_count, window_geometry, window_ranges};
pub use signal::{require_band, require_positive, time_axis, validate_signal};
