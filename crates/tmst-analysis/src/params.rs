//! Diagnostics returned alongside each analysis result.
//!
//! These bundle the intermediate arrays of a pipeline run so callers can
//! inspect every stage without re-running it. They are plain data.

/// Intermediates of [`ama_spectrum`](crate::ama_spectrum).
#[derive(Debug, Clone, PartialEq)]
pub struct AmaSpectrumParams {
    /// Sample times `t[n] = (n + 1) / fs`.
    pub t: Vec<f64>,
    /// Auditory filter bandwidth per channel (Hz).
    pub aud_bw: Vec<f64>,
    /// Filterbank output `[channel][sample]`.
    pub gamma_responses: Vec<Vec<f64>>,
    /// Envelope `[channel][sample]`.
    pub envelope: Vec<Vec<f64>>,
    /// Modulation axis centres (Hz).
    pub f_spectra: Vec<f64>,
    /// Modulation axis bin edges (Hz).
    pub f_spectra_intervals: Vec<f64>,
}

/// Intermediates of [`ama_scalogram`](crate::ama_scalogram).
#[derive(Debug, Clone, PartialEq)]
pub struct AmaScalogramParams {
    /// Grid time axis, one entry per row: `t[k] = (k + 1) * 0.1`.
    pub t: Vec<f64>,
    /// Auditory filter bandwidth per channel (Hz).
    pub aud_bw: Vec<f64>,
    /// Filterbank output `[channel][sample]`.
    pub gamma_responses: Vec<Vec<f64>>,
    /// Envelope `[channel][sample]`.
    pub envelope: Vec<Vec<f64>>,
    /// Modulation frequency of each grid column (Hz).
    pub scale: Vec<f64>,
    /// Channel centre frequencies (Hz).
    pub fc: Vec<f64>,
}

/// Intermediates of [`ami_spectrum`](crate::ami_spectrum).
#[derive(Debug, Clone, PartialEq)]
pub struct AmiSpectrumParams {
    /// Sample times `t[n] = (n + 1) / fs`.
    pub t: Vec<f64>,
    /// Auditory filter bandwidth per channel (Hz).
    pub aud_bw: Vec<f64>,
    /// Filterbank output `[channel][sample]`.
    pub gamma_responses: Vec<Vec<f64>>,
    /// Envelope `[channel][sample]`.
    pub envelope: Vec<Vec<f64>>,
    /// Modulation amplitude `sqrt(2) * rms` per `[channel][mod]`.
    pub am_rms: Vec<Vec<f64>>,
    /// Envelope mean per channel.
    pub dc: Vec<f64>,
}

/// Intermediates of [`f0m_spectrum`](crate::f0m_spectrum).
#[derive(Debug, Clone, PartialEq)]
pub struct F0mSpectrumParams {
    /// Track time axis `t[k] = (k + 1) / fs_track`.
    pub t: Vec<f64>,
    /// Cleaned f0 track in Hz; rejected frames are `None`.
    pub f0: Vec<Option<f64>>,
    /// Modulation axis centres (Hz).
    pub f_spectra: Vec<f64>,
    /// Modulation axis bin edges (Hz).
    pub f_spectra_intervals: Vec<f64>,
}

/// Intermediates of [`f0m_scalogram`](crate::f0m_scalogram).
#[derive(Debug, Clone, PartialEq)]
pub struct F0mScalogramParams {
    /// Track time axis `t[k] = (k + 1) / fs_track`.
    pub t_track: Vec<f64>,
    /// Cleaned f0 track in Hz; rejected frames are `None`.
    pub f0: Vec<Option<f64>>,
    /// Modulation axis centres (Hz).
    pub f_spectra: Vec<f64>,
    /// Modulation axis bin edges (Hz).
    pub f_spectra_intervals: Vec<f64>,
    /// Grid time axis, one entry per row: `t[k] = (k + 1) * 0.1`.
    pub t: Vec<f64>,
}

/// `(k + 1) * shift` for every grid row.
pub(crate) fn grid_time_axis(rows: usize, shift: f64) -> Vec<f64> {
    (1..=rows).map(|k| k as f64 * shift).collect()
}
