//! ERB-rate scale (Glasberg & Moore 1990) and auditory filter bandwidths.

/// Convert frequency in Hz to ERB-rate units.
pub fn freq_to_erb(f_hz: f64) -> f64 {
    9.2645 * f_hz.signum() * (1.0 + f_hz.abs() * 0.00437).ln()
}

/// Convert ERB-rate units back to Hz.
pub fn erb_to_freq(erb: f64) -> f64 {
    (1.0 / 0.00437) * erb.signum() * ((erb.abs() / 9.2645).exp() - 1.0)
}

/// Equivalent rectangular bandwidth of the auditory filter centred at `fc`.
#[inline]
pub fn aud_filt_bw_hz(fc: f64) -> f64 {
    24.7 + fc / 9.265
}

/// Per-channel auditory bandwidths for a set of centre frequencies.
pub fn aud_filt_bw(fc: &[f64]) -> Vec<f64> {
    fc.iter().map(|&f| aud_filt_bw_hz(f)).collect()
}

/// Centre frequencies spaced `bw_mul` ERBs apart between `f_low` and `f_high`.
///
/// Whatever part of the range does not fit a whole number of steps is split
/// evenly between both ends, so the grid sits centred in the requested band.
pub fn erbspace_bw(f_low: f64, f_high: f64, bw_mul: f64) -> Vec<f64> {
    let erb_low = freq_to_erb(f_low);
    let erb_high = freq_to_erb(f_high);
    let range = erb_high - erb_low;
    if range < 0.0 || bw_mul <= 0.0 {
        return Vec::new();
    }

    let steps = (range / bw_mul).floor() as usize;
    let remainder = range - steps as f64 * bw_mul;
    (0..=steps)
        .map(|i| erb_to_freq(erb_low + i as f64 * bw_mul + remainder / 2.0))
        .collect()
}
