//! Fixed-shift segmentation into overlapping analysis windows.

use std::ops::Range;

/// Window and hop lengths in samples for a window/shift given in seconds.
///
/// Both are rounded to the nearest sample and never smaller than one.
#[inline]
pub fn window_geometry(fs: f64, window_len: f64, shift: f64) -> (usize, usize) {
    let window = ((window_len * fs).round() as usize).max(1);
    let hop = ((shift * fs).round() as usize).max(1);
    (window, hop)
}

/// Number of windows [`segment_into_windows`] produces, without allocating.
///
/// Without padding only complete windows count (zero when the signal is
/// shorter than one window). With padding a trailing partial window is
/// included, and any non-empty signal yields at least one window. No window
/// ever starts past the last sample, which matters once the window is shorter
/// than the hop.
pub fn window_count(len: usize, fs: f64, window_len: f64, shift: f64, zero_pad: bool) -> usize {
    let (window, hop) = window_geometry(fs, window_len, shift);
    if len == 0 {
        return 0;
    }
    if len < window {
        return usize::from(zero_pad);
    }
    let span = len - window;
    if zero_pad {
        (span.div_ceil(hop) + 1).min((len - 1) / hop + 1)
    } else {
        span / hop + 1
    }
}

/// Sample ranges of the windows [`segment_into_windows`] would produce,
/// clipped to the signal.
///
/// Lets callers borrow each window from the signal instead of copying it. A
/// clipped range is shorter than the window length returned by
/// [`window_geometry`]; the missing tail is the padding.
pub fn window_ranges(
    len: usize,
    fs: f64,
    window_len: f64,
    shift: f64,
    zero_pad: bool,
) -> impl Iterator<Item = Range<usize>> {
    let (window, hop) = window_geometry(fs, window_len, shift);
    let count = window_count(len, fs, window_len, shift, zero_pad);
    (0..count).map(move |i| {
        let start = i * hop;
        start..(start + window).min(len)
    })
}

/// Split `signal` into overlapping windows of `window_len` seconds every
/// `shift` seconds.
///
/// When `zero_pad` is set, the trailing partial window is completed with
/// `fill`; otherwise it is dropped.
pub fn segment_into_windows<T: Clone>(
    signal: &[T],
    fs: f64,
    window_len: f64,
    shift: f64,
    zero_pad: bool,
    fill: T,
) -> Vec<Vec<T>> {
    let (window, _) = window_geometry(fs, window_len, shift);
    window_ranges(signal.len(), fs, window_len, shift, zero_pad)
        .map(|range| {
            let mut frame = signal[range].to_vec();
            frame.resize(window, fill.clone());
            frame
        })
        .collect()
}
