//! Artifact removal for f0 tracks.
//!
//! Pitch trackers produce octave jumps, isolated blips and out-of-range
//! estimates around voicing boundaries. [`remove_artifacts`] replaces those
//! samples with `None` and never changes the length of the track.
//!
//! Rejection happens in four passes:
//!
//! 1. Samples outside the frequency bounds (or non-positive / non-finite) are
//!    dropped.
//! 2. Voiced runs are split wherever two consecutive samples differ by more
//!    than `max_jump` semitones.
//! 3. Runs shorter than `min_duration` are dropped.
//! 4. Within regions separated by gaps longer than `max_gap_ms`, samples whose
//!    ratio to the region median falls outside `ratio_bounds` are dropped.

/// Parameters for [`remove_artifacts`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtifactParams {
    /// Sample rate of the track in Hz.
    pub fs: f64,
    /// Largest accepted frame-to-frame jump in semitones.
    pub max_jump: f64,
    /// Shortest accepted voiced run in seconds.
    pub min_duration: f64,
    /// Accepted f0 range in Hz, `(low, high)`.
    pub freq_bounds: (f64, f64),
    /// Accepted ratio to the regional median, `(low, high)`.
    pub ratio_bounds: (f64, f64),
    /// Gaps longer than this (milliseconds) start a new region for the
    /// median-ratio check.
    pub max_gap_ms: f64,
}

/// Contiguous index ranges `[start, end)` of `Some` samples.
fn voiced_runs(track: &[Option<f64>]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, v) in track.iter().enumerate() {
        match (v.is_some(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, track.len()));
    }
    runs
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        0.5 * (values[mid - 1] + values[mid])
    } else {
        values[mid]
    }
}

/// Replace rejected f0 samples with `None`.
pub fn remove_artifacts(track: &[Option<f64>], params: &ArtifactParams) -> Vec<Option<f64>> {
    let (f_low, f_high) = params.freq_bounds;
    let mut out: Vec<Option<f64>> = track
        .iter()
        .map(|v| v.filter(|&f| f.is_finite() && f > 0.0 && f >= f_low && f <= f_high))
        .collect();
    let out_of_bounds = track.iter().zip(&out).filter(|(a, b)| a.is_some() && b.is_none()).count();

    // Break runs at discontinuities.
    let mut segment_starts = vec![false; out.len()];
    for (start, end) in voiced_runs(&out) {
        segment_starts[start] = true;
        for i in start + 1..end {
            if let (Some(prev), Some(cur)) = (out[i - 1], out[i]) {
                let semitones = 12.0 * (cur / prev).log2();
                if semitones.abs() > params.max_jump {
                    segment_starts[i] = true;
                }
            }
        }
    }

    // Drop segments shorter than the minimum duration.
    let min_len = ((params.min_duration * params.fs).round() as usize).max(1);
    let mut short = 0usize;
    let mut i = 0;
    while i < out.len() {
        if out[i].is_none() {
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        while i < out.len() && out[i].is_some() && !segment_starts[i] {
            i += 1;
        }
        if i - start < min_len {
            short += i - start;
            out[start..i].fill(None);
        }
    }

    // Reject samples far from the median of their region.
    let max_gap = (params.max_gap_ms / 1000.0 * params.fs).round() as usize;
    let mut regions: Vec<(usize, usize)> = Vec::new();
    for (start, end) in voiced_runs(&out) {
        match regions.last_mut() {
            Some(last) if start - last.1 <= max_gap => last.1 = end,
            _ => regions.push((start, end)),
        }
    }
    let (r_low, r_high) = params.ratio_bounds;
    let mut outliers = 0usize;
    for (start, end) in regions {
        let mut voiced: Vec<f64> = out[start..end].iter().flatten().copied().collect();
        if voiced.is_empty() {
            continue;
        }
        let reference = median(&mut voiced);
        for v in &mut out[start..end] {
            if let Some(f) = *v {
                let ratio = f / reference;
                if ratio < r_low || ratio > r_high {
                    *v = None;
                    outliers += 1;
                }
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        out_of_bounds,
        short,
        outliers,
        kept = out.iter().filter(|v| v.is_some()).count(),
        "remove_artifacts"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (out_of_bounds, short, outliers);

    out
}
