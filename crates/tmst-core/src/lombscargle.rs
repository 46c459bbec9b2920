//! Lomb-Scargle periodogram for irregularly sampled series.
//!
//! Uses the classical time-shifted form (Scargle 1982) on the mean-removed
//! series. The result is scaled by the mean sampling interval so that, for
//! regularly sampled data, it has the same units as
//! [`periodogram`](crate::periodogram::periodogram).

use std::f64::consts::PI;

/// Power at a single angular frequency.
fn power_at(times: &[f64], centered: &[f64], omega: f64) -> f64 {
    if omega <= 0.0 {
        return 0.0;
    }

    let (mut sum_sin2, mut sum_cos2) = (0.0, 0.0);
    for &t in times {
        let arg = 2.0 * omega * t;
        sum_sin2 += arg.sin();
        sum_cos2 += arg.cos();
    }
    let tau = sum_sin2.atan2(sum_cos2) / (2.0 * omega);

    let (mut yc, mut ys, mut cc, mut ss) = (0.0, 0.0, 0.0, 0.0);
    for (&t, &y) in times.iter().zip(centered) {
        let arg = omega * (t - tau);
        let (s, c) = arg.sin_cos();
        yc += y * c;
        ys += y * s;
        cc += c * c;
        ss += s * s;
    }

    let mut power = 0.0;
    if cc > 1e-15 {
        power += yc * yc / cc;
    }
    if ss > 1e-15 {
        power += ys * ys / ss;
    }
    0.5 * power
}

/// Lomb-Scargle power spectral density of `values` sampled at `times`,
/// evaluated at each of `freqs` (Hz).
///
/// Samples whose time or value is not finite are ignored. Returns `None` when
/// fewer than two usable samples remain or they all share one time stamp.
pub fn lombscargle(times: &[f64], values: &[f64], freqs: &[f64]) -> Option<Vec<f64>> {
    let (t, y): (Vec<f64>, Vec<f64>) = times
        .iter()
        .zip(values)
        .filter(|(t, y)| t.is_finite() && y.is_finite())
        .map(|(&t, &y)| (t, y))
        .unzip();
    let n = t.len();
    if n < 2 {
        return None;
    }

    let (t_min, t_max) = t
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = t_max - t_min;
    if span <= 0.0 {
        return None;
    }
    let mean_dt = span / (n - 1) as f64;

    let mean = y.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = y.iter().map(|v| v - mean).collect();

    Some(
        freqs
            .iter()
            .map(|&f| power_at(&t, &centered, 2.0 * PI * f) * mean_dt)
            .collect(),
    )
}

/// Lomb-Scargle over a series with missing samples.
///
/// Pairs whose value is `None` are dropped before estimation.
pub fn lombscargle_optional(times: &[f64], values: &[Option<f64>], freqs: &[f64]) -> Option<Vec<f64>> {
    let (t, y): (Vec<f64>, Vec<f64>) = times
        .iter()
        .zip(values)
        .filter_map(|(&t, v)| v.map(|v| (t, v)))
        .unzip();
    lombscargle(&t, &y, freqs)
}
