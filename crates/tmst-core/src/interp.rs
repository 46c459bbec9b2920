//! Piecewise-mean binning with interpolation into empty bins.

/// Linear interpolation of `(xs, ys)` at `x`, clamped to the end values.
///
/// `xs` must be sorted ascending and non-empty.
fn interp_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    let hi = xs.partition_point(|&v| v <= x).min(last);
    let lo = hi - 1;
    let span = xs[hi] - xs[lo];
    if span <= 0.0 {
        return ys[lo];
    }
    let w = (x - xs[lo]) / span;
    ys[lo] + w * (ys[hi] - ys[lo])
}

/// Average `y` over the bins defined by `edges` along `x`.
///
/// Bin `i` collects the points with `edges[i] <= x < edges[i + 1]`; the last
/// bin also includes its upper edge. A bin that receives no point takes the
/// value linearly interpolated at its geometric centre. Non-finite points are
/// ignored. Returns `None` when no usable point exists or fewer than two edges
/// are given.
pub fn interpmean(x: &[f64], y: &[f64], edges: &[f64]) -> Option<Vec<f64>> {
    if edges.len() < 2 {
        return None;
    }

    let mut points: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();
    if points.is_empty() {
        return None;
    }
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();

    let n_bins = edges.len() - 1;
    let mut sums = vec![0.0; n_bins];
    let mut counts = vec![0usize; n_bins];
    for &(px, py) in &points {
        let bin = if px == edges[n_bins] {
            Some(n_bins - 1)
        } else if px >= edges[0] && px < edges[n_bins] {
            Some(edges[1..n_bins].partition_point(|&e| e <= px))
        } else {
            None
        };
        if let Some(bin) = bin {
            sums[bin] += py;
            counts[bin] += 1;
        }
    }

    Some(
        (0..n_bins)
            .map(|i| {
                if counts[i] > 0 {
                    sums[i] / counts[i] as f64
                } else {
                    let center = if edges[i] > 0.0 {
                        (edges[i] * edges[i + 1]).sqrt()
                    } else {
                        0.5 * (edges[i] + edges[i + 1])
                    };
                    interp_clamped(&xs, &ys, center)
                }
            })
            .collect(),
    )
}
