//! Equal-width histogram over `[min, max]`.

use serde::Serialize;

/// How many bins to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinCount {
    /// `floor(sqrt(n))`, at least 1.
    #[default]
    SquareRoot,
    /// A fixed number of bins (0 is treated as 1).
    Fixed(usize),
}

impl BinCount {
    /// Resolve the bin count for `n` observations.
    pub fn resolve(self, n: usize) -> usize {
        match self {
            BinCount::SquareRoot => ((n as f64).sqrt().floor() as usize).max(1),
            BinCount::Fixed(k) => k.max(1),
        }
    }
}

/// One histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    /// `"lower - upper"` with two decimals.
    pub range_label: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    fn new(lower: f64, upper: f64, count: usize) -> Self {
        Self {
            range_label: format!("{lower:.2} - {upper:.2}"),
            lower,
            upper,
            count,
        }
    }
}

/// Count values into equal-width bins covering `[min, max]`.
///
/// Each value goes to bin `floor((v - min) / (max - min) * bins)`, with the
/// maximum clamped into the last bin. Ranges too wide for `max - min` to be
/// finite are still spread across the bins. A constant series yields one bin holding every
/// value; an empty series yields no bins. Order of `values` is irrelevant.
///
/// # Example
/// ```
/// use sensor_analytics::features::{histogram, BinCount};
///
/// let bins = histogram(&[1.0, 2.0, 2.5, 3.0, 4.0], BinCount::Fixed(3));
/// assert_eq!(bins.len(), 3);
/// assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
/// assert_eq!(bins[0].range_label, "1.00 - 2.00");
/// ```
pub fn histogram(values: &[f64], bins: BinCount) -> Vec<HistogramBin> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin::new(min, max, values.len())];
    }

    let n_bins = bins.resolve(values.len());
    let span = max - min;
    let fraction = |v: f64| {
        if span.is_finite() {
            (v - min) / span
        } else {
            // max - min overflowed; halving keeps both operands in range
            (v * 0.5 - min * 0.5) / (max * 0.5 - min * 0.5)
        }
    };

    let mut counts = vec![0usize; n_bins];
    for &v in values {
        let bin = ((fraction(v) * n_bins as f64).floor() as usize).min(n_bins - 1);
        counts[bin] += 1;
    }

    let edge = |i: usize| {
        let t = i as f64 / n_bins as f64;
        min * (1.0 - t) + max * t
    };

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let upper = if i + 1 == n_bins { max } else { edge(i + 1) };
            HistogramBin::new(edge(i), upper, count)
        })
        .collect()
}
