//! Descriptive statistics, percentiles and the inverse normal CDF.
//!
//! All moments use the population convention (divide by `n`). Inputs are
//! assumed to be finite; filter NaN/infinite values beforehand.

use serde::Serialize;

/// Moment summary of a series.
///
/// `mean` and `std` are `None` for an empty series, or when they overflow
/// for values of extreme spread. `skewness` is also `None` when the standard
/// deviation is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub n: usize,
    pub mean: Option<f64>,
    /// Population standard deviation.
    pub std: Option<f64>,
    /// Third standardized moment, m3 / std^3.
    pub skewness: Option<f64>,
}

impl StatsSummary {
    /// Whether the series has a positive spread.
    pub fn has_variance(&self) -> bool {
        self.std.is_some_and(|s| s > 0.0)
    }
}

/// Compute count, mean, population standard deviation and skewness.
///
/// # Example
/// ```
/// use sensor_analytics::utils::summarize;
///
/// let s = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert_eq!(s.mean, Some(5.0));
/// assert_eq!(s.std, Some(2.0));
/// ```
pub fn summarize(values: &[f64]) -> StatsSummary {
    let n = values.len();
    if n == 0 {
        return StatsSummary::default();
    }
    // Constant input: avoid rounding noise in the mean producing a tiny spread.
    if values.iter().all(|&v| v == values[0]) {
        return StatsSummary {
            n,
            mean: Some(values[0]),
            std: Some(0.0),
            skewness: None,
        };
    }

    let mean = mean(values);
    if !mean.is_finite() {
        return StatsSummary {
            n,
            ..StatsSummary::default()
        };
    }
    let nf = n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / nf;
    let std = variance.sqrt();
    if !std.is_finite() {
        return StatsSummary {
            n,
            mean: Some(mean),
            ..StatsSummary::default()
        };
    }

    // Standardize before cubing so m3 / std^3 cannot overflow.
    let skewness = if std > 0.0 {
        let m3 = values.iter().map(|v| ((v - mean) / std).powi(3)).sum::<f64>() / nf;
        Some(m3).filter(|s| s.is_finite())
    } else {
        None
    };

    StatsSummary {
        n,
        mean: Some(mean),
        std: Some(std),
        skewness,
    }
}

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the population variance of a slice (n denominator).
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Calculate the population standard deviation of a slice.
pub fn population_std(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Skewness of a slice, `None` when empty or constant.
pub fn skewness(values: &[f64]) -> Option<f64> {
    summarize(values).skewness
}

/// Sample variance (n-1 denominator), used for component strengths.
pub(crate) fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Sort a copy of `values` ascending.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Linearly interpolated percentile, `p` in `[0, 100]`.
///
/// Uses the fractional index `(p / 100) * (n - 1)` into the sorted values.
/// `p` outside the range is clamped. Returns `None` for an empty slice.
///
/// # Example
/// ```
/// use sensor_analytics::utils::percentile;
///
/// assert_eq!(percentile(&[5.0, 1.0, 3.0, 2.0, 4.0], 50.0), Some(3.0));
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0), Some(2.5));
/// ```
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(percentile_of_sorted(&sorted(values), p))
}

fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
    let idx = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (idx - lo as f64)
}

/// The percentiles shown on the dashboard summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Percentiles {
    pub p50: Option<f64>,
    pub p90: Option<f64>,
    pub p95: Option<f64>,
}

impl Percentiles {
    /// Compute P50, P90 and P95 with a single sort.
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let sorted = sorted(values);
        Self {
            p50: Some(percentile_of_sorted(&sorted, 50.0)),
            p90: Some(percentile_of_sorted(&sorted, 90.0)),
            p95: Some(percentile_of_sorted(&sorted, 95.0)),
        }
    }
}

// Acklam's rational approximation coefficients.
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

/// Lower breakpoint between the tail and central regions.
const P_LOW: f64 = 0.02425;
const P_HIGH: f64 = 1.0 - P_LOW;

/// Quantile function (inverse CDF) of the standard normal distribution.
///
/// Rational approximation by P. J. Acklam with relative error below
/// 1.15e-9 over the open unit interval. Separate rational functions cover
/// the lower tail (`p < 0.02425`), the central region and the upper tail
/// (`p > 0.97575`).
///
/// # Example
/// ```
/// use sensor_analytics::utils::quantile_normal;
///
/// let z = quantile_normal(0.975);
/// assert!((z - 1.959964).abs() < 1e-6);
/// ```
pub fn quantile_normal(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        tail(q)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -tail(q)
    }
}

fn tail(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}
