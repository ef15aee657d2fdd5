//! Linear trend over the observation index.
//!
//! Fits `y = slope * x + intercept` by ordinary least squares with
//! `x = 0, 1, ..., n-1` and classifies the slope against a threshold.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Slope threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Direction of a fitted trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// Classify a slope: above `threshold` is increasing, below `-threshold`
    /// decreasing, anything in between stable.
    pub fn classify(slope: f64, threshold: f64) -> Self {
        if slope > threshold {
            TrendDirection::Increasing
        } else if slope < -threshold {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }
}

/// Result of the least-squares fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    /// Slope of the fitted line (units per observation)
    pub slope: f64,
    /// Intercept of the fitted line
    pub intercept: f64,
    /// R-squared (coefficient of determination)
    pub r_squared: f64,
    /// Two-sided p-value for `slope != 0` from Student's t with `n - 2`
    /// degrees of freedom. `None` with fewer than 3 points or a perfect fit.
    pub p_value: Option<f64>,
    pub direction: TrendDirection,
    /// Number of observations in the fit
    pub n: usize,
}

impl TrendResult {
    /// Value of the fitted line at index `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Fitted values at every index of the original series.
    pub fn fitted(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.predict(i as f64)).collect()
    }
}

/// Fit a linear trend to `series`.
///
/// Returns `None` with fewer than 2 points.
///
/// # Example
/// ```
/// use sensor_analytics::features::{linear_trend, TrendDirection};
///
/// let series: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
/// let trend = linear_trend(&series, 0.1).unwrap();
/// assert!((trend.slope - 2.0).abs() < 1e-10);
/// assert_eq!(trend.direction, TrendDirection::Increasing);
/// ```
pub fn linear_trend(series: &[f64], threshold: f64) -> Option<TrendResult> {
    if series.len() < 2 {
        return None;
    }

    let n = series.len() as f64;

    // x values are indices 0, 1, 2, ...
    let sum_x: f64 = (0..series.len()).map(|i| i as f64).sum();
    let sum_y: f64 = series.iter().sum();
    let sum_xy: f64 = series.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..series.len()).map(|i| (i * i) as f64).sum();

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let ss_yy: f64 = series.iter().map(|&y| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = series
        .iter()
        .enumerate()
        .map(|(i, &y)| (y - (slope * i as f64 + intercept)).powi(2))
        .sum();

    let r_squared = if ss_yy.abs() < 1e-10 {
        1.0 // Perfect fit for constant y
    } else {
        (1.0 - ss_res / ss_yy).max(0.0)
    };

    let ss_xx = denom / n;
    let p_value = slope_p_value(slope, ss_res, ss_xx, series.len());

    Some(TrendResult {
        slope,
        intercept,
        r_squared,
        p_value,
        direction: TrendDirection::classify(slope, threshold),
        n: series.len(),
    })
}

fn slope_p_value(slope: f64, ss_res: f64, ss_xx: f64, n: usize) -> Option<f64> {
    if n < 3 {
        return None;
    }
    let df = (n - 2) as f64;
    let stderr = (ss_res / df / ss_xx).sqrt();
    if !stderr.is_finite() || stderr < 1e-12 {
        return None;
    }

    let t_stat = slope / stderr;
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t_stat.abs()))).clamp(0.0, 1.0))
}
