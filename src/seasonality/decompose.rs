//! Classical additive decomposition with an edge-shrinking trend window.
//!
//! - Trend: centered moving average with half-width `period / 2`. Near the
//!   ends the window is truncated to the available points, so the trend is
//!   defined everywhere.
//! - Seasonal: mean of the detrended values sharing the same phase
//!   `i mod period`, repeated over the series.
//! - Residual: what is left, so `trend + seasonal + residual == series`.

use serde::Serialize;

use crate::utils::stats::{mean, sample_variance};

/// Result of the decomposition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecompositionResult {
    /// Seasonal period actually used after clamping.
    pub period: usize,
    /// Trend component.
    pub trend: Vec<f64>,
    /// Seasonal component.
    pub seasonal: Vec<f64>,
    /// Residual component.
    pub residual: Vec<f64>,
}

impl DecompositionResult {
    /// One cycle of the seasonal pattern.
    pub fn seasonal_pattern(&self) -> &[f64] {
        &self.seasonal[..self.period.min(self.seasonal.len())]
    }

    /// Get the seasonal strength (0 to 1).
    /// Values close to 1 indicate strong seasonality.
    pub fn seasonal_strength(&self) -> f64 {
        strength(&self.seasonal, &self.residual)
    }

    /// Get the trend strength (0 to 1).
    /// Values close to 1 indicate strong trend.
    pub fn trend_strength(&self) -> f64 {
        strength(&self.trend, &self.residual)
    }
}

/// `1 - Var(residual) / Var(component + residual)`, clamped to `[0, 1]`.
fn strength(component: &[f64], residual: &[f64]) -> f64 {
    let var_remainder = sample_variance(residual);
    let combined: Vec<f64> = component
        .iter()
        .zip(residual.iter())
        .map(|(c, r)| c + r)
        .collect();
    let var_combined = sample_variance(&combined);

    if var_combined.is_nan() || var_combined < 1e-10 || var_remainder.is_nan() {
        return 0.0;
    }

    (1.0 - var_remainder / var_combined).clamp(0.0, 1.0)
}

/// Clamp a requested period to the series length.
///
/// `min(requested, n)`, raised to `min(2, n)` when below 2. `None` for an
/// empty series.
pub fn effective_period(requested: usize, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let period = requested.min(n);
    Some(if period < 2 { 2.min(n) } else { period })
}

/// Decompose `series` into trend, seasonal and residual components.
///
/// Returns `None` for an empty series.
///
/// # Example
/// ```
/// use sensor_analytics::seasonality::decompose;
///
/// let hourly: Vec<f64> = (0..48).map(|h| 55.0 + if h % 24 < 12 { 3.0 } else { -3.0 }).collect();
/// let parts = decompose(&hourly, 24).unwrap();
/// assert_eq!(parts.period, 24);
/// assert_eq!(parts.trend.len(), 48);
/// ```
pub fn decompose(series: &[f64], seasonal_period: usize) -> Option<DecompositionResult> {
    let n = series.len();
    let period = effective_period(seasonal_period, n)?;
    let half = period / 2;

    let trend: Vec<f64> = (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half).min(n - 1);
            mean(&series[start..=end])
        })
        .collect();

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, (y, t)) in series.iter().zip(trend.iter()).enumerate() {
        sums[i % period] += y - t;
        counts[i % period] += 1;
    }
    let pattern: Vec<f64> = sums
        .iter()
        .zip(counts.iter())
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();

    let seasonal: Vec<f64> = (0..n).map(|i| pattern[i % period]).collect();

    let residual: Vec<f64> = series
        .iter()
        .zip(trend.iter())
        .zip(seasonal.iter())
        .map(|((y, t), s)| y - t - s)
        .collect();

    Some(DecompositionResult {
        period,
        trend,
        seasonal,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn seasonal_series(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 50.0 + 0.05 * i as f64 + 6.0 * (2.0 * PI * i as f64 / period as f64).sin())
            .collect()
    }

    #[test]
    fn components_sum_to_series() {
        let series = seasonal_series(72, 12);
        let result = decompose(&series, 12).unwrap();

        for i in 0..series.len() {
            assert_relative_eq!(
                result.trend[i] + result.seasonal[i] + result.residual[i],
                series[i],
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn trend_window_shrinks_at_edges() {
        let series = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = decompose(&series, 4).unwrap();

        // half = 2: index 0 averages [1, 2, 3], index 3 averages [2..=6]
        assert_relative_eq!(result.trend[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(result.trend[3], 4.0, epsilon = 1e-12);
        assert_relative_eq!(result.trend[6], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn seasonal_repeats_with_period() {
        let series = seasonal_series(60, 12);
        let result = decompose(&series, 12).unwrap();

        assert_eq!(result.seasonal_pattern().len(), 12);
        for i in 12..series.len() {
            assert_eq!(result.seasonal[i], result.seasonal[i - 12]);
        }
    }

    #[test]
    fn seasonal_pattern_tracks_sine() {
        let series = seasonal_series(120, 12);
        let result = decompose(&series, 12).unwrap();
        let pattern = result.seasonal_pattern();

        // Peak of the sine is at phase 3, trough at phase 9.
        assert!(pattern[3] > 4.0);
        assert!(pattern[9] < -4.0);
        assert!(result.seasonal_strength() > 0.8);
    }

    #[test]
    fn period_is_clamped_to_length() {
        let series = vec![3.0, 1.0, 4.0, 1.0, 5.0];
        let result = decompose(&series, 12).unwrap();
        assert_eq!(result.period, 5);
    }

    #[test]
    fn effective_period_rules() {
        assert_eq!(effective_period(12, 0), None);
        assert_eq!(effective_period(12, 1), Some(1));
        assert_eq!(effective_period(12, 100), Some(12));
        assert_eq!(effective_period(1, 100), Some(2));
        assert_eq!(effective_period(0, 3), Some(2));
    }

    #[test]
    fn single_point_series() {
        let result = decompose(&[58.0], 12).unwrap();
        assert_eq!(result.trend, vec![58.0]);
        assert_eq!(result.seasonal, vec![0.0]);
        assert_eq!(result.residual, vec![0.0]);
    }

    #[test]
    fn empty_series_is_none() {
        assert!(decompose(&[], 12).is_none());
    }

    #[test]
    fn constant_series_has_no_strength() {
        let result = decompose(&[40.0; 36], 12).unwrap();
        assert!(result.seasonal.iter().all(|&s| s.abs() < 1e-12));
        assert_eq!(result.seasonal_strength(), 0.0);
        assert_eq!(result.trend_strength(), 0.0);
    }

    #[test]
    fn linear_series_has_strong_trend() {
        let series: Vec<f64> = (0..48).map(|i| 30.0 + 2.0 * i as f64).collect();
        let result = decompose(&series, 12).unwrap();
        assert!(result.trend_strength() > 0.9);
    }
}
