//! Trailing rolling-window statistics and deviation bands.
//!
//! Windows are trailing and partial at the start of the series: index `i`
//! covers `series[max(0, i - w + 1)..=i]`, so every position has a value.

use serde::Serialize;

use crate::utils::stats::{mean, population_std};

/// Moving average with a ±1 standard deviation band.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingBands {
    /// Window width actually used.
    pub window: usize,
    pub moving_avg: Vec<f64>,
    /// Population standard deviation of each window.
    pub rolling_std: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl RollingBands {
    pub fn len(&self) -> usize {
        self.moving_avg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moving_avg.is_empty()
    }
}

/// Apply `f` to each trailing window. A width of 0 is treated as 1.
fn rolling_apply<F>(series: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let window = window.max(1);
    (0..series.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            f(&series[start..=i])
        })
        .collect()
}

/// Compute rolling mean (moving average).
pub fn rolling_mean(series: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(series, window, mean)
}

/// Compute rolling population standard deviation.
pub fn rolling_std(series: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(series, window, population_std)
}

/// Moving average, rolling standard deviation and the band
/// `moving_avg ± rolling_std`.
///
/// # Example
/// ```
/// use sensor_analytics::transform::rolling_bands;
///
/// let bands = rolling_bands(&[400.0, 410.0, 420.0], 2);
/// assert_eq!(bands.moving_avg, vec![400.0, 405.0, 415.0]);
/// assert_eq!(bands.upper[1], 410.0);
/// ```
pub fn rolling_bands(series: &[f64], window: usize) -> RollingBands {
    let moving_avg = rolling_mean(series, window);
    let rolling_std = rolling_std(series, window);

    let upper = moving_avg
        .iter()
        .zip(&rolling_std)
        .map(|(m, s)| m + s)
        .collect();
    let lower = moving_avg
        .iter()
        .zip(&rolling_std)
        .map(|(m, s)| m - s)
        .collect();

    RollingBands {
        window: window.max(1),
        moving_avg,
        rolling_std,
        upper,
        lower,
    }
}
