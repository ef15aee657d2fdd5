//! Normal Q-Q diagnostic.
//!
//! Sorted observations are paired with the normal quantiles expected at the
//! same rank. Theoretical quantiles use Blom's plotting position
//! `(i + 1 - 0.375) / (n + 0.25)`, scaled by the series mean and population
//! standard deviation, so a normal sample lies on the line `y = x`.

use serde::Serialize;

use crate::utils::stats::{quantile_normal, sorted, summarize};

/// Minimum number of observations for a Q-Q plot.
pub const MIN_OBSERVATIONS: usize = 10;

/// One point of the Q-Q plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantilePair {
    pub theoretical: f64,
    pub observed: f64,
}

/// Q-Q plot data with its `y = x` reference segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QQPlot {
    /// Pairs sorted by observed value ascending.
    pub points: Vec<QuantilePair>,
    /// Endpoints of the ideal line at the extremes of the theoretical axis.
    pub reference_line: [QuantilePair; 2],
    /// Pearson correlation of theoretical against observed quantiles.
    pub correlation: Option<f64>,
}

impl QQPlot {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Plotting position for 0-based rank `i` out of `n`.
pub fn plotting_position(i: usize, n: usize) -> f64 {
    (i as f64 + 1.0 - 0.375) / (n as f64 + 0.25)
}

/// Build Q-Q plot data for `values` against a fitted normal.
///
/// Returns `None` with fewer than [`MIN_OBSERVATIONS`] points or zero
/// standard deviation.
pub fn qq_plot(values: &[f64]) -> Option<QQPlot> {
    let stats = summarize(values);
    if stats.n < MIN_OBSERVATIONS || !stats.has_variance() {
        return None;
    }
    let (mean, std) = (stats.mean?, stats.std?);
    let n = values.len();

    let points: Vec<QuantilePair> = sorted(values)
        .into_iter()
        .enumerate()
        .map(|(i, observed)| QuantilePair {
            theoretical: mean + std * quantile_normal(plotting_position(i, n)),
            observed,
        })
        .collect();

    // Plotting positions increase with rank, so the extremes are the ends.
    let lo = points[0].theoretical;
    let hi = points[n - 1].theoretical;
    let reference_line = [
        QuantilePair {
            theoretical: lo,
            observed: lo,
        },
        QuantilePair {
            theoretical: hi,
            observed: hi,
        },
    ];

    let correlation = pearson(&points);

    Some(QQPlot {
        points,
        reference_line,
        correlation,
    })
}

fn pearson(points: &[QuantilePair]) -> Option<f64> {
    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.theoretical).sum::<f64>() / n;
    let my = points.iter().map(|p| p.observed).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p.theoretical - mx;
        let dy = p.observed - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    (denom > 0.0).then(|| sxy / denom)
}
