//! Box-Cox power transformation.
//!
//! The estimator picks the lambda whose transformed series is the least
//! skewed, using a coarse grid over `[-2, 4]` followed by a fine grid around
//! the coarse winner. Only strictly positive values take part.

use serde::Serialize;

use crate::utils::stats::summarize;

/// Minimum number of positive (and finite transformed) values required.
pub const MIN_POSITIVE: usize = 10;

/// Coarse search: `[-2, 4]` in steps of 0.5.
const COARSE_START: f64 = -2.0;
const COARSE_END: f64 = 4.0;
const COARSE_STEP: f64 = 0.5;

/// Fine search: `best ± 0.5` in steps of 0.05.
const FINE_HALF_WIDTH: f64 = 0.5;
const FINE_STEP: f64 = 0.05;

/// Lambdas closer to zero than this use the log transform.
const LAMBDA_ZERO_TOL: f64 = 1e-10;

/// Result of Box-Cox estimation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxCoxResult {
    /// Lambda with the smallest |skewness| on the grid.
    pub lambda: f64,
    /// Finite transformed values, in series order.
    pub transformed: Vec<f64>,
    /// Skewness of `transformed`.
    pub transformed_skewness: Option<f64>,
    /// Number of input values that could not be transformed (x <= 0 or
    /// non-finite result).
    pub dropped: usize,
}

impl BoxCoxResult {
    /// True when every input value was transformed, so `transformed` lines
    /// up index-for-index with the input.
    pub fn is_complete(&self) -> bool {
        self.dropped == 0
    }

    /// Inverse transform to recover original scale.
    pub fn inverse(&self) -> Vec<f64> {
        inv_boxcox(&self.transformed, self.lambda)
    }
}

/// Transform a single value, `None` when `x <= 0` or the result is not
/// finite.
///
/// For lambda == 0: y = ln(x); otherwise y = (x^lambda - 1) / lambda.
pub fn boxcox_value(x: f64, lambda: f64) -> Option<f64> {
    if x <= 0.0 {
        return None;
    }
    let y = if lambda.abs() < LAMBDA_ZERO_TOL {
        x.ln()
    } else {
        (x.powf(lambda) - 1.0) / lambda
    };
    y.is_finite().then_some(y)
}

/// Apply Box-Cox transformation with a given lambda.
///
/// Non-positive values map to NaN so the output keeps the input length.
pub fn boxcox(series: &[f64], lambda: f64) -> Vec<f64> {
    series
        .iter()
        .map(|&x| boxcox_value(x, lambda).unwrap_or(f64::NAN))
        .collect()
}

/// Inverse of a single Box-Cox value.
pub fn inv_boxcox_value(y: f64, lambda: f64) -> f64 {
    if lambda.abs() < LAMBDA_ZERO_TOL {
        y.exp()
    } else {
        let val = lambda * y + 1.0;
        if val <= 0.0 {
            f64::NAN
        } else {
            val.powf(1.0 / lambda)
        }
    }
}

/// Inverse Box-Cox transformation.
///
/// For lambda != 0: x = (lambda * y + 1)^(1/lambda)
/// For lambda == 0: x = exp(y)
pub fn inv_boxcox(transformed: &[f64], lambda: f64) -> Vec<f64> {
    transformed
        .iter()
        .map(|&y| inv_boxcox_value(y, lambda))
        .collect()
}

/// Lambdas from `start` to `end` inclusive.
fn grid(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let steps = ((end - start) / step + 1e-9).floor().max(0.0) as usize;
    (0..=steps).map(move |k| start + k as f64 * step)
}

/// |skewness| of the transformed positive values, `None` if the candidate
/// is unusable.
fn score(positive: &[f64], lambda: f64) -> Option<f64> {
    let transformed: Vec<f64> = positive
        .iter()
        .filter_map(|&x| boxcox_value(x, lambda))
        .collect();
    if transformed.len() < MIN_POSITIVE {
        return None;
    }
    summarize(&transformed).skewness.map(f64::abs)
}

/// Find the lambda minimizing |skewness| of the transformed series.
///
/// Returns `None` when fewer than [`MIN_POSITIVE`] positive values exist or
/// no candidate produces a defined skewness (e.g. all values equal).
pub fn boxcox_lambda(series: &[f64]) -> Option<f64> {
    let positive: Vec<f64> = series.iter().copied().filter(|&x| x > 0.0).collect();
    if positive.len() < MIN_POSITIVE {
        return None;
    }

    let mut best = None;
    search(
        &positive,
        grid(COARSE_START, COARSE_END, COARSE_STEP),
        &mut best,
    );
    let center = best.map_or(1.0, |(lambda, _)| lambda);
    search(
        &positive,
        grid(center - FINE_HALF_WIDTH, center + FINE_HALF_WIDTH, FINE_STEP),
        &mut best,
    );

    best.map(|(lambda, _)| lambda)
}

/// Update `best` with any candidate scoring strictly lower.
fn search(
    positive: &[f64],
    lambdas: impl Iterator<Item = f64>,
    best: &mut Option<(f64, f64)>,
) {
    for lambda in lambdas {
        let Some(s) = score(positive, lambda) else {
            continue;
        };
        tracing::trace!(lambda, abs_skewness = s, "box-cox candidate");
        if best.map_or(true, |(_, best_score)| s < best_score) {
            *best = Some((lambda, s));
        }
    }
}

/// Estimate lambda and transform the series with it.
///
/// # Example
/// ```
/// use sensor_analytics::transform::estimate_boxcox;
///
/// let skewed: Vec<f64> = (1..=30).map(|i| (i as f64 * 0.2).exp()).collect();
/// let result = estimate_boxcox(&skewed).unwrap();
/// assert!(result.lambda.abs() < 0.3);
/// assert!(result.is_complete());
/// ```
pub fn estimate_boxcox(series: &[f64]) -> Option<BoxCoxResult> {
    let lambda = boxcox_lambda(series)?;
    let transformed: Vec<f64> = series
        .iter()
        .filter_map(|&x| boxcox_value(x, lambda))
        .collect();
    let dropped = series.len() - transformed.len();
    let transformed_skewness = summarize(&transformed).skewness;

    tracing::debug!(
        lambda,
        transformed_skewness = ?transformed_skewness,
        dropped,
        "box-cox lambda selected"
    );

    Some(BoxCoxResult {
        lambda,
        transformed,
        transformed_skewness,
        dropped,
    })
}
