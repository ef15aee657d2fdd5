//! Individuals and Moving-Range (I-MR) control chart.
//!
//! Sigma is estimated from the mean moving range of consecutive points,
//! `sigma = MR-bar / d2` with `d2 = 1.128` for ranges of two observations.
//! When the series is clearly skewed and a Box-Cox lambda is available, the
//! chart can be drawn on the transformed scale instead.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587: Standard Practice for Use of Control Charts

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::transform::boxcox::{estimate_boxcox, inv_boxcox_value, BoxCoxResult};
use crate::utils::stats::{mean, summarize};

/// Minimum number of observations for a chart.
pub const MIN_OBSERVATIONS: usize = 5;

/// d2 constant for subgroups of size 2.
pub const D2: f64 = 1.128;

/// D4 constant for the MR chart upper limit (n = 2).
pub const D4_MR: f64 = 3.267;

/// Control limits for a chart.
///
/// # Invariants
///
/// - `lcl <= cl <= ucl` for a positive sigma multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlLimits {
    pub ucl: f64,
    pub cl: f64,
    pub lcl: f64,
}

/// A computed I-MR chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlChartResult {
    pub center_line: f64,
    pub upper_limit: f64,
    pub lower_limit: f64,
    /// Estimated process sigma, `MR-bar / d2` (0 when MR-bar is 0).
    pub sigma: f64,
    pub sigma_multiplier: f64,
    /// Mean of the defined moving ranges (MR-bar).
    pub moving_range_mean: f64,
    /// Upper limit of the MR chart, `D4 * MR-bar`.
    pub moving_range_upper_limit: f64,
    /// The charted values (original or transformed).
    pub values: Vec<f64>,
    /// `|x[i] - x[i-1]|`, undefined at index 0.
    pub moving_ranges: Vec<Option<f64>>,
    /// Indices strictly outside `[lower_limit, upper_limit]`.
    pub out_of_control: Vec<usize>,
    /// Whether `values` are Box-Cox transformed.
    pub used_transform: bool,
    /// Lambda of the transform, when one was used.
    pub lambda: Option<f64>,
}

impl ControlChartResult {
    /// Limits as a [`ControlLimits`] triple.
    pub fn limits(&self) -> ControlLimits {
        ControlLimits {
            ucl: self.upper_limit,
            cl: self.center_line,
            lcl: self.lower_limit,
        }
    }

    /// Check if a specific index is outside the limits.
    pub fn is_out_of_control(&self, index: usize) -> bool {
        self.out_of_control.contains(&index)
    }

    /// Check if no point falls outside the limits.
    pub fn is_in_control(&self) -> bool {
        self.out_of_control.is_empty()
    }

    /// Limits mapped back to the original measurement scale.
    ///
    /// Untransformed charts return their limits unchanged. A limit outside
    /// the inverse transform's domain comes back as NaN.
    pub fn limits_in_original_units(&self) -> ControlLimits {
        match self.lambda.filter(|_| self.used_transform) {
            Some(lambda) => ControlLimits {
                ucl: inv_boxcox_value(self.upper_limit, lambda),
                cl: inv_boxcox_value(self.center_line, lambda),
                lcl: inv_boxcox_value(self.lower_limit, lambda),
            },
            None => self.limits(),
        }
    }
}

/// Moving ranges `|x[i] - x[i-1]|`; the first entry is `None`.
pub fn moving_ranges(values: &[f64]) -> Vec<Option<f64>> {
    if values.is_empty() {
        return Vec::new();
    }
    std::iter::once(None)
        .chain(values.windows(2).map(|w| Some((w[1] - w[0]).abs())))
        .collect()
}

/// Build an I-MR chart directly on `values`.
///
/// Returns `None` with fewer than [`MIN_OBSERVATIONS`] points.
///
/// # Example
/// ```
/// use sensor_analytics::spc::individuals_chart;
///
/// let chart = individuals_chart(&[50.0, 52.0, 54.0, 53.0, 55.0, 100.0, 56.0, 54.0], 3.0)
///     .unwrap();
/// assert!(chart.is_out_of_control(5));
/// ```
pub fn individuals_chart(values: &[f64], sigma_multiplier: f64) -> Option<ControlChartResult> {
    let n = values.len();
    if n < MIN_OBSERVATIONS {
        return None;
    }
    let center_line = summarize(values).mean?;

    let ranges = moving_ranges(values);
    let defined: Vec<f64> = ranges.iter().flatten().copied().collect();
    let mr_bar = mean(&defined);
    let (moving_range_mean, sigma) = if mr_bar.is_finite() && mr_bar != 0.0 {
        (mr_bar, mr_bar / D2)
    } else {
        (0.0, 0.0)
    };

    let upper_limit = center_line + sigma_multiplier * sigma;
    let lower_limit = center_line - sigma_multiplier * sigma;

    let out_of_control = values
        .iter()
        .enumerate()
        .filter(|(_, &x)| x > upper_limit || x < lower_limit)
        .map(|(i, _)| i)
        .collect();

    Some(ControlChartResult {
        center_line,
        upper_limit,
        lower_limit,
        sigma,
        sigma_multiplier,
        moving_range_mean,
        moving_range_upper_limit: D4_MR * moving_range_mean,
        values: values.to_vec(),
        moving_ranges: ranges,
        out_of_control,
        used_transform: false,
        lambda: None,
    })
}

/// I-MR chart builder with the automatic Box-Cox policy.
///
/// The transformed series is charted when `auto_box_cox` is on, a lambda
/// exists, every point could be transformed, and the original
/// |skewness| exceeds `skewness_threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualsChart {
    sigma_multiplier: f64,
    skewness_threshold: f64,
    auto_box_cox: bool,
}

impl Default for IndividualsChart {
    fn default() -> Self {
        Self {
            sigma_multiplier: 3.0,
            skewness_threshold: 0.5,
            auto_box_cox: true,
        }
    }
}

impl IndividualsChart {
    /// Create a builder with the default 3-sigma limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the chart options from an analysis configuration.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            sigma_multiplier: config.sigma_multiplier,
            skewness_threshold: config.skewness_threshold,
            auto_box_cox: config.auto_box_cox,
        }
    }

    pub fn with_sigma_multiplier(mut self, sigma: f64) -> Self {
        self.sigma_multiplier = sigma;
        self
    }

    pub fn with_skewness_threshold(mut self, threshold: f64) -> Self {
        self.skewness_threshold = threshold;
        self
    }

    pub fn with_auto_box_cox(mut self, enabled: bool) -> Self {
        self.auto_box_cox = enabled;
        self
    }

    /// Build the chart, estimating Box-Cox if the policy may need it.
    pub fn build(&self, values: &[f64]) -> Option<ControlChartResult> {
        let box_cox = if self.auto_box_cox {
            estimate_boxcox(values)
        } else {
            None
        };
        self.build_with(values, box_cox.as_ref())
    }

    /// Build the chart reusing an existing Box-Cox estimate.
    pub fn build_with(
        &self,
        values: &[f64],
        box_cox: Option<&BoxCoxResult>,
    ) -> Option<ControlChartResult> {
        let skewness = summarize(values).skewness.unwrap_or(0.0);
        let transform = box_cox.filter(|bc| {
            self.auto_box_cox && bc.is_complete() && skewness.abs() > self.skewness_threshold
        });

        match transform {
            Some(bc) => {
                tracing::debug!(
                    lambda = bc.lambda,
                    skewness,
                    "charting box-cox transformed series"
                );
                let mut chart = individuals_chart(&bc.transformed, self.sigma_multiplier)?;
                chart.used_transform = true;
                chart.lambda = Some(bc.lambda);
                Some(chart)
            }
            None => individuals_chart(values, self.sigma_multiplier),
        }
    }
}
