//! Full analysis of one sensor series.
//!
//! [`analyze`] runs every statistical component on a cleaned [`Series`] and
//! collects the results into an [`AnalysisReport`]. Components that cannot be
//! computed (too few points, no spread) are left out and listed in
//! [`AnalysisReport::skipped`] with the reason.
//!
//! # Example
//!
//! ```
//! use sensor_analytics::config::AnalysisConfig;
//! use sensor_analytics::core::Series;
//! use sensor_analytics::report::analyze;
//!
//! let series = Series::from_values(vec![50.0, 52.0, 54.0, 53.0, 55.0, 100.0, 56.0, 54.0]).unwrap();
//! let report = analyze(&series, &AnalysisConfig::default());
//!
//! let chart = report.control_chart.as_ref().unwrap();
//! assert_eq!(chart.out_of_control, vec![5]);
//! assert!(report.qq_plot.is_none()); // fewer than 10 points
//! ```

use std::fmt;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::core::Series;
use crate::error::{AnalysisError, Result};
use crate::features::{histogram, linear_trend, HistogramBin, TrendResult};
use crate::seasonality::{decompose, DecompositionResult};
use crate::spc::{imr, ControlChartResult, IndividualsChart};
use crate::transform::{boxcox, estimate_boxcox, rolling_bands, BoxCoxResult, RollingBands};
use crate::utils::{summarize, Percentiles, StatsSummary};
use crate::validation::{normality, qq_plot, QQPlot};

/// A report component that may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    BoxCox,
    ControlChart,
    QqPlot,
    Decomposition,
    Trend,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::BoxCox => "box-cox",
            Component::ControlChart => "control chart",
            Component::QqPlot => "q-q plot",
            Component::Decomposition => "decomposition",
            Component::Trend => "trend",
        };
        f.write_str(name)
    }
}

/// A component left out of the report and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedComponent {
    pub component: Component,
    pub reason: String,
}

/// Everything computed for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub labels: Vec<String>,
    /// Moments of the original series.
    pub summary: StatsSummary,
    /// P50/P90/P95 of the original series.
    pub percentiles: Percentiles,
    pub box_cox: Option<BoxCoxResult>,
    pub control_chart: Option<ControlChartResult>,
    /// Always built from the original series.
    pub qq_plot: Option<QQPlot>,
    pub decomposition: Option<DecompositionResult>,
    pub histogram: Vec<HistogramBin>,
    pub rolling: RollingBands,
    pub trend: Option<TrendResult>,
    /// Whether the control chart was drawn on the Box-Cox scale.
    pub used_transform: bool,
    pub skipped: Vec<SkippedComponent>,
}

impl AnalysisReport {
    /// Check whether a component was skipped.
    pub fn is_skipped(&self, component: Component) -> bool {
        self.skipped.iter().any(|s| s.component == component)
    }

    /// Render the report as JSON with camelCase keys. Non-finite numbers
    /// become `null`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| AnalysisError::InvalidParameter(e.to_string()))
    }

    /// Pretty-printed variant of [`to_json`](Self::to_json).
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::InvalidParameter(e.to_string()))
    }
}

/// Collects skip reasons while the report is assembled.
#[derive(Default)]
struct Skips(Vec<SkippedComponent>);

impl Skips {
    fn record<T>(
        &mut self,
        result: Option<T>,
        component: Component,
        why: impl FnOnce() -> AnalysisError,
    ) -> Option<T> {
        if result.is_none() {
            let reason = why().to_string();
            tracing::debug!(%component, %reason, "component skipped");
            self.0.push(SkippedComponent { component, reason });
        }
        result
    }
}

/// Run the full analysis on `series` with `config`.
///
/// Statistics, percentiles, the Q-Q plot and the decomposition always use
/// the original values. The control chart follows the automatic Box-Cox
/// policy of [`IndividualsChart`], reusing the lambda estimated here.
pub fn analyze(series: &Series, config: &AnalysisConfig) -> AnalysisReport {
    let values = series.values();
    let n = values.len();
    let _span = tracing::debug_span!("analyze", n).entered();

    let summary = summarize(values);
    let percentiles = Percentiles::compute(values);
    let mut skips = Skips::default();

    let box_cox = skips.record(estimate_boxcox(values), Component::BoxCox, || {
        let positive = values.iter().filter(|&&x| x > 0.0).count();
        if positive < boxcox::MIN_POSITIVE {
            AnalysisError::InsufficientData {
                needed: boxcox::MIN_POSITIVE,
                got: positive,
            }
        } else {
            AnalysisError::DegenerateInput("no lambda yields a defined skewness".into())
        }
    });

    let control_chart = skips.record(
        IndividualsChart::from_config(config).build_with(values, box_cox.as_ref()),
        Component::ControlChart,
        || AnalysisError::InsufficientData {
            needed: imr::MIN_OBSERVATIONS,
            got: n,
        },
    );
    let used_transform = control_chart.as_ref().is_some_and(|c| c.used_transform);
    tracing::debug!(used_transform, "control chart scale");

    let qq = skips.record(qq_plot(values), Component::QqPlot, || {
        if n < normality::MIN_OBSERVATIONS {
            AnalysisError::InsufficientData {
                needed: normality::MIN_OBSERVATIONS,
                got: n,
            }
        } else {
            AnalysisError::DegenerateInput("zero standard deviation".into())
        }
    });

    let decomposition = skips.record(
        decompose(values, config.seasonal_period),
        Component::Decomposition,
        || AnalysisError::EmptyData,
    );

    let trend = skips.record(
        linear_trend(values, config.trend_threshold),
        Component::Trend,
        || AnalysisError::InsufficientData { needed: 2, got: n },
    );

    AnalysisReport {
        labels: series.labels().to_vec(),
        summary,
        percentiles,
        box_cox,
        control_chart,
        qq_plot: qq,
        decomposition,
        histogram: histogram(values, config.bin_count()),
        rolling: rolling_bands(values, config.rolling_window),
        trend,
        used_transform,
        skipped: skips.0,
    }
}
