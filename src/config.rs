//! Analysis configuration.
//!
//! The dashboard sends a small JSON object with the options below. Every key
//! is optional; missing keys take the documented defaults.
//!
//! ```
//! use sensor_analytics::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_json(r#"{"sigmaMultiplier": 2.5, "seasonalPeriod": 24}"#)
//!     .unwrap();
//! assert_eq!(config.seasonal_period, 24);
//! assert!(config.auto_box_cox);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::features::histogram::BinCount;

/// Options recognized by [`analyze`](crate::report::analyze).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Width of the I-chart limits in sigmas. Default: 3.0.
    pub sigma_multiplier: f64,

    /// Seasonal period for decomposition, in points. Default: 12.
    pub seasonal_period: usize,

    /// Chart the Box-Cox transformed series when the original is skewed.
    /// Default: true.
    pub auto_box_cox: bool,

    /// |skewness| above which the transform is applied. Default: 0.5.
    pub skewness_threshold: f64,

    /// Trailing window width for the rolling bands. Default: 5.
    pub rolling_window: usize,

    /// Fixed histogram bin count; `None` uses floor(sqrt(n)).
    pub histogram_bins: Option<usize>,

    /// |slope| above which a trend counts as increasing/decreasing.
    /// Default: 0.1.
    pub trend_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sigma_multiplier: 3.0,
            seasonal_period: 12,
            auto_box_cox: true,
            skewness_threshold: 0.5,
            rolling_window: 5,
            histogram_bins: None,
            trend_threshold: 0.1,
        }
    }
}

impl AnalysisConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the sigma multiplier for control limits.
    pub fn with_sigma_multiplier(mut self, sigma: f64) -> Self {
        self.sigma_multiplier = sigma;
        self
    }

    /// Set the seasonal period.
    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = period;
        self
    }

    /// Enable or disable automatic Box-Cox charting.
    pub fn with_auto_box_cox(mut self, enabled: bool) -> Self {
        self.auto_box_cox = enabled;
        self
    }

    /// Set the skewness threshold that triggers the Box-Cox chart.
    pub fn with_skewness_threshold(mut self, threshold: f64) -> Self {
        self.skewness_threshold = threshold;
        self
    }

    /// Set the rolling window width.
    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = window;
        self
    }

    /// Use a fixed number of histogram bins.
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the slope threshold for trend classification.
    pub fn with_trend_threshold(mut self, threshold: f64) -> Self {
        self.trend_threshold = threshold;
        self
    }

    /// Bin-count policy derived from `histogram_bins`.
    pub fn bin_count(&self) -> BinCount {
        match self.histogram_bins {
            Some(k) => BinCount::Fixed(k),
            None => BinCount::SquareRoot,
        }
    }

    /// Check that every option is in its valid range.
    pub fn validate(&self) -> Result<()> {
        if !self.sigma_multiplier.is_finite() || self.sigma_multiplier <= 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "sigmaMultiplier must be positive, got {}",
                self.sigma_multiplier
            )));
        }
        if self.seasonal_period < 2 {
            return Err(AnalysisError::InvalidParameter(format!(
                "seasonalPeriod must be >= 2, got {}",
                self.seasonal_period
            )));
        }
        if !self.skewness_threshold.is_finite() || self.skewness_threshold < 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "skewnessThreshold must be non-negative, got {}",
                self.skewness_threshold
            )));
        }
        if self.rolling_window == 0 {
            return Err(AnalysisError::InvalidParameter(
                "rollingWindow must be >= 1".to_string(),
            ));
        }
        if self.histogram_bins == Some(0) {
            return Err(AnalysisError::InvalidParameter(
                "histogramBins must be >= 1".to_string(),
            ));
        }
        if !self.trend_threshold.is_finite() || self.trend_threshold < 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "trendThreshold must be non-negative, got {}",
                self.trend_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sigma_multiplier, 3.0);
        assert_eq!(config.seasonal_period, 12);
        assert!(config.auto_box_cox);
        assert_eq!(config.skewness_threshold, 0.5);
        assert_eq!(config.rolling_window, 5);
        assert_eq!(config.histogram_bins, None);
        assert_eq!(config.trend_threshold, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = AnalysisConfig::new()
            .with_sigma_multiplier(2.0)
            .with_seasonal_period(24)
            .with_auto_box_cox(false)
            .with_skewness_threshold(1.0)
            .with_rolling_window(7)
            .with_histogram_bins(15)
            .with_trend_threshold(0.05);

        assert_eq!(config.sigma_multiplier, 2.0);
        assert_eq!(config.seasonal_period, 24);
        assert!(!config.auto_box_cox);
        assert_eq!(config.rolling_window, 7);
        assert_eq!(config.bin_count(), BinCount::Fixed(15));
    }

    #[test]
    fn from_json_uses_defaults_for_missing_keys() {
        let config = AnalysisConfig::from_json(r#"{"autoBoxCox": false}"#).unwrap();
        assert!(!config.auto_box_cox);
        assert_eq!(config.seasonal_period, 12);
        assert_eq!(config.bin_count(), BinCount::SquareRoot);
    }

    #[test]
    fn from_json_rejects_unknown_keys() {
        let err = AnalysisConfig::from_json(r#"{"sigma": 3}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn from_json_rejects_invalid_values() {
        let err = AnalysisConfig::from_json(r#"{"seasonalPeriod": 1}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter(_)));

        let err = AnalysisConfig::from_json(r#"{"histogramBins": 0}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter(_)));
    }

    #[test]
    fn validate_rejects_bad_sigma() {
        assert!(AnalysisConfig::new()
            .with_sigma_multiplier(0.0)
            .validate()
            .is_err());
        assert!(AnalysisConfig::new()
            .with_sigma_multiplier(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn validate_rejects_zero_window() {
        assert!(AnalysisConfig::new()
            .with_rolling_window(0)
            .validate()
            .is_err());
    }
}
