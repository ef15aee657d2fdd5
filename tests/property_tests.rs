//! Property-based tests for the analysis components.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated sensor-like series.

use proptest::prelude::*;
use sensor_analytics::config::AnalysisConfig;
use sensor_analytics::core::Series;
use sensor_analytics::features::{histogram, linear_trend, BinCount};
use sensor_analytics::report::analyze;
use sensor_analytics::seasonality::decompose;
use sensor_analytics::spc::individuals_chart;
use sensor_analytics::transform::{boxcox_value, estimate_boxcox, rolling_bands};
use sensor_analytics::utils::{percentile, summarize};

/// Strategy for generating positive sensor readings.
/// Adds small variation to avoid all-constant series.
fn readings_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(1.0..1000.0_f64, len).prop_map(|mut v| {
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 0.001;
            }
            v
        })
    })
}

/// Strategy for right-skewed series evenly spaced on a log scale.
fn log_spaced_strategy() -> impl Strategy<Value = Vec<f64>> {
    (20usize..80, 1.0..50.0_f64, 2.0..5.0_f64).prop_map(|(len, base, span)| {
        (0..len)
            .map(|i| base * (span * i as f64 / len as f64).exp())
            .collect()
    })
}

// =============================================================================
// Property: standard deviation is non-negative
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn std_is_non_negative(values in prop::collection::vec(-500.0..500.0_f64, 1..100)) {
        let stats = summarize(&values);
        let std = stats.std.unwrap();
        prop_assert!(std >= 0.0);
        if std == 0.0 {
            prop_assert!(values.iter().all(|&v| v == values[0]));
        }
    }

    #[test]
    fn constant_series_has_no_spread(value in 1.0..1000.0_f64, len in 1usize..60) {
        let values = vec![value; len];
        let stats = summarize(&values);
        prop_assert!(stats.std.unwrap() <= 1e-9 * value);
    }
}

// =============================================================================
// Property: percentiles stay within the data range
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn percentile_within_bounds(values in readings_strategy(1, 80), p in 0.0..=100.0_f64) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let q = percentile(&values, p).unwrap();
        prop_assert!(q >= min - 1e-9 && q <= max + 1e-9);
        prop_assert_eq!(percentile(&values, 0.0), Some(min));
        prop_assert_eq!(percentile(&values, 100.0), Some(max));
    }

    #[test]
    fn percentile_is_monotone(values in readings_strategy(2, 60), a in 0.0..=100.0_f64, b in 0.0..=100.0_f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(percentile(&values, lo).unwrap() <= percentile(&values, hi).unwrap() + 1e-9);
    }
}

// =============================================================================
// Property: Box-Cox family identities and skewness reduction
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn boxcox_identity_family(x in 0.001..1.0e4_f64) {
        let linear = boxcox_value(x, 1.0).unwrap();
        let log = boxcox_value(x, 0.0).unwrap();
        prop_assert!((linear - (x - 1.0)).abs() <= 1e-9 * x.max(1.0));
        prop_assert!((log - x.ln()).abs() <= 1e-12);
    }

    #[test]
    fn boxcox_never_increases_skewness(values in readings_strategy(10, 80)) {
        let original = summarize(&values).skewness.unwrap().abs();
        let result = estimate_boxcox(&values).unwrap();
        let transformed = result.transformed_skewness.unwrap().abs();
        // lambda = 1 is on the grid and preserves |skewness|
        prop_assert!(transformed <= original + 1e-9);
        prop_assert!(result.is_complete());
    }

    #[test]
    fn boxcox_reduces_skewness_of_log_spaced_data(values in log_spaced_strategy()) {
        let original = summarize(&values).skewness.unwrap();
        let result = estimate_boxcox(&values).unwrap();
        prop_assert!(original > 0.0);
        prop_assert!(result.transformed_skewness.unwrap().abs() < original.abs());
    }
}

// =============================================================================
// Property: control chart limits
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn zero_variance_chart_collapses(value in 1.0..1000.0_f64, len in 5usize..60) {
        let values = vec![value; len];
        let chart = individuals_chart(&values, 3.0).unwrap();
        let mean = summarize(&values).mean.unwrap();

        prop_assert_eq!(chart.sigma, 0.0);
        prop_assert_eq!(chart.upper_limit, mean);
        prop_assert_eq!(chart.lower_limit, mean);
        prop_assert!(chart.out_of_control.is_empty());
    }

    #[test]
    fn chart_limits_are_ordered(values in readings_strategy(5, 80), sigma in 0.5..4.0_f64) {
        let chart = individuals_chart(&values, sigma).unwrap();
        prop_assert!(chart.lower_limit <= chart.center_line);
        prop_assert!(chart.center_line <= chart.upper_limit);
        for &i in &chart.out_of_control {
            let x = values[i];
            prop_assert!(x > chart.upper_limit || x < chart.lower_limit);
        }
    }
}

// =============================================================================
// Property: decomposition components sum to the series
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn decomposition_identity(values in readings_strategy(1, 120), period in 0usize..30) {
        let result = decompose(&values, period).unwrap();
        prop_assert_eq!(result.trend.len(), values.len());
        prop_assert!(result.period <= values.len());

        for i in 0..values.len() {
            let sum = result.trend[i] + result.seasonal[i] + result.residual[i];
            prop_assert!((sum - values[i]).abs() < 1e-8);
        }
    }
}

// =============================================================================
// Property: histogram counts every value exactly once
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn histogram_counts_sum_to_n(values in readings_strategy(1, 200), bins in 0usize..40) {
        for policy in [BinCount::SquareRoot, BinCount::Fixed(bins)] {
            let hist = histogram(&values, policy);
            prop_assert_eq!(hist.iter().map(|b| b.count).sum::<usize>(), values.len());
        }
    }
}

// =============================================================================
// Property: rolling window of one is the identity
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn rolling_window_one_is_identity(values in readings_strategy(1, 100)) {
        let bands = rolling_bands(&values, 1);
        prop_assert_eq!(&bands.moving_avg, &values);
        prop_assert!(bands.rolling_std.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn rolling_bands_enclose_average(values in readings_strategy(1, 100), window in 0usize..20) {
        let bands = rolling_bands(&values, window);
        prop_assert_eq!(bands.len(), values.len());
        for i in 0..values.len() {
            prop_assert!(bands.lower[i] <= bands.moving_avg[i]);
            prop_assert!(bands.moving_avg[i] <= bands.upper[i]);
        }
    }
}

// =============================================================================
// Property: trend regression recovers exact lines
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn linear_trend_recovers_line(
        slope in -5.0..5.0_f64,
        intercept in -100.0..100.0_f64,
        len in 2usize..100
    ) {
        let values: Vec<f64> = (0..len).map(|i| slope * i as f64 + intercept).collect();
        let trend = linear_trend(&values, 0.1).unwrap();
        prop_assert!((trend.slope - slope).abs() < 1e-6);
        prop_assert!((trend.intercept - intercept).abs() < 1e-6);
    }
}

// =============================================================================
// Property: the full report never panics
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn analyze_handles_any_length(values in prop::collection::vec(-50.0..150.0_f64, 0..60)) {
        let series = Series::from_values(values.clone()).unwrap();
        let report = analyze(&series, &AnalysisConfig::default());

        prop_assert_eq!(report.summary.n, values.len());
        prop_assert_eq!(report.histogram.iter().map(|b| b.count).sum::<usize>(), values.len());
        prop_assert_eq!(report.control_chart.is_some(), values.len() >= 5);
        prop_assert!(report.to_json().is_ok());
    }
}
