//! Shared statistical helpers.

pub mod stats;

pub use stats::{
    mean, percentile, population_std, population_variance, quantile_normal, skewness, summarize,
    Percentiles, StatsSummary,
};
