//! Distribution and trend features of a sensor series.
//!
//! # Example
//!
//! ```
//! use sensor_analytics::features::{histogram, linear_trend, BinCount};
//!
//! let series = vec![52.0, 54.5, 53.1, 58.2, 60.0, 57.4, 61.3, 63.0, 62.2];
//!
//! // Equal-width bins, floor(sqrt(n)) of them
//! let bins = histogram(&series, BinCount::SquareRoot);
//!
//! // Least-squares trend classified with a 0.1 slope threshold
//! let trend = linear_trend(&series, 0.1);
//! ```

pub mod histogram;
pub mod trend;

pub use histogram::{histogram, BinCount, HistogramBin};
pub use trend::{linear_trend, TrendDirection, TrendResult};
