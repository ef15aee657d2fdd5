//! Data transformations for sensor series.
//!
//! Provides the Box-Cox power transform with lambda search and trailing
//! rolling-window statistics.
//!
//! # Example
//!
//! ```
//! use sensor_analytics::transform::{boxcox, estimate_boxcox, rolling_bands};
//!
//! let series: Vec<f64> = (1..=20).map(|i| 40.0 + (i * i) as f64 / 10.0).collect();
//!
//! // Box-Cox transformation with a fixed lambda
//! let sqrt_like = boxcox(&series, 0.5);
//!
//! // Lambda search
//! let bc = estimate_boxcox(&series);
//!
//! // Moving average with ±1 sd band, window 5
//! let bands = rolling_bands(&series, 5);
//! ```

pub mod boxcox;
pub mod window;

// Re-export from boxcox
pub use boxcox::{
    boxcox, boxcox_lambda, boxcox_value, estimate_boxcox, inv_boxcox, inv_boxcox_value,
    BoxCoxResult,
};

// Re-export from window
pub use window::{rolling_bands, rolling_mean, rolling_std, RollingBands};
