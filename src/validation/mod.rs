//! Distributional diagnostics for sensor series.
//!
//! # Example
//!
//! ```
//! use sensor_analytics::validation::qq_plot;
//!
//! let laeq = vec![
//!     61.2, 58.4, 63.0, 59.9, 60.5, 62.1, 57.8, 60.0, 61.7, 59.1, 60.8, 62.6,
//! ];
//! let qq = qq_plot(&laeq).unwrap();
//! println!("probability plot correlation: {:?}", qq.correlation);
//! ```

pub mod normality;

pub use normality::{plotting_position, qq_plot, QQPlot, QuantilePair};
