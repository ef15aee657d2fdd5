//! # sensor-analytics
//!
//! Statistical analysis of environmental sensor series (sound level,
//! air quality, underground station readings).
//!
//! Given a cleaned series of labelled values, the library computes
//! descriptive statistics and percentiles, a Box-Cox normalizing transform,
//! an Individuals/Moving-Range control chart, a normal Q-Q diagnostic, an
//! additive trend/seasonal/residual decomposition, a histogram, rolling
//! deviation bands and a linear trend. [`report::analyze`] runs them all.
//!
//! ```
//! use sensor_analytics::prelude::*;
//!
//! let series = Series::from_json(
//!     r#"[{"label": "08:00", "value": 61.2}, {"label": "09:00", "value": null},
//!         {"label": "10:00", "value": 64.8}]"#,
//! )
//! .unwrap();
//! let report = analyze(&series, &AnalysisConfig::default());
//! assert_eq!(report.summary.n, 2);
//! ```

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod report;
pub mod seasonality;
pub mod spc;
pub mod transform;
pub mod utils;
pub mod validation;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::config::AnalysisConfig;
    pub use crate::core::{Observation, Series};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::report::{analyze, AnalysisReport, Component};
    pub use crate::utils::{percentile, summarize, Percentiles, StatsSummary};
}
