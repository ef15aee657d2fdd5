//! Statistical process control charts.
//!
//! - [`IndividualsChart`]: Individual-MR chart builder with automatic Box-Cox
//! - [`individuals_chart`]: plain I-MR limits on a given series

pub mod imr;

pub use imr::{
    individuals_chart, moving_ranges, ControlChartResult, ControlLimits, IndividualsChart, D2,
    D4_MR,
};
