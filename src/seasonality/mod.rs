//! Trend and seasonal decomposition.
//!
//! Splits a series into a centered moving-average trend, a per-phase
//! seasonal pattern and the residual.

pub mod decompose;

pub use decompose::{decompose, effective_period, DecompositionResult};
