//! Error types for the sensor-analytics library.
//!
//! Statistical routines never fail for short or degenerate series; they
//! return `None` instead. These errors describe malformed input at the
//! boundary and explain why a report component was skipped.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while building or analyzing a series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Input has no usable spread (zero variance, no positive values, ...).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between labels and values.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A NaN or infinite value was passed where clean data is required.
    #[error("non-finite value at index {index}")]
    NonFiniteValue { index: usize },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),
}
