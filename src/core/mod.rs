//! Core data structures for sensor series.

mod series;

pub use series::{Observation, Series, TIMESTAMP_LABEL_FORMAT};
