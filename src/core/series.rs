//! Labelled observation series, built from values, timestamps or JSON rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Label format used for timestamped observations.
pub const TIMESTAMP_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single labelled measurement (e.g. the mean LAeq of one day or hour).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: String,
    pub value: f64,
}

impl Observation {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Row shape delivered by the upstream aggregation endpoints, where the
/// value may be missing.
#[derive(Debug, Deserialize)]
struct RawObservation {
    label: String,
    value: Option<f64>,
}

/// A chronologically ordered, labelled series of finite values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Series {
    /// Create a series from parallel labels and values.
    ///
    /// Fails if the lengths differ or any value is NaN/infinite.
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(AnalysisError::DimensionMismatch {
                expected: values.len(),
                got: labels.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(AnalysisError::NonFiniteValue { index });
        }
        Ok(Self { labels, values })
    }

    /// Create a series labelled by position ("0", "1", ...).
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        let labels = (0..values.len()).map(|i| i.to_string()).collect();
        Self::new(labels, values)
    }

    /// Create a series from timestamps, formatted with
    /// [`TIMESTAMP_LABEL_FORMAT`].
    ///
    /// Timestamps must be strictly increasing.
    pub fn from_timestamps(timestamps: &[DateTime<Utc>], values: Vec<f64>) -> Result<Self> {
        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(AnalysisError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        let labels = timestamps
            .iter()
            .map(|t| t.format(TIMESTAMP_LABEL_FORMAT).to_string())
            .collect();
        Self::new(labels, values)
    }

    /// Build a series from observations, dropping non-finite values.
    pub fn cleaned<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut labels = Vec::new();
        let mut values = Vec::new();
        let mut dropped = 0usize;

        for obs in observations {
            if obs.value.is_finite() {
                labels.push(obs.label);
                values.push(obs.value);
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            tracing::warn!(dropped, kept = values.len(), "dropped non-finite observations");
        }

        Self { labels, values }
    }

    /// Parse a JSON array of `{"label": ..., "value": ...}` rows.
    ///
    /// Rows whose value is `null` are dropped, like non-finite values in
    /// [`Series::cleaned`].
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<RawObservation> = serde_json::from_str(json)
            .map_err(|e| AnalysisError::InvalidParameter(format!("series JSON: {e}")))?;
        let total = rows.len();
        let present: Vec<Observation> = rows
            .into_iter()
            .filter_map(|row| row.value.map(|value| Observation::new(row.label, value)))
            .collect();
        let missing = total - present.len();
        if missing > 0 {
            tracing::warn!(missing, "dropped observations with null values");
        }
        Ok(Self::cleaned(present))
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observation labels, in series order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Observation values, in series order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over `(label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Copy the series out as observations.
    pub fn observations(&self) -> Vec<Observation> {
        self.iter()
            .map(|(label, value)| Observation::new(label, value))
            .collect()
    }
}

impl FromIterator<Observation> for Series {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self::cleaned(iter)
    }
}
