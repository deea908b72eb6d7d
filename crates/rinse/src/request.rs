//! Clean request body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, RinseError};
use crate::model::RawTable;

/// `{ "data": [records...], "threshold": 0-100 }`.
///
/// Both fields are optional on the wire so that a missing `data` can be
/// reported as "No data provided" instead of a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanRequest {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl CleanRequest {
    /// Create a request for the given records.
    pub fn new(data: Vec<Value>) -> Self {
        Self {
            data: Some(data),
            threshold: None,
        }
    }

    /// Set the threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// The records, or InvalidInput when absent or empty.
    pub fn records(&self) -> Result<&[Value]> {
        match self.data.as_deref() {
            Some(records) if !records.is_empty() => Ok(records),
            _ => Err(RinseError::invalid_input("No data provided")),
        }
    }

    /// Build the raw table.
    pub fn table(&self) -> Result<RawTable> {
        RawTable::from_records(self.records()?)
    }
}
