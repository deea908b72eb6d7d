//! Error types for the rinse library.

use std::path::PathBuf;
use thiserror::Error;

use crate::stage::Stage;

/// Main error type for rinse operations.
#[derive(Debug, Error)]
pub enum RinseError {
    /// The caller supplied unusable input (no data, bad threshold, malformed records).
    ///
    /// Always raised before any cleaning stage runs.
    #[error("{0}")]
    InvalidInput(String),

    /// A cleaning stage hit a fatal failure. The whole run is aborted.
    #[error("{stage} failed: {message}")]
    Computation { stage: Stage, message: String },

    /// Invalid pipeline configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error reading a spreadsheet workbook.
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RinseError {
    /// Shorthand for an [`RinseError::InvalidInput`] error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        RinseError::InvalidInput(message.into())
    }

    /// Returns true if the error was caused by what the caller sent rather
    /// than by the cleaning itself.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            RinseError::InvalidInput(_) | RinseError::Config(_) | RinseError::Json(_)
        )
    }
}

/// Result type alias for rinse operations.
pub type Result<T> = std::result::Result<T, RinseError>;
