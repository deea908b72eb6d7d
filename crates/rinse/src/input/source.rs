//! Input source metadata.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::RawTable;

/// Metadata about an input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, json, ...).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(path: PathBuf, size_bytes: u64, format: impl Into<String>, table: &RawTable) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            size_bytes,
            format: format.into(),
            row_count: table.row_count(),
            column_count: table.column_count(),
        }
    }
}

/// A parsed input file.
#[derive(Debug, Clone)]
pub struct ParsedInput {
    /// The records as a raw table.
    pub table: RawTable,
    /// Threshold carried by the file (JSON request bodies only).
    pub threshold: Option<f64>,
    /// Where the table came from.
    pub source: SourceMetadata,
}
