//! Writing cleaned tables to disk.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RinseError};
use crate::model::Table;
use crate::pipeline::CleanReport;

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Default output path: `<stem>_cleaned.<ext>` next to the input.
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}_cleaned.{}", stem, format.extension()))
}

/// Write a cleaned report to `path`.
pub fn export(report: &CleanReport, format: OutputFormat, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| RinseError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    write_report(report, format, &mut writer)?;

    writer.flush().map_err(|e| RinseError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a cleaned report to any writer.
pub fn write_report<W: Write>(report: &CleanReport, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => write_delimited(&report.table, b',', writer),
        OutputFormat::Tsv => write_delimited(&report.table, b'\t', writer),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(writer, &report.output())?;
            Ok(())
        }
    }
}

/// Write a table as delimited text with a header row. Missing cells are
/// written as empty fields.
pub fn write_delimited<W: Write>(table: &Table, delimiter: u8, writer: W) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(table.columns().iter().map(|c| c.name.as_str()))?;
    for row in table.rows() {
        out.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}
