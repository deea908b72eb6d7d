//! CSV/TSV/JSON/workbook file reader with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use calamine::{Data, Reader};

use crate::error::{Result, RinseError};
use crate::model::{Cell, RawTable};
use crate::request::CleanRequest;

use super::source::{ParsedInput, SourceMetadata};

/// Delimiter candidates, in tie-break order.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Non-blank lines sampled for delimiter detection.
const SNIFF_LINES: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether delimited files have a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Reads tabular input files into a [`RawTable`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file. `.json` files are read as records, spreadsheet
    /// workbooks (`.xlsx`, `.xls`, `.ods`, ...) from their first sheet, and
    /// anything else as delimited text.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParsedInput> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| RinseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let (table, threshold, format) = match extension.as_deref() {
            Some("json") => {
                let (table, threshold) = self.parse_json(&contents)?;
                (table, threshold, "json")
            }
            Some(ext @ ("xlsx" | "xlsm" | "xlsb" | "xls" | "ods")) => {
                let table = self.parse_workbook(&contents)?;
                (table, None, workbook_format(ext))
            }
            _ => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(&contents)?,
                };
                let table = self.parse_delimited(&contents, delimiter)?;
                (table, None, format_name(delimiter))
            }
        };

        let source = SourceMetadata::new(path.to_path_buf(), size_bytes, format, &table);

        Ok(ParsedInput {
            table,
            threshold,
            source,
        })
    }

    /// Parse a JSON document: a list of records or a full clean request.
    pub fn parse_json(&self, bytes: &[u8]) -> Result<(RawTable, Option<f64>)> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        let request = match value {
            serde_json::Value::Array(records) => CleanRequest::new(records),
            other => serde_json::from_value::<CleanRequest>(other)?,
        };

        let mut table = request.table()?;
        if let Some(max) = self.config.max_rows {
            let (names, mut rows) = table.into_parts();
            rows.truncate(max);
            table = RawTable::new(names, rows)?;
        }
        Ok((table, request.threshold))
    }

    /// Parse delimited bytes.
    pub fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }
            records.push(result?);
        }

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            // Generate column names
            let width = records.iter().map(|r| r.len()).max().unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(RinseError::invalid_input("No columns found"));
        }
        if records.is_empty() {
            return Err(RinseError::invalid_input("No data provided"));
        }

        let expected_cols = headers.len();
        let rows = records
            .iter()
            .map(|record| {
                let mut row: Vec<Cell> = record.iter().map(Cell::parse_field).collect();
                // Pad short rows, truncate long ones
                row.resize(expected_cols, Cell::Missing);
                row
            })
            .collect();

        RawTable::new(headers, rows)
    }

    /// Parse the first sheet of a spreadsheet workbook.
    ///
    /// Numbers and dates become `Number`, strings `Text` (verbatim), booleans
    /// the text `"true"`/`"false"`, and empty or error cells `Missing`.
    /// Rows with no values at all are skipped.
    pub fn parse_workbook(&self, bytes: &[u8]) -> Result<RawTable> {
        let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| RinseError::invalid_input("Workbook has no sheets"))??;

        let mut sheet_rows = range.rows();
        let headers: Vec<String> = if self.config.has_header {
            sheet_rows
                .next()
                .map(|row| {
                    row.iter()
                        .enumerate()
                        .map(|(i, cell)| header_name(cell, i))
                        .collect()
                })
                .unwrap_or_default()
        } else {
            (0..range.width()).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(RinseError::invalid_input("No columns found"));
        }

        let rows: Vec<Vec<Cell>> = sheet_rows
            .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
            .take(self.config.max_rows.unwrap_or(usize::MAX))
            .map(|row| {
                let mut cells: Vec<Cell> = row.iter().map(workbook_cell).collect();
                cells.resize(headers.len(), Cell::Missing);
                cells
            })
            .collect();

        if rows.is_empty() {
            return Err(RinseError::invalid_input("No data provided"));
        }

        RawTable::new(headers, rows)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

fn workbook_format(extension: &str) -> &'static str {
    match extension {
        "xls" => "xls",
        "xlsb" => "xlsb",
        "xlsm" => "xlsm",
        "ods" => "ods",
        _ => "xlsx",
    }
}

fn workbook_cell(cell: &Data) -> Cell {
    match cell {
        Data::Int(v) => Cell::number(*v as f64),
        Data::Float(v) => Cell::number(*v),
        Data::DateTime(dt) => Cell::number(dt.as_f64()),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::Empty | Data::Error(_) => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

/// Header text for a workbook column; blank headers get a positional name.
fn header_name(cell: &Data, index: usize) -> String {
    match cell {
        Data::Empty => format!("column_{}", index + 1),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pick the delimiter from a sample of the first lines.
///
/// A candidate that splits every sampled line into the same number of fields
/// beats one that does not; among equals, more fields win and earlier
/// candidates in [`DELIMITERS`] win ties. Falls back to comma.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let sample: Vec<String> = BufReader::new(bytes)
        .lines()
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    if sample.is_empty() {
        return Err(RinseError::invalid_input("No data provided"));
    }

    let best = DELIMITERS
        .iter()
        .filter_map(|&delim| {
            let counts: Vec<usize> = sample.iter().map(|l| unquoted_count(l, delim)).collect();
            let header = counts[0];
            (header > 0).then(|| {
                let uniform = counts.iter().all(|&c| c == header);
                (delim, (uniform, header))
            })
        })
        // max_by_key keeps the last maximum, so scan candidates in reverse
        .rev()
        .max_by_key(|&(_, rank)| rank)
        .map(|(delim, _)| delim);

    Ok(best.unwrap_or(b','))
}

/// Occurrences of `delimiter` outside double quotes.
fn unquoted_count(line: &str, delimiter: u8) -> usize {
    line.bytes()
        .scan(false, |quoted, b| {
            if b == b'"' {
                *quoted = !*quoted;
            }
            Some(b == delimiter && !*quoted)
        })
        .filter(|&hit| hit)
        .count()
}
