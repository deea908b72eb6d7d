//! Raw and typed tables.

use indexmap::{IndexMap, IndexSet};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::cell::Cell;
use super::column::Column;
use crate::error::{Result, RinseError};

/// One row of cells, aligned with the table's columns.
pub type Row = Vec<Cell>;

/// A table as received, before column kinds are inferred.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    names: Vec<String>,
    rows: Vec<Row>,
}

impl RawTable {
    /// Create a raw table. Every row must have one cell per column name.
    pub fn new(names: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let unique: IndexSet<&str> = names.iter().map(String::as_str).collect();
        if unique.len() != names.len() {
            return Err(RinseError::invalid_input("Duplicate column names"));
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != names.len())
        {
            return Err(RinseError::invalid_input(format!(
                "Row {} has {} cells, expected {}",
                index,
                row.len(),
                names.len()
            )));
        }
        Ok(Self { names, rows })
    }

    /// Build a table from JSON records.
    ///
    /// Object records map column name to value; array records map position
    /// to value under the column names `"0"`, `"1"`, ... Columns are the union
    /// of keys in first-seen order and absent keys become `Missing`.
    pub fn from_records(records: &[Value]) -> Result<Self> {
        if records.is_empty() {
            return Err(RinseError::invalid_input("No data provided"));
        }

        let mut names: IndexSet<String> = IndexSet::new();
        let mut parsed: Vec<IndexMap<String, Cell>> = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let fields: Vec<(String, &Value)> = match record {
                Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect(),
                other => {
                    return Err(RinseError::invalid_input(format!(
                        "Record {} must be an object or an array, got {}",
                        index,
                        json_type_name(other)
                    )));
                }
            };

            let mut row = IndexMap::with_capacity(fields.len());
            for (name, value) in fields {
                let cell = Cell::from_json(value).map_err(|kind| {
                    RinseError::invalid_input(format!(
                        "Record {}, column '{}': nested {} values are not supported",
                        index, name, kind
                    ))
                })?;
                names.insert(name.clone());
                row.insert(name, cell);
            }
            parsed.push(row);
        }

        let rows = parsed
            .into_iter()
            .map(|mut record| {
                names
                    .iter()
                    .map(|name| record.swap_remove(name).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Self {
            names: names.into_iter().collect(),
            rows,
        })
    }

    /// Column names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Split into names and rows.
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.names, self.rows)
    }
}

/// A table whose column kinds have been inferred.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Create a typed table. Rows must already be aligned with `columns`.
    pub(crate) fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Column definitions in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All cells of a column, top to bottom.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Keep only the rows for which `keep` returns true, preserving order.
    pub fn retain_rows(mut self, keep: impl FnMut(&Row) -> bool) -> Self {
        self.rows.retain(keep);
        self
    }

    /// Replace every cell of one column with `f(cell)`.
    pub(crate) fn map_column(mut self, index: usize, mut f: impl FnMut(&Cell) -> Cell) -> Self {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(index) {
                *cell = f(cell);
            }
        }
        self
    }

    /// Replace every cell of the table with `f(cell)`.
    pub(crate) fn map_cells(mut self, mut f: impl FnMut(&Cell) -> Cell) -> Self {
        for cell in self.rows.iter_mut().flatten() {
            *cell = f(cell);
        }
        self
    }

    /// Serializable view of the rows as name → value records.
    pub fn records(&self) -> Records<'_> {
        Records { table: self }
    }

    /// Split into columns and rows.
    pub fn into_parts(self) -> (Vec<Column>, Vec<Row>) {
        (self.columns, self.rows)
    }
}

/// Serializes a [`Table`] as a list of records, columns in table order.
#[derive(Debug, Clone, Copy)]
pub struct Records<'a> {
    table: &'a Table,
}

struct RecordRef<'a> {
    columns: &'a [Column],
    row: &'a Row,
}

impl Serialize for Records<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.table.rows.len()))?;
        for row in &self.table.rows {
            seq.serialize_element(&RecordRef {
                columns: &self.table.columns,
                row,
            })?;
        }
        seq.end()
    }
}

impl Serialize for RecordRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.row) {
            map.serialize_entry(&column.name, cell)?;
        }
        map.end()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
