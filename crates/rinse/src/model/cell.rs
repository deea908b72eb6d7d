//! Tagged cell values.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// A single value in a table.
///
/// `Missing` is its own variant and is never conflated with `0` or `""`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// A numeric value. Always finite when built through [`Cell::number`].
    Number(f64),
    /// A text value, kept verbatim (no trimming).
    Text(String),
    /// An absent value.
    #[default]
    Missing,
}

impl Cell {
    /// Build a numeric cell, mapping non-finite values to `Missing`.
    pub fn number(value: f64) -> Self {
        if value.is_finite() {
            Cell::Number(value)
        } else {
            Cell::Missing
        }
    }

    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Returns true for the `Missing` variant.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a JSON scalar into a cell.
    ///
    /// Booleans become the text `"true"`/`"false"` and are returned as those
    /// strings in cleaned output, since a cell is only ever a number or text.
    /// Arrays and objects are rejected; the error names the offending JSON
    /// type.
    pub fn from_json(value: &Value) -> Result<Self, &'static str> {
        match value {
            Value::Null => Ok(Cell::Missing),
            Value::Bool(b) => Ok(Cell::Text(b.to_string())),
            Value::Number(n) => Ok(n.as_f64().map(Cell::number).unwrap_or_default()),
            Value::String(s) => Ok(Cell::Text(s.clone())),
            Value::Array(_) => Err("array"),
            Value::Object(_) => Err("object"),
        }
    }

    /// Parse a field read from delimited text.
    ///
    /// The empty string and common NA tokens are `Missing`, finite numbers are
    /// `Number`, everything else (whitespace-only included) is `Text`.
    pub fn parse_field(field: &str) -> Self {
        if is_na_token(field) {
            return Cell::Missing;
        }
        match field.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(field.to_string()),
        }
    }

    /// A hashable identity for this cell.
    ///
    /// Two cells have equal keys iff they are the same value; `-0.0` and
    /// `0.0` share a key and `Missing` equals `Missing`.
    pub(crate) fn key(&self) -> CellKey<'_> {
        match self {
            Cell::Number(v) if *v == 0.0 => CellKey::Number(0.0f64.to_bits()),
            Cell::Number(v) => CellKey::Number(v.to_bits()),
            Cell::Text(s) => CellKey::Text(s),
            Cell::Missing => CellKey::Missing,
        }
    }
}

/// NA spellings recognised in delimited input.
const NA_TOKENS: &[&str] = &["na", "n/a", "null", "nan", "none"];

fn is_na_token(field: &str) -> bool {
    field.is_empty() || NA_TOKENS.iter().any(|t| field.eq_ignore_ascii_case(t))
}

/// Hashable view of a [`Cell`], used for mode counting and deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CellKey<'a> {
    Number(u64),
    Text(&'a str),
    Missing,
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Number(v) => serializer.serialize_f64(*v),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Missing => serializer.serialize_none(),
        }
    }
}

/// Renders the value as a delimited-text field; `Missing` is empty.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => Ok(()),
        }
    }
}
