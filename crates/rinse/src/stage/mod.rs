//! Cleaning stages.
//!
//! Every stage is a pure transform that takes a [`Table`] by value and hands a
//! new one back. Stages that can skip work on a column report it through
//! [`SkipNote`]s; only the domain check can fail outright.

pub mod completeness;
pub mod dedup;
pub mod domain;
pub mod impute;
pub mod inference;
pub mod normalize;
pub mod purge;
pub mod scrub;
mod stats;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Table;

/// A step of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Column kind inference. Always runs first and cannot be reordered.
    Inference,
    /// Drop rows below the completeness threshold.
    Completeness,
    /// Fill missing cells with the column mean or mode.
    Impute,
    /// Z-score numeric columns.
    Normalize,
    /// Drop rows that still contain a missing cell.
    Purge,
    /// Turn whitespace-only text into missing cells.
    Scrub,
    /// Drop exact duplicate rows.
    Dedup,
    /// Keep rows with a non-negative `age`.
    DomainCheck,
}

impl Stage {
    /// The reorderable stages, in their default order.
    pub const DEFAULT_ORDER: [Stage; 7] = [
        Stage::Completeness,
        Stage::Impute,
        Stage::Normalize,
        Stage::Purge,
        Stage::Scrub,
        Stage::Dedup,
        Stage::DomainCheck,
    ];

    /// Get a human-readable label for the stage.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Inference => "schema inference",
            Stage::Completeness => "completeness filter",
            Stage::Impute => "imputation",
            Stage::Normalize => "normalization",
            Stage::Purge => "missing-row purge",
            Stage::Scrub => "blank-text scrub",
            Stage::Dedup => "deduplication",
            Stage::DomainCheck => "domain check",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A column a stage could not fully process, and why. Never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkipNote {
    /// Numeric column with no values to average; missing cells kept.
    NoValues { column: String },
    /// Categorical column with no values to take a mode of; missing cells kept.
    NoMode { column: String },
    /// Numeric column that could not be scaled. With fewer than two values
    /// its cells became missing; otherwise they were centered only.
    DegenerateSpread { column: String, values: usize },
}

impl SkipNote {
    /// Column the note refers to.
    pub fn column(&self) -> &str {
        match self {
            SkipNote::NoValues { column }
            | SkipNote::NoMode { column }
            | SkipNote::DegenerateSpread { column, .. } => column,
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> String {
        match self {
            SkipNote::NoValues { column } => {
                format!("'{}' has no numeric values, missing cells left as-is", column)
            }
            SkipNote::NoMode { column } => {
                format!("'{}' has no values to take a mode of, missing cells left as-is", column)
            }
            SkipNote::DegenerateSpread { column, values } if *values < 2 => format!(
                "'{}' cannot be scaled ({} value), values set missing",
                column, values
            ),
            SkipNote::DegenerateSpread { column, values } => format!(
                "'{}' cannot be scaled ({} values, no spread), values centered only",
                column, values
            ),
        }
    }
}

/// Table produced by a stage plus any columns it skipped.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub table: Table,
    pub notes: Vec<SkipNote>,
}

impl StageOutput {
    /// Output with no skip notes.
    pub fn new(table: Table) -> Self {
        Self {
            table,
            notes: Vec::new(),
        }
    }
}

impl From<Table> for StageOutput {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}
