//! Fixed domain rule: ages are never negative.

use super::Stage;
use crate::error::{Result, RinseError};
use crate::model::{Cell, Table};

/// Column the rule applies to, matched exactly.
pub const AGE_COLUMN: &str = "age";

/// Keep rows whose `age` cell is a number `>= 0`.
///
/// The comparison uses the cell as it is when this stage runs, so after
/// normalization it sees z-scores, not raw ages. Missing ages do not satisfy
/// the rule and are dropped. A text age cannot be compared and fails the run.
/// Tables without an `age` column pass through unchanged.
pub fn check_age(table: Table) -> Result<Table> {
    let Some(index) = table.column_index(AGE_COLUMN) else {
        return Ok(table);
    };

    let text_row = table
        .column_cells(index)
        .position(|cell| matches!(cell, Cell::Text(_)));
    if let Some(row) = text_row {
        return Err(RinseError::Computation {
            stage: Stage::DomainCheck,
            message: format!(
                "cannot compare text in column '{}' (row {}) with 0",
                AGE_COLUMN, row
            ),
        });
    }

    Ok(table.retain_rows(|row| {
        row.get(index)
            .and_then(Cell::as_number)
            .is_some_and(|age| age >= 0.0)
    }))
}
