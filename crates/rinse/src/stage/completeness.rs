//! Row completeness filter.

use crate::model::{Row, Table, Threshold};

/// Number of non-missing cells in a row.
pub fn present_count(row: &Row) -> usize {
    row.iter().filter(|c| !c.is_missing()).count()
}

/// Keep rows with at least `threshold.min_count(columns)` non-missing cells.
pub fn filter(table: Table, threshold: Threshold) -> Table {
    let min_count = threshold.min_count(table.column_count());
    table.retain_rows(|row| present_count(row) >= min_count)
}
