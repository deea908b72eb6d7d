//! Exact duplicate row removal.

use std::collections::HashSet;

use crate::model::{CellKey, Row, Table};

fn row_key(row: &Row) -> Vec<CellKey<'_>> {
    row.iter().map(|cell| cell.key()).collect()
}

/// Drop every row that is cell-wise identical to an earlier row.
///
/// The first occurrence is kept and surviving rows keep their order.
pub fn dedup(table: Table) -> Table {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(table.row_count());
        table.rows().iter().map(|row| seen.insert(row_key(row))).collect()
    };

    let mut flags = keep.into_iter();
    table.retain_rows(|_| flags.next().unwrap_or(true))
}
