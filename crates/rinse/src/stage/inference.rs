//! Column kind inference.

use crate::model::{Cell, Column, ColumnKind, RawTable, Table};

/// Classify a column from its cells.
///
/// Numeric iff there is at least one non-missing cell and every non-missing
/// cell is a number. A single text value anywhere makes the column
/// categorical; no coercion is attempted (`"3"` stays text).
pub fn classify<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> ColumnKind {
    let mut seen = false;
    for cell in cells {
        match cell {
            Cell::Missing => {}
            Cell::Number(_) => seen = true,
            Cell::Text(_) => return ColumnKind::Categorical,
        }
    }
    if seen {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Tag every column of a raw table with its kind.
pub fn infer(raw: RawTable) -> Table {
    let kinds: Vec<ColumnKind> = (0..raw.column_count())
        .map(|index| classify(raw.rows().iter().filter_map(|row| row.get(index))))
        .collect();

    let (names, rows) = raw.into_parts();
    let columns = names
        .into_iter()
        .zip(kinds)
        .map(|(name, kind)| Column::new(name, kind))
        .collect();

    Table::new(columns, rows)
}
