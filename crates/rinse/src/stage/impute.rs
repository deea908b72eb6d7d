//! Missing value imputation.
//!
//! Numeric columns are filled with their mean, categorical columns with their
//! mode. Each column is handled on its own: the fill value depends only on
//! that column's cells.

use tracing::debug;

use super::stats::{RunningStats, mode};
use super::{SkipNote, StageOutput};
use crate::model::{Cell, Column, ColumnKind, Table};

/// Fill value for one column, or the reason there is none.
pub fn fill_value<'a>(
    column: &Column,
    cells: impl IntoIterator<Item = &'a Cell>,
) -> Result<Cell, SkipNote> {
    match column.kind {
        ColumnKind::Numeric => RunningStats::from_cells(cells)
            .mean()
            .map(Cell::number)
            .ok_or_else(|| SkipNote::NoValues {
                column: column.name.clone(),
            }),
        ColumnKind::Categorical => mode(cells).cloned().ok_or_else(|| SkipNote::NoMode {
            column: column.name.clone(),
        }),
    }
}

/// Fill missing cells in every column.
pub fn impute(table: Table) -> StageOutput {
    let mut notes = Vec::new();
    let mut table = table;

    for index in 0..table.column_count() {
        if !table.column_cells(index).any(Cell::is_missing) {
            continue;
        }

        let fill = fill_value(&table.columns()[index], table.column_cells(index));
        match fill {
            Ok(value) => {
                debug!(column = %table.columns()[index].name, "imputing missing cells");
                table = table.map_column(index, |cell| {
                    if cell.is_missing() {
                        value.clone()
                    } else {
                        cell.clone()
                    }
                });
            }
            Err(note) => notes.push(note),
        }
    }

    StageOutput { table, notes }
}
