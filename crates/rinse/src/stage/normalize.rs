//! Z-score standardization of numeric columns.

use tracing::debug;

use super::stats::RunningStats;
use super::{SkipNote, StageOutput};
use crate::model::{Cell, Table};

/// Mean and sample standard deviation of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardizer {
    pub mean: f64,
    /// Zero when the column has a single distinct value or fewer than two values.
    pub std: f64,
    /// Numeric cells the fit saw.
    pub count: usize,
}

impl Standardizer {
    /// Fit on the numeric cells of a column. `None` when there are none.
    pub fn fit<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Option<Self> {
        let stats = RunningStats::from_cells(cells);
        let mean = stats.mean()?;
        let std = stats.sample_std().unwrap_or(0.0);
        Some(Self {
            mean,
            std,
            count: stats.count(),
        })
    }

    /// True if the column had enough values for a sample deviation.
    pub fn is_defined(&self) -> bool {
        self.count >= 2
    }

    /// True if values can be scaled to unit variance.
    pub fn has_spread(&self) -> bool {
        self.mean.is_finite() && self.std.is_finite() && self.std > 0.0
    }

    /// The z-score of a cell.
    ///
    /// With fewer than two values the score is undefined and the cell comes
    /// back `Missing`. Without spread, values are only centered, so a constant
    /// column maps to 0.0. Anything that is not a number, or whose score is
    /// not finite, comes back `Missing`.
    pub fn apply(&self, cell: &Cell) -> Cell {
        match cell {
            Cell::Number(_) if !self.is_defined() => Cell::Missing,
            Cell::Number(v) if self.has_spread() => Cell::number((v - self.mean) / self.std),
            Cell::Number(v) => Cell::number(v - self.mean),
            _ => Cell::Missing,
        }
    }
}

/// Standardize every numeric column to zero mean and unit sample variance.
///
/// A column without spread is centered instead, and a column with fewer than
/// two values becomes `Missing`. Both are reported with
/// [`SkipNote::DegenerateSpread`].
pub fn normalize(table: Table) -> StageOutput {
    let mut notes = Vec::new();
    let mut table = table;

    for index in 0..table.column_count() {
        if !table.columns()[index].kind.is_numeric() {
            continue;
        }

        let Some(standardizer) = Standardizer::fit(table.column_cells(index)) else {
            continue;
        };

        if standardizer.has_spread() {
            debug!(
                column = %table.columns()[index].name,
                mean = standardizer.mean,
                std = standardizer.std,
                "standardizing column"
            );
        } else {
            notes.push(SkipNote::DegenerateSpread {
                column: table.columns()[index].name.clone(),
                values: standardizer.count,
            });
        }
        table = table.map_column(index, |cell| standardizer.apply(cell));
    }

    StageOutput { table, notes }
}
