//! Column statistics shared by the imputer and the normalizer.

use indexmap::IndexMap;

use crate::model::{Cell, CellKey};

// =============================================================================
// STREAMING MEAN / VARIANCE
// =============================================================================
// Welford's online algorithm: one pass, numerically stable.

/// Running mean and variance accumulator.
#[derive(Debug, Clone, Default)]
pub(crate) struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
}

impl RunningStats {
    /// Accumulate the numeric cells of a column, skipping everything else.
    pub(crate) fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut stats = Self::default();
        for value in cells.into_iter().filter_map(Cell::as_number) {
            stats.add(value);
        }
        stats
    }

    /// Add a value.
    pub(crate) fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Number of values seen.
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, `None` when no values were seen.
    pub(crate) fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Bessel-corrected sample standard deviation, `None` below two values.
    pub(crate) fn sample_std(&self) -> Option<f64> {
        (self.count >= 2).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }
}

// =============================================================================
// MODE
// =============================================================================

/// Most frequent non-missing cell. Ties go to the value seen first.
pub(crate) fn mode<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Option<&'a Cell> {
    let mut counts: IndexMap<CellKey<'a>, (usize, &'a Cell)> = IndexMap::new();
    for cell in cells.into_iter().filter(|c| !c.is_missing()) {
        counts.entry(cell.key()).or_insert((0, cell)).0 += 1;
    }

    let mut best: Option<(usize, &Cell)> = None;
    for (count, cell) in counts.into_values() {
        if best.is_none_or(|(best_count, _)| count > best_count) {
            best = Some((count, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<Cell> {
        values.iter().copied().map(Cell::Number).collect()
    }

    #[test]
    fn test_mean_and_sample_std() {
        let cells = numbers(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let stats = RunningStats::from_cells(&cells);

        assert_eq!(stats.count(), 8);
        assert!((stats.mean().unwrap() - 5.0).abs() < 1e-12);
        // population std is 2.0, sample std is sqrt(32 / 7)
        assert!((stats.sample_std().unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_stats_skip_non_numbers() {
        let cells = vec![Cell::Number(1.0), Cell::Missing, Cell::text("x"), Cell::Number(3.0)];
        let stats = RunningStats::from_cells(&cells);
        assert_eq!(stats.count(), 2);
        assert_eq!(stats.mean(), Some(2.0));
    }

    #[test]
    fn test_stats_degenerate() {
        let empty = RunningStats::default();
        assert_eq!(empty.mean(), None);
        assert_eq!(empty.sample_std(), None);

        let one = RunningStats::from_cells(&numbers(&[3.0]));
        assert_eq!(one.mean(), Some(3.0));
        assert_eq!(one.sample_std(), None);
    }

    #[test]
    fn test_mode_prefers_first_on_tie() {
        let cells = vec![
            Cell::text("b"),
            Cell::text("a"),
            Cell::Missing,
            Cell::text("a"),
            Cell::text("b"),
        ];
        assert_eq!(mode(&cells), Some(&Cell::text("b")));
    }

    #[test]
    fn test_mode_counts_missing_as_absent() {
        let cells = vec![Cell::Missing, Cell::Missing, Cell::text("x")];
        assert_eq!(mode(&cells), Some(&Cell::text("x")));
        assert_eq!(mode(&[Cell::Missing]), None);
    }
}
