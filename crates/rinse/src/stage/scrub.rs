//! Blank text scrubbing.

use crate::model::{Cell, Table};

/// Returns true for text that is empty after trimming.
pub fn is_blank(cell: &Cell) -> bool {
    cell.as_text().is_some_and(|s| s.trim().is_empty())
}

/// Replace whitespace-only text cells with `Missing`.
pub fn scrub(table: Table) -> Table {
    table.map_cells(|cell| if is_blank(cell) { Cell::Missing } else { cell.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawTable;
    use crate::stage::inference::infer;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&Cell::text("")));
        assert!(is_blank(&Cell::text(" \t\n")));
        assert!(!is_blank(&Cell::text(" a ")));
        assert!(!is_blank(&Cell::Missing));
        assert!(!is_blank(&Cell::Number(0.0)));
    }

    #[test]
    fn test_scrub_only_touches_blank_text() {
        let table = infer(
            RawTable::new(
                vec!["name".into()],
                vec![vec![Cell::text("  ")], vec![Cell::text(" Ann ")]],
            )
            .unwrap(),
        );

        let out = scrub(table);
        assert!(out.rows()[0][0].is_missing());
        assert_eq!(out.rows()[1][0], Cell::text(" Ann "));
    }
}
