//! Drop rows that still carry a missing cell.

use crate::model::{Cell, Table};

/// Remove every row containing at least one `Missing` cell.
pub fn purge(table: Table) -> Table {
    table.retain_rows(|row| !row.iter().any(Cell::is_missing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawTable;
    use crate::stage::inference::infer;

    #[test]
    fn test_purge_keeps_complete_rows_in_order() {
        let table = infer(
            RawTable::new(
                vec!["a".into(), "b".into()],
                vec![
                    vec![Cell::Number(1.0), Cell::text("x")],
                    vec![Cell::Missing, Cell::text("y")],
                    vec![Cell::Number(3.0), Cell::text(" ")],
                ],
            )
            .unwrap(),
        );

        let out = purge(table);
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows()[0][0], Cell::Number(1.0));
        // whitespace is text, not missing
        assert_eq!(out.rows()[1][1], Cell::text(" "));
    }
}
