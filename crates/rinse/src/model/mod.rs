//! Table data model: cells, columns, tables and the completeness threshold.

mod cell;
mod column;
mod table;
mod threshold;

pub use cell::Cell;
pub(crate) use cell::CellKey;
pub use column::{Column, ColumnKind};
pub use table::{RawTable, Records, Row, Table};
pub use threshold::Threshold;
