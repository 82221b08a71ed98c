//! Data model for tabular data representation

mod index;
mod key;
mod table;

pub use index::{IndexedRow, RowIndex};
pub use key::{ColumnSet, RowKey, KEY_DELIMITER};
pub use table::{normalize, serialize_row, Row, Table, ROW_SEPARATOR};
