//! Key to row lookup for a single table

use indexmap::IndexMap;

use super::key::{ColumnSet, RowKey};
use super::table::{Row, Table};

/// A row together with its position in the source table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedRow<'a> {
    pub position: usize,
    pub cells: &'a Row,
}

/// Row lookup by key, in table order.
///
/// Meant to be built only after the key has been verified unique for the
/// table. Should a key repeat anyway, the first row bearing it is kept.
#[derive(Debug, Clone)]
pub struct RowIndex<'a> {
    rows: IndexMap<RowKey, IndexedRow<'a>>,
}

impl<'a> RowIndex<'a> {
    /// Index every row of `table` by `columns`
    pub fn build(table: &'a Table, columns: &ColumnSet) -> Self {
        let mut rows = IndexMap::with_capacity(table.row_count());
        for (position, cells) in table.rows.iter().enumerate() {
            rows.entry(columns.key_of(cells))
                .or_insert(IndexedRow { position, cells });
        }
        Self { rows }
    }

    /// Look up a row by key
    pub fn get(&self, key: &RowKey) -> Option<&IndexedRow<'a>> {
        self.rows.get(key)
    }

    /// Check if a key is present
    pub fn contains(&self, key: &RowKey) -> bool {
        self.rows.contains_key(key)
    }

    /// Keys and rows in table order
    pub fn iter(&self) -> impl Iterator<Item = (&RowKey, &IndexedRow<'a>)> {
        self.rows.iter()
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Same keys mapping to identical cells, regardless of row order
    pub fn same_content(&self, other: &RowIndex<'_>) -> bool {
        self.len() == other.len()
            && self
                .rows
                .iter()
                .all(|(key, row)| other.get(key).is_some_and(|o| o.cells == row.cells))
    }
}
