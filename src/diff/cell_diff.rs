//! Cell-level view of a changed row

use crate::model::{Row, RowKey};

/// The cells at one column position in the old and new row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPair<'a> {
    pub column: usize,
    pub old: &'a str,
    pub new: &'a str,
}

impl CellPair<'_> {
    /// Check if the cell text differs
    pub fn is_changed(&self) -> bool {
        self.old != self.new
    }
}

/// Old and new versions of a changed row, aligned by column position.
///
/// Both rows come from normalized tables and therefore have the same width.
/// Deciding how to present each cell is left to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedRows<'a> {
    pub key: &'a RowKey,
    /// Position of the old row in the old table
    pub position: usize,
    pub old: &'a Row,
    pub new: &'a Row,
}

impl<'a> AlignedRows<'a> {
    /// Cell pairs in column order
    pub fn cells(&self) -> impl Iterator<Item = CellPair<'a>> + 'a {
        let (old, new) = (self.old, self.new);
        let width = old.len().max(new.len());
        (0..width).map(move |column| CellPair {
            column,
            old: old.get(column).map_or("", String::as_str),
            new: new.get(column).map_or("", String::as_str),
        })
    }

    /// Column positions whose text differs
    pub fn changed_columns(&self) -> Vec<usize> {
        self.cells()
            .filter(|pair| pair.is_changed())
            .map(|pair| pair.column)
            .collect()
    }
}
