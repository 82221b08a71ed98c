//! Table and Row data structures

use serde::Serialize;

/// A row of opaque text cells
pub type Row = Vec<String>;

/// Separator used when a whole row is flattened to one comparison string
pub const ROW_SEPARATOR: &str = " ";

/// An ordered sequence of rows; the first row is the header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// All rows, header included
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from rows
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a table from anything yielding rows of string-like cells
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// The header row, if the table has any rows
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Number of rows, header included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the header row
    pub fn column_count(&self) -> usize {
        self.header().map_or(0, Vec::len)
    }

    /// Check if the table has no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by position
    pub fn row(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    /// Pad every row with empty cells up to `width`
    fn pad_to(&mut self, width: usize) {
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
        }
    }
}

/// Flatten a row to the string used by whole-row comparisons
pub fn serialize_row(row: &[String]) -> String {
    row.join(ROW_SEPARATOR)
}

/// Equalize the width of two tables.
///
/// Only the header widths are compared; every row of the narrower table is
/// padded with empty cells to the wider header's width. Rows are never
/// truncated, and ragged rows within one table are left to the reader that
/// produced them.
pub fn normalize(old: &mut Table, new: &mut Table) {
    if old.is_empty() || new.is_empty() {
        return;
    }

    let old_width = old.column_count();
    let new_width = new.column_count();

    if old_width < new_width {
        old.pad_to(new_width);
    } else if new_width < old_width {
        new.pad_to(old_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pads_narrower_table() {
        let mut old = Table::from_rows(vec![vec!["a", "b"], vec!["x", "1"]]);
        let mut new = Table::from_rows(vec![vec!["a", "b", "c"], vec!["x", "1", "2"]]);

        normalize(&mut old, &mut new);

        assert_eq!(old.rows[1], vec!["x", "1", ""]);
        assert_eq!(old.column_count(), 3);
        assert_eq!(new.rows[1], vec!["x", "1", "2"]);
    }

    #[test]
    fn test_normalize_pads_new_side() {
        let mut old = Table::from_rows(vec![vec!["a", "b", "c"]]);
        let mut new = Table::from_rows(vec![vec!["a"], vec!["z"]]);

        normalize(&mut old, &mut new);

        assert_eq!(new.rows, vec![vec!["a", "", ""], vec!["z", "", ""]]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut old = Table::from_rows(vec![vec!["a"], vec!["1"]]);
        let mut new = Table::from_rows(vec![vec!["a", "b"], vec!["1", "2"]]);

        normalize(&mut old, &mut new);
        let once = (old.clone(), new.clone());
        normalize(&mut old, &mut new);

        assert_eq!((old, new), once);
    }

    #[test]
    fn test_normalize_equal_width_unchanged() {
        let original = Table::from_rows(vec![vec!["id", "name"], vec!["1", "Alice"]]);
        let mut old = original.clone();
        let mut new = original.clone();

        normalize(&mut old, &mut new);

        assert_eq!(old, original);
        assert_eq!(new, original);
    }

    #[test]
    fn test_normalize_skips_empty_table() {
        let mut old = Table::default();
        let mut new = Table::from_rows(vec![vec!["a", "b"]]);

        normalize(&mut old, &mut new);

        assert!(old.is_empty());
        assert_eq!(new.column_count(), 2);
    }

    #[test]
    fn test_serialize_row() {
        let row: Row = vec!["1".into(), "Alice".into()];
        assert_eq!(serialize_row(&row), "1 Alice");
    }
}
