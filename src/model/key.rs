//! Primary key handling utilities

use std::borrow::Borrow;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{KeyError, Result};

use super::table::{Row, Table};

/// Prefix written before every key component.
///
/// Chosen to be improbable in real cell text. A cell that contains it can
/// still make two different rows produce the same key; that collision is
/// reported as a duplicate rather than worked around.
pub const KEY_DELIMITER: &str = "%@!#!@%";

/// Ordered column positions used as a primary key, in header order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ColumnSet(Vec<usize>);

impl ColumnSet {
    /// Create a column set, sorting positions into header order
    pub fn new(mut positions: Vec<usize>) -> Self {
        positions.sort_unstable();
        positions.dedup();
        Self(positions)
    }

    /// An empty set, meaning "no usable key"
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Resolve column names to positions in `header`.
    ///
    /// Every header cell whose text is one of `names` contributes its
    /// position; names absent from the header contribute nothing.
    pub fn resolve(header: &[String], names: &[String]) -> Self {
        Self(
            header
                .iter()
                .enumerate()
                .filter(|(_, title)| names.contains(*title))
                .map(|(i, _)| i)
                .collect(),
        )
    }

    /// Column positions
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    /// Number of key columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no columns are selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Header names of the selected columns
    pub fn names(&self, header: &[String]) -> Vec<String> {
        self.0
            .iter()
            .filter_map(|&i| header.get(i).cloned())
            .collect()
    }

    /// Build the key for one row
    pub fn key_of(&self, row: &[String]) -> RowKey {
        let mut key = String::new();
        for &i in &self.0 {
            key.push_str(KEY_DELIMITER);
            key.push_str(row.get(i).map_or("", String::as_str));
        }
        RowKey(key)
    }

    /// Verify that no two rows of `table` share a key.
    ///
    /// On failure the reported duplicate is the earliest row that has a later
    /// twin, paired with the first such twin.
    pub fn check_unique(&self, table: &Table) -> Result<()> {
        let mut first_seen: FxHashMap<RowKey, usize> = FxHashMap::default();
        let mut earliest: Option<(usize, usize)> = None;

        for (idx, row) in table.rows.iter().enumerate() {
            let key = self.key_of(row);
            match first_seen.get(&key) {
                Some(&first) => {
                    if earliest.map_or(true, |(best, _)| first < best) {
                        earliest = Some((first, idx));
                    }
                }
                None => {
                    first_seen.insert(key, idx);
                }
            }
        }

        match earliest {
            Some((first_row, duplicate_row)) => Err(KeyError::DuplicateKey {
                key: self.key_of(&table.rows[first_row]),
                first_row,
                duplicate_row,
            }),
            None => Ok(()),
        }
    }

    /// Position of the first row of `rows` whose key equals `key`
    pub fn find_row(&self, rows: &[Row], key: &RowKey) -> Option<usize> {
        rows.iter().position(|row| &self.key_of(row) == key)
    }
}

impl fmt::Display for ColumnSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Delimiter-joined key cell values of one row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    /// Key text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual key cell values, in column order
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_DELIMITER).skip(1)
    }
}

impl Borrow<str> for RowKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_follows_header_order() {
        let h = header(&["name", "id", "age"]);
        let set = ColumnSet::resolve(&h, &["age".to_string(), "name".to_string()]);
        assert_eq!(set.positions(), &[0, 2]);
        assert_eq!(set.names(&h), vec!["name", "age"]);
    }

    #[test]
    fn test_resolve_ignores_unknown_names() {
        let h = header(&["id", "name"]);
        let set = ColumnSet::resolve(&h, &["missing".to_string()]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_key_of() {
        let set = ColumnSet::new(vec![2, 0]);
        let key = set.key_of(&header(&["1", "x", "b"]));
        assert_eq!(key.as_str(), "%@!#!@%1%@!#!@%b");
        assert_eq!(key.components().collect::<Vec<_>>(), vec!["1", "b"]);
    }

    #[test]
    fn test_check_unique_accepts_distinct_keys() {
        let table = Table::from_rows(vec![vec!["id", "v"], vec!["1", "a"], vec!["2", "a"]]);
        assert!(ColumnSet::new(vec![0]).check_unique(&table).is_ok());
        assert!(ColumnSet::new(vec![1]).check_unique(&table).is_err());
    }

    #[test]
    fn test_check_unique_reports_earliest_duplicate() {
        // keys: A B B A; the pairwise scan reports A (row 0 has a later twin at 3)
        let table = Table::from_rows(vec![vec!["A"], vec!["B"], vec!["B"], vec!["A"]]);
        let err = ColumnSet::new(vec![0]).check_unique(&table).unwrap_err();
        assert_eq!(
            err,
            KeyError::DuplicateKey {
                key: ColumnSet::new(vec![0]).key_of(&header(&["A"])),
                first_row: 0,
                duplicate_row: 3,
            }
        );
    }

    #[test]
    fn test_delimiter_collision_is_reported() {
        // ("a<D>b", "c") and ("a", "b<D>c") both produce "<D>a<D>b<D>c"
        let table = Table::from_rows(vec![vec!["a%@!#!@%b", "c"], vec!["a", "b%@!#!@%c"]]);
        assert!(ColumnSet::new(vec![0, 1]).check_unique(&table).is_err());
    }

    #[test]
    fn test_find_row() {
        let table = Table::from_rows(vec![vec!["id"], vec!["1"], vec!["2"]]);
        let set = ColumnSet::new(vec![0]);
        let key = set.key_of(&header(&["2"]));
        assert_eq!(set.find_row(&table.rows, &key), Some(2));
    }
}
