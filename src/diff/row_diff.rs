//! Whole-row comparison used when no key is available

use rustc_hash::FxHashSet;

use crate::model::{serialize_row, Table};

use super::DiffResult;

/// Positions of rows in `table` whose serialized text is not in `other`
fn unmatched_positions(table: &Table, other: &FxHashSet<String>) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !other.contains(&serialize_row(row)))
        .map(|(i, _)| i)
        .collect()
}

/// Compare two tables row by row without a key.
///
/// A row matches when some row of the other table serializes to the same
/// text. Unmatched rows are reported per side, in table order; no attempt is
/// made to pair them up.
pub(crate) fn diff_unkeyed(old: &Table, new: &Table) -> DiffResult {
    let old_rows: FxHashSet<String> = old.rows.iter().map(|r| serialize_row(r)).collect();
    let new_rows: FxHashSet<String> = new.rows.iter().map(|r| serialize_row(r)).collect();

    let new_only = unmatched_positions(new, &old_rows);
    let old_only = unmatched_positions(old, &new_rows);

    if new_only.is_empty() && old_only.is_empty() {
        DiffResult::Equal
    } else {
        DiffResult::Unmatched { new_only, old_only }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_rows_are_equal() {
        let old = Table::from_rows(vec![vec!["a", "b"], vec!["1", "2"]]);
        let new = Table::from_rows(vec![vec!["1", "2"], vec!["a", "b"]]);
        assert_eq!(diff_unkeyed(&old, &new), DiffResult::Equal);
    }

    #[test]
    fn test_reports_both_sides_in_table_order() {
        let old = Table::from_rows(vec![vec!["a", "b"], vec!["1", "2"], vec!["3", "4"]]);
        let new = Table::from_rows(vec![
            vec!["a", "b"],
            vec!["5", "6"],
            vec!["1", "2"],
            vec!["7", "8"],
        ]);

        assert_eq!(
            diff_unkeyed(&old, &new),
            DiffResult::Unmatched {
                new_only: vec![1, 3],
                old_only: vec![2],
            }
        );
    }

    #[test]
    fn test_duplicates_match_any_twin() {
        let old = Table::from_rows(vec![vec!["x"], vec!["x"]]);
        let new = Table::from_rows(vec![vec!["x"]]);
        assert_eq!(diff_unkeyed(&old, &new), DiffResult::Equal);
    }

    #[test]
    fn test_empty_side_reports_every_row() {
        let new = Table::from_rows(vec![vec!["id"], vec!["1"]]);
        assert_eq!(
            diff_unkeyed(&Table::default(), &new),
            DiffResult::Unmatched {
                new_only: vec![0, 1],
                old_only: vec![],
            }
        );
        assert_eq!(diff_unkeyed(&Table::default(), &Table::default()), DiffResult::Equal);
    }
}
