//! Keyed row comparison

use crate::model::{serialize_row, ColumnSet, RowIndex, Table};

use super::{DiffEntry, DiffResult};

/// Compare two tables whose rows are keyed by `columns`.
///
/// Reports keys only in the new table as `Added` and keys in both tables
/// whose rows differ as `Changed`. Keys only in the old table are not
/// reported.
pub(crate) fn diff_keyed(old: &Table, new: &Table, columns: &ColumnSet) -> DiffResult {
    let old_index = RowIndex::build(old, columns);
    let new_index = RowIndex::build(new, columns);

    if old_index.same_content(&new_index) {
        return DiffResult::Equal;
    }

    let mut entries = Vec::new();

    for (key, row) in new_index.iter() {
        if !old_index.contains(key) {
            entries.push(DiffEntry::Added {
                key: key.clone(),
                position: row.position,
            });
        }
    }

    for (key, old_row) in old_index.iter() {
        if let Some(new_row) = new_index.get(key) {
            if serialize_row(old_row.cells) != serialize_row(new_row.cells) {
                entries.push(DiffEntry::Changed {
                    key: key.clone(),
                    position: old_row.position,
                });
            }
        }
    }

    order_entries(&mut entries);
    DiffResult::Keyed { entries }
}

/// Sort entries by raw position, keeping discovery order among ties
pub(crate) fn order_entries(entries: &mut [DiffEntry]) {
    entries.sort_by_key(DiffEntry::position);
}
