//! Primary key discovery
//!
//! Searches header column combinations, smallest first, for one that
//! identifies every row of both tables. The search is exponential in the
//! number of named columns (every subset may be tried), which is tolerable
//! for spreadsheet-sized headers and nothing wider.

use crate::config::Verbosity;
use crate::error::{KeyError, Result};
use crate::model::{ColumnSet, Table};

/// k-element subsets of `0..n` in colex order.
///
/// This is the order a bitmask scan over `1..2^n` visits subsets of one size
/// (ab, ac, bc, ad, ...), generated without the mask width limit.
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k == 0 || k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        // Bump the lowest index that can move up, reset everything below it
        let k = self.indices.len();
        let movable = (0..k).find(|&i| {
            let limit = if i + 1 < k { self.indices[i + 1] } else { self.n };
            self.indices[i] + 1 < limit
        });
        match movable {
            Some(i) => {
                self.indices[i] += 1;
                for j in 0..i {
                    self.indices[j] = j;
                }
            }
            None => self.done = true,
        }

        Some(current)
    }
}

/// Distinct non-empty header names, in header order
fn candidate_names(header: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for title in header {
        if !title.is_empty() && !names.contains(title) {
            names.push(title.clone());
        }
    }
    names
}

/// Find the smallest set of columns that uniquely keys both tables.
///
/// Candidates come from the new table's header. A candidate must be unique in
/// the new table, resolve to the same positions in the old table's header,
/// and be unique in the old table. Returns an empty set when nothing
/// qualifies; callers treat that as "compare without a key".
pub fn discover_key(old: &Table, new: &Table, verbosity: Verbosity) -> ColumnSet {
    let level = verbosity.level();

    let (Some(new_header), Some(old_header)) = (new.header(), old.header()) else {
        return ColumnSet::empty();
    };

    log::log!(level, "Selecting from raw keys ({}): {:?}", new_header.len(), new_header);
    let names = candidate_names(new_header);
    log::log!(level, "Sanitized keys ({}): {:?}", names.len(), names);

    for size in 1..=names.len() {
        for combo in Combinations::new(names.len(), size) {
            let keys: Vec<String> = combo.iter().map(|&i| names[i].clone()).collect();
            log::log!(level, "Trying key combo: {:?}", keys);

            let new_columns = ColumnSet::resolve(new_header, &keys);
            if let Err(err) = new_columns.check_unique(new) {
                log::log!(level, "Rejected {:?} in new table: {}", keys, err);
                continue;
            }

            let old_columns = ColumnSet::resolve(old_header, &keys);
            if old_columns != new_columns {
                log::log!(level, "Rejected {:?}: indexes not equal", keys);
                continue;
            }

            if let Err(err) = old_columns.check_unique(old) {
                log::log!(level, "Rejected {:?} in old table: {}", keys, err);
                continue;
            }

            return new_columns;
        }
    }

    ColumnSet::empty()
}

/// Resolve key column names against both headers and check they can key rows.
///
/// The names must land on the same positions in both headers, at least one
/// must be found, and the resulting key must be unique in the old table and
/// then in the new table.
pub fn verify_key(
    old: &Table,
    new: &Table,
    names: &[String],
    verbosity: Verbosity,
) -> Result<ColumnSet> {
    let (Some(old_header), Some(new_header)) = (old.header(), new.header()) else {
        return Err(KeyError::EmptyTable);
    };

    let old_columns = ColumnSet::resolve(old_header, names);
    let new_columns = ColumnSet::resolve(new_header, names);
    log::log!(
        verbosity.level(),
        "Key {:?} resolves to {} (old) and {} (new)",
        names,
        old_columns,
        new_columns
    );

    if old_columns != new_columns {
        return Err(KeyError::PositionMismatch {
            old: old_columns,
            new: new_columns,
        });
    }
    if new_columns.is_empty() {
        return Err(KeyError::KeyNotFound {
            names: names.to_vec(),
        });
    }

    old_columns.check_unique(old)?;
    new_columns.check_unique(new)?;

    Ok(new_columns)
}
