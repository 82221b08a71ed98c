//! Diff engine for comparing tables

pub mod cell_diff;
mod discovery;
mod keyed;
mod row_diff;
mod workbook;

use serde::Serialize;

use crate::config::Config;
use crate::error::KeyError;
use crate::model::{normalize, ColumnSet, Row, RowIndex, RowKey, Table};

pub use cell_diff::{AlignedRows, CellPair};
pub use discovery::{discover_key, verify_key};
pub use workbook::{sheet_order, Workbook};

/// One classified difference in keyed mode.
///
/// `position` of an `Added` entry indexes the new table, while `position` of a
/// `Changed` entry indexes the old table. Entries are ordered by the raw
/// number anyway, so the two kinds interleave across coordinate spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiffEntry {
    /// Key present in the new table only
    Added { key: RowKey, position: usize },
    /// Key present in both tables with different row content
    Changed { key: RowKey, position: usize },
}

impl DiffEntry {
    /// Get the key for this entry
    pub fn key(&self) -> &RowKey {
        match self {
            DiffEntry::Added { key, .. } | DiffEntry::Changed { key, .. } => key,
        }
    }

    /// Row index in the table this entry was found in, header included
    pub fn position(&self) -> usize {
        match self {
            DiffEntry::Added { position, .. } | DiffEntry::Changed { position, .. } => *position,
        }
    }

    /// Row index counted from the first row after the header
    pub fn data_row(&self) -> Option<usize> {
        self.position().checked_sub(1)
    }

    /// Check if this is an added row
    pub fn is_added(&self) -> bool {
        matches!(self, DiffEntry::Added { .. })
    }
}

/// Result of comparing one table pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiffResult {
    /// Nothing to report
    Equal,
    /// Keyed comparison entries, ordered by position
    Keyed { entries: Vec<DiffEntry> },
    /// Whole-row comparison: positions of rows with no identical twin
    Unmatched {
        new_only: Vec<usize>,
        old_only: Vec<usize>,
    },
}

impl DiffResult {
    /// Check if the tables compared equal
    pub fn is_equal(&self) -> bool {
        matches!(self, DiffResult::Equal)
    }

    /// Keyed entries, empty for other results
    pub fn entries(&self) -> &[DiffEntry] {
        match self {
            DiffResult::Keyed { entries } => entries,
            _ => &[],
        }
    }
}

/// Why a table pair was compared without a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Keyed compare was turned off in the configuration
    SmartCompareDisabled,
    /// Discovery found no column combination unique in both tables
    NoUniqueKey,
    /// The key could not be resolved or is not unique
    InvalidKey(KeyError),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::SmartCompareDisabled => write!(f, "smart compare turned off"),
            FallbackReason::NoUniqueKey => write!(f, "unable to find suitable primary key"),
            FallbackReason::InvalidKey(err) => write!(f, "{}", err),
        }
    }
}

/// How a table pair was compared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CompareMode {
    /// Rows matched by key
    Keyed { names: Vec<String>, columns: ColumnSet },
    /// Rows matched by whole-row text
    Fallback { reason: FallbackReason },
}

/// Statistics about the diff
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub changed: usize,
    pub new_only: usize,
    pub old_only: usize,
    pub old_row_count: usize,
    pub new_row_count: usize,
}

impl DiffStats {
    fn collect(result: &DiffResult, old: &Table, new: &Table) -> Self {
        let mut stats = DiffStats {
            old_row_count: old.row_count(),
            new_row_count: new.row_count(),
            ..Default::default()
        };
        match result {
            DiffResult::Equal => {}
            DiffResult::Keyed { entries } => {
                stats.added = entries.iter().filter(|e| e.is_added()).count();
                stats.changed = entries.len() - stats.added;
            }
            DiffResult::Unmatched { new_only, old_only } => {
                stats.new_only = new_only.len();
                stats.old_only = old_only.len();
            }
        }
        stats
    }

    /// Check if there are any reported changes.
    ///
    /// Keyed mode does not report rows removed from the old table, so a
    /// comparison can be unequal while this returns `false`; check
    /// [`DiffResult::is_equal`] for equality.
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.changed > 0 || self.new_only > 0 || self.old_only > 0
    }
}

/// Outcome of comparing one named table pair.
///
/// Owns the normalized tables so the rows behind each entry can be handed to
/// a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct TableComparison {
    pub name: String,
    pub mode: CompareMode,
    pub result: DiffResult,
    pub stats: DiffStats,
    #[serde(skip)]
    old: Table,
    #[serde(skip)]
    new: Table,
}

impl TableComparison {
    /// Normalized old table
    pub fn old_table(&self) -> &Table {
        &self.old
    }

    /// Normalized new table
    pub fn new_table(&self) -> &Table {
        &self.new
    }

    /// Check if the tables compared equal
    pub fn is_equal(&self) -> bool {
        self.result.is_equal()
    }

    fn key_columns(&self) -> Option<&ColumnSet> {
        match &self.mode {
            CompareMode::Keyed { columns, .. } => Some(columns),
            CompareMode::Fallback { .. } => None,
        }
    }

    /// Old and new row for a `Changed` entry, aligned by column
    pub fn aligned_rows<'a>(&'a self, entry: &'a DiffEntry) -> Option<AlignedRows<'a>> {
        let DiffEntry::Changed { key, position } = entry else {
            return None;
        };
        let columns = self.key_columns()?;
        let new_position = columns.find_row(&self.new.rows, key)?;
        Some(AlignedRows {
            key,
            position: *position,
            old: self.old.row(*position)?,
            new: self.new.row(new_position)?,
        })
    }

    /// Every `Changed` entry with its aligned rows, in entry order
    pub fn changes(&self) -> Vec<AlignedRows<'_>> {
        let Some(columns) = self.key_columns() else {
            return Vec::new();
        };
        let new_index = RowIndex::build(&self.new, columns);

        self.result
            .entries()
            .iter()
            .filter_map(|entry| match entry {
                DiffEntry::Changed { key, position } => Some(AlignedRows {
                    key,
                    position: *position,
                    old: self.old.row(*position)?,
                    new: new_index.get(key)?.cells,
                }),
                DiffEntry::Added { .. } => None,
            })
            .collect()
    }

    /// Rows behind `Added` entries, in entry order
    pub fn added_rows(&self) -> impl Iterator<Item = (&DiffEntry, &Row)> {
        self.result
            .entries()
            .iter()
            .filter(|e| e.is_added())
            .filter_map(|e| self.new.row(e.position()).map(|row| (e, row)))
    }

    /// New-table rows with no identical old row (whole-row mode)
    pub fn new_only_rows(&self) -> Vec<&Row> {
        match &self.result {
            DiffResult::Unmatched { new_only, .. } => {
                new_only.iter().filter_map(|&i| self.new.row(i)).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Old-table rows with no identical new row (whole-row mode)
    pub fn old_only_rows(&self) -> Vec<&Row> {
        match &self.result {
            DiffResult::Unmatched { old_only, .. } => {
                old_only.iter().filter_map(|&i| self.old.row(i)).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Main diff engine
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: Config,
}

impl DiffEngine {
    /// Create a new diff engine with configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compare one named table pair
    pub fn compare(&self, name: &str, mut old: Table, mut new: Table) -> TableComparison {
        normalize(&mut old, &mut new);

        let mode = self.select_mode(name, &old, &new);
        let result = match &mode {
            CompareMode::Keyed { columns, .. } => keyed::diff_keyed(&old, &new, columns),
            CompareMode::Fallback { .. } => row_diff::diff_unkeyed(&old, &new),
        };
        let stats = DiffStats::collect(&result, &old, &new);

        TableComparison {
            name: name.to_string(),
            mode,
            result,
            stats,
            old,
            new,
        }
    }

    /// Decide between keyed and whole-row compare for one table pair
    fn select_mode(&self, name: &str, old: &Table, new: &Table) -> CompareMode {
        if !self.config.smart_compare {
            log::info!("Smart compare turned off using default diff algorithm for {}", name);
            return CompareMode::Fallback {
                reason: FallbackReason::SmartCompareDisabled,
            };
        }

        if self.config.key_columns.is_empty() {
            log::info!("Attempting to find primary key for {}", name);
            let discovered = discover_key(old, new, self.config.verbosity);
            if discovered.is_empty() {
                log::info!(
                    "Unable to find suitable primary key. Using default diff algorithm for {}",
                    name
                );
                return CompareMode::Fallback {
                    reason: FallbackReason::NoUniqueKey,
                };
            }
            let names = new.header().map(|h| discovered.names(h)).unwrap_or_default();
            log::info!("Primary key {:?} found for {}", names, name);
            return CompareMode::Keyed {
                names,
                columns: discovered,
            };
        }

        let names = self.config.key_columns.clone();
        match verify_key(old, new, &names, self.config.verbosity) {
            Ok(columns) => CompareMode::Keyed { names, columns },
            Err(err) => {
                log::warn!("{}: {}. Using default diff algorithm", name, err);
                CompareMode::Fallback {
                    reason: FallbackReason::InvalidKey(err),
                }
            }
        }
    }
}

/// Convenience function to compare one table pair
pub fn compute_diff(name: &str, old: Table, new: Table, config: &Config) -> TableComparison {
    let engine = DiffEngine::new(config.clone());
    engine.compare(name, old, new)
}
