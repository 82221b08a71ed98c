//! Error types for key resolution and verification

use serde::Serialize;
use thiserror::Error;

use crate::model::{ColumnSet, RowKey};

/// Reasons a candidate primary key cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyError {
    /// Two rows produce the same key
    #[error("key {key} found multiple times (rows {first_row} and {duplicate_row})")]
    DuplicateKey {
        key: RowKey,
        first_row: usize,
        duplicate_row: usize,
    },

    /// The key columns live at different positions in the two headers
    #[error("primary key positions don't match: old {old}, new {new}")]
    PositionMismatch { old: ColumnSet, new: ColumnSet },

    /// None of the requested names appear in a header
    #[error("none of the key columns {names:?} appear in the header")]
    KeyNotFound { names: Vec<String> },

    /// A table has no header row to resolve key names against
    #[error("table has no rows")]
    EmptyTable,
}

/// Result type for key operations
pub type Result<T> = std::result::Result<T, KeyError>;
