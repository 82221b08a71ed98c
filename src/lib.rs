//! sheetdiff - Keyed row diff for tabular data
//!
//! Compares two versions of a table (for example two revisions of a
//! spreadsheet sheet) and reports which rows were added and which changed.
//! Rows are matched by a primary key that is either supplied or discovered
//! from the header; without one, whole rows are matched by their text.

pub mod config;
pub mod diff;
pub mod error;
pub mod model;

pub use config::{Config, Verbosity};
pub use diff::{compute_diff, DiffEngine, DiffEntry, DiffResult, TableComparison};
pub use error::KeyError;
pub use model::Table;
