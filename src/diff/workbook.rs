//! Comparing every sheet of two workbooks

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::model::Table;

use super::{DiffEngine, TableComparison};

/// Named sheets in workbook order
pub type Workbook = IndexMap<String, Table>;

/// Sheet names to compare: the old workbook's sheets, then sheets that only
/// exist in the new workbook
pub fn sheet_order(old: &Workbook, new: &Workbook) -> Vec<String> {
    old.keys()
        .chain(new.keys().filter(|name| !old.contains_key(*name)))
        .cloned()
        .collect()
}

impl DiffEngine {
    /// Compare two workbooks sheet by sheet.
    ///
    /// A sheet missing from one workbook is compared against an empty table.
    /// Every sheet picks its own compare mode. Results follow [`sheet_order`].
    pub fn compare_workbooks(
        &self,
        mut old: Workbook,
        mut new: Workbook,
    ) -> Vec<TableComparison> {
        let pairs: Vec<(String, Table, Table)> = sheet_order(&old, &new)
            .into_iter()
            .map(|name| {
                let old_sheet = old.swap_remove(&name).unwrap_or_default();
                let new_sheet = new.swap_remove(&name).unwrap_or_default();
                (name, old_sheet, new_sheet)
            })
            .collect();

        log::debug!("Comparing {} sheets", pairs.len());

        if self.config().parallel {
            pairs
                .into_par_iter()
                .map(|(name, old_sheet, new_sheet)| self.compare(&name, old_sheet, new_sheet))
                .collect()
        } else {
            pairs
                .into_iter()
                .map(|(name, old_sheet, new_sheet)| self.compare(&name, old_sheet, new_sheet))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::diff::{CompareMode, DiffResult};

    fn workbook(sheets: Vec<(&str, Table)>) -> Workbook {
        sheets
            .into_iter()
            .map(|(name, table)| (name.to_string(), table))
            .collect()
    }

    #[test]
    fn test_sheet_order() {
        let old = workbook(vec![("b", Table::default()), ("a", Table::default())]);
        let new = workbook(vec![("c", Table::default()), ("a", Table::default())]);
        assert_eq!(sheet_order(&old, &new), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_compare_workbooks_per_sheet() {
        let keyed = Table::from_rows(vec![vec!["id", "v"], vec!["1", "a"]]);
        let keyed_new = Table::from_rows(vec![vec!["id", "v"], vec!["1", "b"]]);
        let dupes = Table::from_rows(vec![vec!["x"], vec!["1"], vec!["1"]]);

        let old = workbook(vec![("people", keyed), ("dupes", dupes.clone())]);
        let new = workbook(vec![
            ("people", keyed_new),
            ("dupes", dupes),
            ("extra", Table::from_rows(vec![vec!["z"]])),
        ]);

        for parallel in [true, false] {
            let engine = DiffEngine::new(Config::default().with_parallel(parallel));
            let results = engine.compare_workbooks(old.clone(), new.clone());

            let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["people", "dupes", "extra"]);

            assert!(matches!(results[0].mode, CompareMode::Keyed { .. }));
            assert_eq!(results[0].stats.changed, 1);

            assert!(matches!(results[1].mode, CompareMode::Fallback { .. }));
            assert!(results[1].is_equal());

            assert_eq!(
                results[2].result,
                DiffResult::Unmatched {
                    new_only: vec![0],
                    old_only: vec![],
                }
            );
        }
    }
}
