//! Per-column profiling of a raw survey table.

use std::collections::{BTreeMap, BTreeSet};

use survey_model::ColumnProfile;

use crate::csv_table::SurveyTable;
use crate::polars_utils::parse_f64;

/// Build a [`ColumnProfile`] per column of the raw table.
///
/// `missing_ratio` is the share of missing cells; `is_numeric` holds when at
/// least one cell is present and every present cell parses as a number.
pub fn build_column_profiles(table: &SurveyTable) -> BTreeMap<String, ColumnProfile> {
    let mut profiles = BTreeMap::new();
    let row_count = table.row_count();
    for (col_idx, header) in table.headers.iter().enumerate() {
        let mut present = 0usize;
        let mut numeric = 0usize;
        let mut uniques = BTreeSet::new();
        for row in &table.rows {
            let Some(value) = row.get(col_idx).and_then(Option::as_deref) else {
                continue;
            };
            present += 1;
            uniques.insert(value.to_string());
            if parse_f64(value).is_some() {
                numeric += 1;
            }
        }
        let missing_ratio = if row_count == 0 {
            1.0
        } else {
            (row_count.saturating_sub(present)) as f64 / row_count as f64
        };
        let unique_ratio = if present == 0 {
            0.0
        } else {
            uniques.len() as f64 / present as f64
        };
        profiles.insert(
            header.clone(),
            ColumnProfile {
                is_numeric: present > 0 && numeric == present,
                unique_ratio,
                missing_ratio,
            },
        );
    }
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_report_missing_and_numeric_ratios() {
        let table = SurveyTable {
            headers: vec!["item1".to_string(), "vignette".to_string()],
            rows: vec![
                vec![Some("1".to_string()), Some("control".to_string())],
                vec![None, Some("control".to_string())],
                vec![Some("3".to_string()), Some("internal".to_string())],
            ],
        };
        let profiles = build_column_profiles(&table);
        let item = &profiles["item1"];
        assert!(item.is_numeric);
        assert!((item.missing_ratio - 1.0 / 3.0).abs() < 1e-12);
        assert!((item.unique_ratio - 1.0).abs() < 1e-12);
        let vignette = &profiles["vignette"];
        assert!(!vignette.is_numeric);
        assert_eq!(vignette.missing_ratio, 0.0);
    }
}
