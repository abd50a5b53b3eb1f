//! Scoring-config validation against an ingested dataset.
//!
//! All checks run before any per-row scoring work:
//!
//! - **Missing Column** (Error): a construct item, imputation target, or
//!   condition column absent from the table schema. A config error, fatal.
//! - **Non-Numeric Item** (Error): an item column that did not ingest as
//!   numeric cannot be averaged.
//! - **Undeclared Level** (Error): a condition cell outside the declared
//!   level set.
//! - **Out Of Range** (Warning): item values outside the declared ordinal
//!   bounds. The scorer takes values as given; this only flags them.
//! - **Missingness** (Info): per-column missing counts and, per construct,
//!   the number of rows whose items are all missing (those rows get a null
//!   composite, which downstream estimation handles, but the researcher
//!   should know how many there are).

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, Column, DataFrame};

use survey_ingest::{any_to_f64, any_to_string};
use survey_model::{
    ConditionSpec, Construct, IssueSeverity, ScaleBounds, ScoringConfig, ValidationIssue,
    ValidationReport,
};

/// Validation context.
pub struct Validator {
    report_missingness: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            report_missingness: true,
        }
    }

    /// Disable the informational missingness audit.
    pub fn without_missingness(mut self) -> Self {
        self.report_missingness = false;
        self
    }

    /// Validate a dataset against a scoring configuration.
    pub fn validate(&self, dataset: &str, config: &ScoringConfig, df: &DataFrame) -> ValidationReport {
        let mut report = ValidationReport::new(dataset);

        let mut absent = BTreeSet::new();
        for name in config.referenced_columns() {
            if df.column(name).is_err() {
                absent.insert(name.to_string());
                report.issues.push(missing_column(name));
            }
        }

        for construct in &config.constructs {
            report
                .issues
                .extend(self.check_construct(construct, config.scale_bounds, df, &absent));
        }

        if let Some(condition) = &config.condition
            && !absent.contains(&condition.column)
        {
            report.issues.extend(check_condition_levels(condition, df));
        }

        report
    }

    fn check_construct(
        &self,
        construct: &Construct,
        bounds: Option<ScaleBounds>,
        df: &DataFrame,
        absent: &BTreeSet<String>,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if df.column(&construct.name).is_ok() {
            issues.push(ValidationIssue {
                category: "Name Collision".to_string(),
                message: format!(
                    "construct {} collides with an existing column",
                    construct.name
                ),
                severity: IssueSeverity::Error,
                column: Some(construct.name.clone()),
                count: None,
            });
        }

        let mut usable_items = Vec::new();
        for item in &construct.items {
            if absent.contains(item) {
                continue;
            }
            // df.column can't fail here, absent columns were filtered above
            let Ok(column) = df.column(item) else {
                continue;
            };
            if !column.dtype().is_primitive_numeric() {
                issues.push(ValidationIssue {
                    category: "Non-Numeric Item".to_string(),
                    message: format!("item {item} of construct {} is not numeric", construct.name),
                    severity: IssueSeverity::Error,
                    column: Some(item.clone()),
                    count: None,
                });
                continue;
            }
            if let Some(bounds) = bounds {
                let outside = count_out_of_range(column, bounds, df.height());
                if outside > 0 {
                    issues.push(ValidationIssue {
                        category: "Out Of Range".to_string(),
                        message: format!(
                            "item {item} has {outside} value(s) outside {}-{}",
                            bounds.min, bounds.max
                        ),
                        severity: IssueSeverity::Warning,
                        column: Some(item.clone()),
                        count: Some(outside),
                    });
                }
            }
            if self.report_missingness {
                let missing = count_missing(column, df.height());
                if missing > 0 {
                    issues.push(ValidationIssue {
                        category: "Missingness".to_string(),
                        message: format!("item {item} has {missing} missing value(s)"),
                        severity: IssueSeverity::Info,
                        column: Some(item.clone()),
                        count: Some(missing),
                    });
                }
            }
            usable_items.push(column);
        }

        if self.report_missingness && usable_items.len() == construct.items.len() {
            let empty_rows = count_all_missing_rows(&usable_items, df.height());
            if empty_rows > 0 {
                issues.push(ValidationIssue {
                    category: "Missingness".to_string(),
                    message: format!(
                        "construct {} has {empty_rows} row(s) with every item missing",
                        construct.name
                    ),
                    severity: IssueSeverity::Info,
                    column: None,
                    count: Some(empty_rows),
                });
            }
        }

        issues
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_column(name: &str) -> ValidationIssue {
    ValidationIssue {
        category: "Missing Column".to_string(),
        message: format!("column {name} not found in table"),
        severity: IssueSeverity::Error,
        column: Some(name.to_string()),
        count: None,
    }
}

fn check_condition_levels(condition: &ConditionSpec, df: &DataFrame) -> Vec<ValidationIssue> {
    let Ok(column) = df.column(&condition.column) else {
        return Vec::new();
    };
    let mut undeclared: BTreeSet<String> = BTreeSet::new();
    let mut count = 0u64;
    for idx in 0..df.height() {
        let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !condition.levels.iter().any(|level| level == trimmed) {
            undeclared.insert(trimmed.to_string());
            count += 1;
        }
    }
    if undeclared.is_empty() {
        return Vec::new();
    }
    let mut examples: Vec<String> = undeclared.iter().take(5).cloned().collect();
    examples.sort();
    vec![ValidationIssue {
        category: "Undeclared Level".to_string(),
        message: format!(
            "condition {} has {count} value(s) outside declared levels: {}",
            condition.column,
            examples.join(", ")
        ),
        severity: IssueSeverity::Error,
        column: Some(condition.column.clone()),
        count: Some(count),
    }]
}

fn count_missing(column: &Column, height: usize) -> u64 {
    let mut count = 0u64;
    for idx in 0..height {
        if any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)).is_none() {
            count += 1;
        }
    }
    count
}

fn count_out_of_range(column: &Column, bounds: ScaleBounds, height: usize) -> u64 {
    let mut count = 0u64;
    for idx in 0..height {
        if let Some(value) = any_to_f64(column.get(idx).unwrap_or(AnyValue::Null))
            && !bounds.contains(value)
        {
            count += 1;
        }
    }
    count
}

fn count_all_missing_rows(columns: &[&Column], height: usize) -> u64 {
    let mut count = 0u64;
    for idx in 0..height {
        let all_missing = columns
            .iter()
            .all(|column| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)).is_none());
        if all_missing {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, NamedFrom, Series};

    fn df(columns: &[(&str, &[Option<f64>])]) -> DataFrame {
        DataFrame::new(
            columns
                .iter()
                .map(|(name, values)| Series::new((*name).into(), values.to_vec()).into())
                .collect(),
        )
        .unwrap()
    }

    fn config(items: &[&str]) -> ScoringConfig {
        ScoringConfig {
            constructs: vec![Construct::new(
                "support",
                items.iter().map(ToString::to_string).collect(),
            )],
            ..ScoringConfig::default()
        }
    }

    #[test]
    fn missing_item_column_is_an_error() {
        let df = df(&[("a", &[Some(1.0)])]);
        let report = Validator::new().validate("survey", &config(&["a", "ghost"]), &df);
        assert!(report.has_errors());
        assert!(
            report
                .issues
                .iter()
                .any(|i| i.category == "Missing Column" && i.column.as_deref() == Some("ghost"))
        );
    }

    #[test]
    fn out_of_range_items_warn() {
        let df = df(&[("a", &[Some(1.0), Some(9.0), Some(7.0)])]);
        let mut cfg = config(&["a"]);
        cfg.scale_bounds = Some(ScaleBounds { min: 1.0, max: 6.0 });
        let report = Validator::new().validate("survey", &cfg, &df);
        assert!(!report.has_errors());
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.issues[0].count, Some(2));
    }

    #[test]
    fn all_missing_rows_are_reported_as_info() {
        let df = df(&[
            ("a", &[Some(1.0), None]),
            ("b", &[Some(2.0), None]),
        ]);
        let report = Validator::new().validate("survey", &config(&["a", "b"]), &df);
        assert!(!report.has_errors());
        assert!(
            report
                .issues
                .iter()
                .any(|i| i.category == "Missingness" && i.message.contains("every item missing"))
        );
    }

    #[test]
    fn undeclared_condition_level_is_an_error() {
        let mut frame = df(&[("a", &[Some(1.0), Some(2.0)])]);
        frame
            .with_column(Column::new(
                "vignette".into(),
                vec![Some("control"), Some("placebo")],
            ))
            .unwrap();
        let mut cfg = config(&["a"]);
        cfg.condition = Some(ConditionSpec {
            column: "vignette".into(),
            levels: vec!["control".into(), "internal".into()],
        });
        let report = Validator::new().validate("survey", &cfg, &frame);
        assert!(report.has_errors());
        assert!(
            report
                .issues
                .iter()
                .any(|i| i.category == "Undeclared Level" && i.message.contains("placebo"))
        );
    }

    #[test]
    fn clean_dataset_yields_empty_report() {
        let df = df(&[("a", &[Some(1.0), Some(2.0)])]);
        let report = Validator::new()
            .without_missingness()
            .validate("survey", &config(&["a"]), &df);
        assert!(report.issues.is_empty());
    }
}
