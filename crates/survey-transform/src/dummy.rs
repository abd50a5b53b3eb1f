//! Indicator (dummy) coding for the experimental condition.
//!
//! A condition with k declared levels gets k-1 appended 0/1 columns, one per
//! non-reference level. A respondent with a missing condition cell is null
//! in every indicator; an observed label outside the declared levels is an
//! error rather than a silent all-zero row.

use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use survey_ingest::any_to_string;
use survey_model::{ConditionSpec, Result, ScoreError};

use crate::error::polars_err;

/// Append indicator columns for the condition, returning the new frame and
/// the names of the appended columns.
pub fn dummy_code(df: &DataFrame, condition: &ConditionSpec) -> Result<(DataFrame, Vec<String>)> {
    let column = df
        .column(&condition.column)
        .map_err(|_| ScoreError::MissingColumn {
            column: condition.column.clone(),
        })?;

    // Read the observed labels once; numeric condition codes are accepted
    // by comparing their string form against the declared levels.
    let mut observed: Vec<Option<String>> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        let trimmed = value.trim();
        if trimmed.is_empty() {
            observed.push(None);
        } else if condition.levels.iter().any(|level| level == trimmed) {
            observed.push(Some(trimmed.to_string()));
        } else {
            return Err(ScoreError::InvalidInput(format!(
                "condition {} has undeclared level {trimmed:?} at row {idx}",
                condition.column
            )));
        }
    }

    let mut out = df.clone();
    let mut appended = Vec::new();
    for level in condition.coded_levels() {
        let name = condition.indicator_name(level);
        if df.column(&name).is_ok() {
            return Err(ScoreError::InvalidInput(format!(
                "indicator column {name} already exists in table"
            )));
        }
        let values: Vec<Option<f64>> = observed
            .iter()
            .map(|cell| {
                cell.as_ref()
                    .map(|label| if label == level { 1.0 } else { 0.0 })
            })
            .collect();
        let indicator: Column = Series::new(name.as_str().into(), values).into();
        out.with_column(indicator).map_err(polars_err)?;
        appended.push(name);
    }
    debug!(
        condition = %condition.column,
        indicators = appended.len(),
        "dummy coded condition"
    );
    Ok((out, appended))
}
