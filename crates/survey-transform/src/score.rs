//! Composite score computation.
//!
//! A construct's composite is the per-row mean over whichever of its item
//! columns are present for that row. A row with every item missing gets a
//! null composite, never a zero: a numeric sentinel would silently bias the
//! downstream models this dataset feeds.

use polars::prelude::{Column, DataFrame, Float64Chunked, NamedFrom, Series};
use tracing::debug;

use survey_model::{Construct, Result, ScoreError};

use crate::error::polars_err;

/// Compute the composite values for one construct.
///
/// Item columns are resolved eagerly: an absent item fails with
/// [`ScoreError::MissingColumn`] before any row is processed. Items are
/// iterated in sorted-name order, so permuting the configured item list
/// yields bit-identical results.
pub fn composite_values(df: &DataFrame, construct: &Construct) -> Result<Vec<Option<f64>>> {
    let mut item_names: Vec<&str> = construct.items.iter().map(String::as_str).collect();
    item_names.sort_unstable();
    item_names.dedup();

    let mut item_columns = Vec::with_capacity(item_names.len());
    for name in &item_names {
        let column = df.column(name).map_err(|_| ScoreError::MissingColumn {
            column: (*name).to_string(),
        })?;
        let ca = column.f64().map_err(|_| {
            ScoreError::InvalidInput(format!(
                "item {name} of construct {} is not numeric",
                construct.name
            ))
        })?;
        item_columns.push(ca);
    }

    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut sum = 0.0f64;
        let mut present = 0usize;
        for ca in &item_columns {
            if let Some(value) = ca.get(idx) {
                sum += value;
                present += 1;
            }
        }
        // All items missing: the composite itself is missing for this row.
        values.push((present > 0).then(|| sum / present as f64));
    }
    Ok(values)
}

/// Append the composite column for one construct, returning a new frame.
///
/// The column is named after the construct. Fails with
/// [`ScoreError::InvalidInput`] if that name already exists in the schema:
/// derived columns are appended, never overwrite source data.
pub fn append_composite(df: &DataFrame, construct: &Construct) -> Result<DataFrame> {
    if df.column(&construct.name).is_ok() {
        return Err(ScoreError::InvalidInput(format!(
            "composite column {} already exists in table",
            construct.name
        )));
    }
    let values = composite_values(df, construct)?;
    let scored = values.iter().filter(|value| value.is_some()).count();
    let mut out = df.clone();
    let column: Column = Series::new(construct.name.as_str().into(), values).into();
    out.with_column(column).map_err(polars_err)?;
    debug!(
        construct = %construct.name,
        items = construct.items.len(),
        scored,
        "appended composite column"
    );
    Ok(out)
}

/// Mean of the present values in a nullable float column, if any.
pub fn column_mean(ca: &Float64Chunked) -> Option<f64> {
    let mut sum = 0.0f64;
    let mut present = 0usize;
    for value in ca.into_iter().flatten() {
        sum += value;
        present += 1;
    }
    (present > 0).then(|| sum / present as f64)
}
