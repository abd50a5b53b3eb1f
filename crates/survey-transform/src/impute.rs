//! Column-mean substitution for missing item responses.
//!
//! Each target column is imputed independently: every null cell is replaced
//! by the mean of that column's present values. The operation never changes
//! the respondent count or the schema, and a column with no missing cells
//! passes through untouched, so re-running the imputer is a no-op.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use serde::{Deserialize, Serialize};
use tracing::debug;

use survey_model::{Result, ScoreError};

use crate::error::polars_err;

/// Audit record for one imputed column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnImputation {
    pub column: String,
    /// Number of cells filled. Zero when the column was already complete.
    pub filled: usize,
    /// The column mean used as the fill value.
    pub mean: f64,
}

/// Replace null cells in the target columns with the per-column mean.
///
/// Fails with [`ScoreError::MissingColumn`] if any target is absent from the
/// schema, and with [`ScoreError::InvalidInput`] if a target column has no
/// present values (the mean of an empty set is undefined) or is not numeric.
/// Both checks run before any cell is written, so a failed call leaves no
/// partially imputed result behind.
///
/// Columns are processed independently; reordering `columns` cannot change
/// the outcome.
pub fn impute_mean(df: &DataFrame, columns: &[String]) -> Result<(DataFrame, Vec<ColumnImputation>)> {
    // Eager pass: resolve every target and its mean before touching data.
    let mut planned: Vec<(usize, &str, f64, Vec<Option<f64>>)> = Vec::with_capacity(columns.len());
    for name in columns {
        let column = df
            .column(name)
            .map_err(|_| ScoreError::MissingColumn {
                column: name.clone(),
            })?;
        let ca = column.f64().map_err(|_| {
            ScoreError::InvalidInput(format!("imputation target {name} is not numeric"))
        })?;
        let values: Vec<Option<f64>> = ca.into_iter().collect();
        let mut sum = 0.0f64;
        let mut present = 0usize;
        for value in values.iter().flatten() {
            sum += value;
            present += 1;
        }
        if present == 0 {
            return Err(ScoreError::InvalidInput(format!(
                "imputation target {name} has no present values"
            )));
        }
        let missing = values.len() - present;
        planned.push((missing, name, sum / present as f64, values));
    }

    let mut out = df.clone();
    let mut audit = Vec::with_capacity(planned.len());
    for (missing, name, mean, values) in planned {
        if missing > 0 {
            let filled: Vec<f64> = values
                .into_iter()
                .map(|value| value.unwrap_or(mean))
                .collect();
            let column: Column = Series::new(name.into(), filled).into();
            out.with_column(column).map_err(polars_err)?;
        }
        debug!(column = name, filled = missing, mean, "imputed column");
        audit.push(ColumnImputation {
            column: name.to_string(),
            filled: missing,
            mean,
        });
    }
    Ok((out, audit))
}
