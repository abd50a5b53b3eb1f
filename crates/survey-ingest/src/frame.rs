//! DataFrame construction from a raw survey table.
//!
//! A column becomes `Float64` (with nulls for missing cells) when every
//! present cell parses as a number; anything else stays `String` with nulls.
//! Ordinal item responses therefore land as nullable floats, which is the
//! representation the imputer and scorer operate on.

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use crate::csv_table::SurveyTable;
use crate::polars_utils::parse_f64;

/// Convert a [`SurveyTable`] into a Polars `DataFrame`.
pub fn to_data_frame(table: &SurveyTable) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.headers.len());
    for (col_idx, header) in table.headers.iter().enumerate() {
        let cells: Vec<Option<&str>> = table
            .rows
            .iter()
            .map(|row| row.get(col_idx).and_then(Option::as_deref))
            .collect();
        if is_numeric_column(&cells) {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| cell.and_then(parse_f64))
                .collect();
            columns.push(Series::new(header.as_str().into(), values).into());
        } else {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| cell.map(ToString::to_string))
                .collect();
            columns.push(Series::new(header.as_str().into(), values).into());
        }
    }
    let df = DataFrame::new(columns).context("build dataframe from survey table")?;
    debug!(height = df.height(), width = df.width(), "built dataframe");
    Ok(df)
}

fn is_numeric_column(cells: &[Option<&str>]) -> bool {
    let mut present = 0usize;
    for cell in cells.iter().flatten() {
        if parse_f64(cell).is_none() {
            return false;
        }
        present += 1;
    }
    present > 0
}
