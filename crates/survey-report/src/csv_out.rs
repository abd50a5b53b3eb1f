//! Derived-dataset CSV writer.
//!
//! Writes the augmented frame (source columns plus composites and
//! indicators) for the downstream estimation tooling. Floats are formatted
//! without trailing zeros and missing cells are written empty, matching the
//! ingest side's missing-cell convention so the file round-trips.

use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use polars::prelude::{AnyValue, DataFrame};
use tracing::info;

use survey_ingest::any_to_string;

/// Write a DataFrame to a CSV file with a header row.
pub fn write_frame_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create output csv: {}", path.display()))?;
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    writer
        .write_record(&headers)
        .context("write csv header")?;
    let columns = df.get_columns();
    let mut record = Vec::with_capacity(columns.len());
    for idx in 0..df.height() {
        record.clear();
        for column in columns {
            record.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
        }
        writer
            .write_record(&record)
            .with_context(|| format!("write csv row {idx}"))?;
    }
    writer.flush().context("flush output csv")?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote derived dataset"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_header_floats_and_empty_missing_cells() {
        let df = DataFrame::new(vec![
            Series::new("item1".into(), vec![Some(1.0), None]).into(),
            Series::new("support".into(), vec![Some(4.5), Some(3.0)]).into(),
        ])
        .unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("scored.csv");
        write_frame_csv(&df, &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "item1,support\n1,4.5\n,3\n");
    }
}
