use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::debug;

/// Raw survey table as read from a CSV export: a header row plus string
/// cells. Missing cells are already normalized to `None` according to the
/// missing-token set in [`IngestOptions`].
#[derive(Debug, Clone)]
pub struct SurveyTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SurveyTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Options controlling CSV ingest.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Cell values treated as missing, compared after trimming,
    /// case-insensitively. The empty string is always missing.
    pub missing_tokens: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            missing_tokens: ["NA", "N/A", "."]
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl IngestOptions {
    fn is_missing(&self, cell: &str) -> bool {
        let trimmed = cell.trim();
        trimmed.is_empty()
            || self
                .missing_tokens
                .iter()
                .any(|token| token.eq_ignore_ascii_case(trimmed))
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a survey CSV with default options.
pub fn read_survey_table(path: &Path) -> Result<SurveyTable> {
    read_survey_table_with_options(path, &IngestOptions::default())
}

/// Read a survey CSV into a [`SurveyTable`].
///
/// The first row is the header; fully blank rows are skipped; short records
/// are padded with missing cells so every row has one cell per header.
pub fn read_survey_table_with_options(path: &Path, options: &IngestOptions) -> Result<SurveyTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        bail!("empty csv: {}", path.display());
    }
    let headers: Vec<String> = raw_rows[0].iter().map(|value| normalize_header(value)).collect();
    if headers.iter().any(String::is_empty) {
        bail!("blank header cell in {}", path.display());
    }
    let mut rows = Vec::with_capacity(raw_rows.len() - 1);
    for record in raw_rows.iter().skip(1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            if options.is_missing(value) {
                row.push(None);
            } else {
                row.push(Some(value.to_string()));
            }
        }
        rows.push(row);
    }
    debug!(
        rows = rows.len(),
        columns = headers.len(),
        "loaded survey table"
    );
    Ok(SurveyTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tokens_match_case_insensitively() {
        let options = IngestOptions::default();
        assert!(options.is_missing(""));
        assert!(options.is_missing("  "));
        assert!(options.is_missing("NA"));
        assert!(options.is_missing("na"));
        assert!(options.is_missing("n/a"));
        assert!(options.is_missing("."));
        assert!(!options.is_missing("0"));
        assert!(!options.is_missing("nan but text"));
    }

    #[test]
    fn header_normalization_strips_bom_and_collapses_spaces() {
        assert_eq!(normalize_header("\u{feff}item1"), "item1");
        assert_eq!(normalize_header("  item  one  "), "item one");
    }
}
