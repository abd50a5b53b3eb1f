//! Survey frame type for dataset representation.
//!
//! Wraps a Polars `DataFrame` with provenance metadata. A frame is treated
//! as a value: every pipeline stage takes a frame and returns a new one,
//! so ordering dependencies between stages stay explicit and testable.

use std::path::PathBuf;

use polars::prelude::DataFrame;

/// A survey dataset with metadata.
///
/// `data` holds one row per respondent; item columns are nullable floats
/// where null marks a missing response (distinct from a valid zero).
#[derive(Debug, Clone)]
pub struct SurveyFrame {
    /// Dataset identifier, usually the source file stem.
    pub dataset_name: String,
    /// The dataset contents as a Polars DataFrame.
    pub data: DataFrame,
    /// Source CSV this frame was loaded from, for traceability.
    pub source_file: Option<PathBuf>,
}

impl SurveyFrame {
    /// Create a new frame with just a name and data.
    pub fn new(dataset_name: impl Into<String>, data: DataFrame) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            data,
            source_file: None,
        }
    }

    /// Attach the source file path.
    pub fn with_source_file(mut self, path: PathBuf) -> Self {
        self.source_file = Some(path);
        self
    }

    /// Returns the number of respondent records in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Returns true when the schema contains the named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.data.column(name).is_ok()
    }

    /// Replace the data while keeping the metadata. Used by pipeline stages
    /// to derive the next frame value from the current one.
    pub fn with_data(&self, data: DataFrame) -> Self {
        Self {
            dataset_name: self.dataset_name.clone(),
            data,
            source_file: self.source_file.clone(),
        }
    }
}
