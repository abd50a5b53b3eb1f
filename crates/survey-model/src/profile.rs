use serde::{Deserialize, Serialize};

/// Shape summary for one ingested column.
///
/// Built during ingest and consumed by validation and the CLI summary; a
/// column counts as numeric when every present cell parses as a number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub is_numeric: bool,
    pub unique_ratio: f64,
    pub missing_ratio: f64,
}

/// Descriptive statistics for one derived composite column.
///
/// These feed the audit trail handed to the downstream model-fitting
/// collaborators; `sd` is the sample standard deviation and is `None` when
/// fewer than two values are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructSummary {
    pub construct: String,
    pub items: usize,
    pub n: usize,
    pub missing: usize,
    pub mean: Option<f64>,
    pub sd: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}
