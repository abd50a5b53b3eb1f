use std::path::PathBuf;

use survey_model::{ConstructSummary, ValidationReport};
use survey_transform::PipelineAudit;

#[derive(Debug)]
pub struct ScoreResult {
    pub dataset: String,
    pub records: usize,
    pub validation: ValidationReport,
    /// Empty when validation blocked the pipeline.
    pub summaries: Vec<ConstructSummary>,
    pub audit: PipelineAudit,
    /// Written output file, if any (None under --dry-run or on errors).
    pub output: Option<PathBuf>,
    pub has_errors: bool,
}
