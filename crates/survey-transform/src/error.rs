use polars::prelude::PolarsError;

use survey_model::ScoreError;

/// Map a Polars failure into the pipeline error taxonomy.
///
/// The stages only hit Polars errors on structurally impossible paths
/// (appending a column built to the frame's own height), so the message is
/// carried through rather than given its own variant.
pub(crate) fn polars_err(error: PolarsError) -> ScoreError {
    ScoreError::InvalidInput(format!("dataframe operation failed: {error}"))
}
