use thiserror::Error;

/// Errors raised by the scoring pipeline.
///
/// Schema problems (`MissingColumn`) and undefined computations
/// (`InvalidInput`) are detected eagerly, before any per-row work. A row
/// whose construct items are all missing is *not* an error: the composite
/// for that row is simply null.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// A requested column name is absent from the table schema.
    #[error("column not found in table: {column}")]
    MissingColumn { column: String },
    /// A computation has no defined result (e.g. mean of an empty set).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Scoring configuration could not be parsed or is inconsistent.
    #[error("invalid scoring config: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
