//! Survey scoring transformations.
//!
//! This crate provides the pipeline stages that turn a raw survey frame
//! into the augmented dataset handed to the model-fitting collaborators:
//!
//! - **impute**: column-mean substitution for missing item responses
//! - **score**: per-construct composite scores (row means over present items)
//! - **dummy**: indicator coding for the experimental condition
//! - **pipeline**: explicit frame-to-frame stage sequencing with an audit trail

pub mod dummy;
mod error;
pub mod frame;
pub mod impute;
pub mod pipeline;
pub mod score;

pub use dummy::dummy_code;
pub use frame::SurveyFrame;
pub use impute::{ColumnImputation, impute_mean};
pub use pipeline::{PipelineAudit, ScoringPipeline, Stage};
pub use score::{append_composite, column_mean, composite_values};
