//! Output side of the scoring pipeline: derived-dataset CSV and
//! per-construct descriptive summaries for the audit trail.

pub mod csv_out;
pub mod summary;

pub use csv_out::write_frame_csv;
pub use summary::construct_summaries;
