//! Eager validation of scoring configurations against ingested datasets.
//!
//! Every schema problem is caught here before the scoring pipeline does any
//! per-row work; a report with errors aborts the run.

pub mod validator;

pub use validator::Validator;
