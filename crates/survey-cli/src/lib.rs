//! Library surface of the survey scorer CLI.
//!
//! The binary in `main.rs` only parses arguments, sets up logging, and
//! dispatches into [`commands`]; keeping the command implementations here
//! lets the integration tests drive them directly.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
