//! CLI argument definitions for the survey scorer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-scorer",
    version,
    about = "Survey scale scorer - impute, dummy-code, and score survey data",
    long_about = "Prepare survey data for statistical modeling.\n\n\
                  Reads a respondent-level CSV and a scoring configuration, validates the\n\
                  construct definitions against the data, mean-imputes the configured\n\
                  columns, dummy-codes the experimental condition, and appends one\n\
                  composite score column per construct."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a survey CSV and write the augmented dataset.
    Score(ScoreArgs),

    /// List the constructs defined in a scoring config.
    Constructs(ConstructsArgs),
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Path to the survey data CSV (header row, one row per respondent).
    #[arg(value_name = "DATA_CSV")]
    pub data: PathBuf,

    /// Path to the scoring configuration JSON.
    #[arg(long = "config", value_name = "JSON")]
    pub config: PathBuf,

    /// Output CSV path (default: <DATA_CSV stem>_scored.csv next to input).
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Additional cell values to treat as missing (repeatable).
    #[arg(long = "missing-token", value_name = "TOKEN")]
    pub missing_tokens: Vec<String>,

    /// Validate and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ConstructsArgs {
    /// Path to the scoring configuration JSON.
    #[arg(long = "config", value_name = "JSON")]
    pub config: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
