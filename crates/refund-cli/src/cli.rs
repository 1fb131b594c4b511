//! CLI argument definitions for refund triage.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use refund_cli::pipeline::{DEFAULT_HISTORICAL_FILE, DEFAULT_REQUESTS_FILE};
use refund_forest::{DEFAULT_SEED, DEFAULT_TEST_FRACTION};
use refund_output::{DEFAULT_APPROVED_FILE, DEFAULT_FLAGGED_FILE};

#[derive(Parser)]
#[command(
    name = "refund-triage",
    version,
    about = "Train a refund classifier and split new requests into approved and flagged files",
    long_about = "Train a random forest on historical refund decisions, report held-out\n\
                  accuracy, then predict new refund requests and write them to an\n\
                  auto-approved file and a flagged file.\n\n\
                  With no arguments, reads historical_refund_data.csv and\n\
                  new_refund_requests.csv from the current directory."
)]
pub struct Cli {
    /// Historical refund records with a refund_approved column.
    #[arg(long = "historical", value_name = "PATH", default_value = DEFAULT_HISTORICAL_FILE)]
    pub historical: PathBuf,

    /// New refund requests to classify.
    #[arg(long = "requests", value_name = "PATH", default_value = DEFAULT_REQUESTS_FILE)]
    pub requests: PathBuf,

    /// Output file for requests predicted as approved.
    #[arg(long = "approved-out", value_name = "PATH", default_value = DEFAULT_APPROVED_FILE)]
    pub approved_out: PathBuf,

    /// Output file for requests predicted as flagged.
    #[arg(long = "flagged-out", value_name = "PATH", default_value = DEFAULT_FLAGGED_FILE)]
    pub flagged_out: PathBuf,

    /// Seed for the train/test split and the forest.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Fraction of historical rows held out for accuracy.
    #[arg(long = "test-fraction", default_value_t = DEFAULT_TEST_FRACTION)]
    pub test_fraction: f64,

    /// Number of trees in the forest.
    #[arg(long = "trees", default_value_t = 100)]
    pub trees: usize,

    /// Maximum tree depth (unlimited when omitted).
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
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
