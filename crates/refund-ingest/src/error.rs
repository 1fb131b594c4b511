//! Error types for refund data ingestion.

use std::path::PathBuf;

use refund_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading refund records.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Column Errors ===
    /// Required column not present.
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    /// Column could not be read as numbers.
    #[error("column '{column}' is not numeric: {message}")]
    NonNumericColumn { column: String, message: String },

    /// Null cell in a required column.
    #[error("missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    /// Label cell that is neither 0 nor 1.
    #[error("invalid label {value} at row {row}: expected 0 or 1")]
    InvalidLabel { row: usize, value: f64 },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
