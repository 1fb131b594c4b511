use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("invalid label code {value}: expected 0 (flagged) or 1 (approved)")]
    InvalidLabel { value: i64 },
    #[error("row {row} has {found} features, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("feature column {column} has {found} values, expected {expected}")]
    ColumnLength {
        column: usize,
        expected: usize,
        found: usize,
    },
    #[error("feature matrix has {features} rows but label vector has {labels}")]
    LengthMismatch { features: usize, labels: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
