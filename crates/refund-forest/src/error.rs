use thiserror::Error;

/// Errors raised while fitting, predicting, or scoring.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForestError {
    #[error("feature matrix has {features} rows but label vector has {labels}")]
    LengthMismatch { features: usize, labels: usize },

    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("non-finite value {value} at row {row}, feature {feature}")]
    NonFiniteFeature {
        row: usize,
        feature: usize,
        value: f64,
    },

    #[error("model was fitted on {expected} features, got {found}")]
    FeatureCountMismatch { expected: usize, found: usize },

    #[error("invalid forest configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid train/test split: {0}")]
    InvalidSplit(String),

    #[error("cannot score an empty prediction set")]
    EmptyEvaluation,
}

pub type Result<T> = std::result::Result<T, ForestError>;
