//! Core types for refund triage.
//!
//! Column names of the refund record schema, the binary [`Label`], and the
//! dense [`FeatureMatrix`] that the classifier consumes.

pub mod error;
pub mod label;
pub mod matrix;
pub mod schema;

pub use error::{ModelError, Result};
pub use label::{Label, LabelCounts};
pub use matrix::{FeatureMatrix, TrainingSet};
pub use schema::{FEATURE_COLUMNS, FEATURE_COUNT, LABEL_COLUMN};
