//! Refund data ingestion.
//!
//! Reads delimited refund records into Polars DataFrames and pulls out the
//! numeric feature matrix and label vector the classifier trains on.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use refund_ingest::{feature_matrix, load_training_set, read_csv_table};
//!
//! let training = load_training_set(Path::new("historical_refund_data.csv"))?;
//! let requests = read_csv_table(Path::new("new_refund_requests.csv"))?;
//! let features = feature_matrix(&requests)?;
//! ```

mod csv;
mod error;
mod extract;

pub use csv::read_csv_table;
pub use error::{IngestError, Result};
pub use extract::{feature_matrix, label_vector, load_training_set, training_set};
