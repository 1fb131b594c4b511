//! Refund output generation.
//!
//! Appends predicted labels to the new-request table, splits it into the
//! auto-approved and flagged partitions, and writes each partition as CSV.

mod error;
mod partition;
mod writer;

pub use error::{OutputError, Result};
pub use partition::{Partitions, append_labels, partition_by_label};
pub use writer::{
    DEFAULT_APPROVED_FILE, DEFAULT_FLAGGED_FILE, OutputPaths, write_csv, write_partitions,
};
