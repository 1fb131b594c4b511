//! CSV writing of the two output partitions.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OutputError, Result};
use crate::partition::Partitions;

pub const DEFAULT_APPROVED_FILE: &str = "auto_approved_refunds.csv";
pub const DEFAULT_FLAGGED_FILE: &str = "flagged_refunds.csv";

/// Destination files for the approved and flagged partitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub approved: PathBuf,
    pub flagged: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            approved: PathBuf::from(DEFAULT_APPROVED_FILE),
            flagged: PathBuf::from(DEFAULT_FLAGGED_FILE),
        }
    }
}

/// Writes `df` as comma-separated CSV with a header row, truncating `path`.
///
/// A zero-row table still produces a file containing the header.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(BufWriter::new(file))
        .include_header(true)
        .finish(df)
        .map_err(|e| OutputError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

/// Writes both partitions. Both files are always written, even when a
/// partition is empty. The approved file is written first; if the flagged
/// write fails the approved file is left in place.
pub fn write_partitions(partitions: &mut Partitions, paths: &OutputPaths) -> Result<()> {
    write_csv(&mut partitions.approved, &paths.approved)?;
    write_csv(&mut partitions.flagged, &paths.flagged)?;
    Ok(())
}
