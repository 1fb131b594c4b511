//! Label column and label-based partitioning.

use polars::prelude::*;

use refund_model::{LABEL_COLUMN, Label};

use crate::error::{OutputError, Result};

/// New requests split by predicted label. Row order within each side follows
/// the input table.
#[derive(Debug, Clone)]
pub struct Partitions {
    pub approved: DataFrame,
    pub flagged: DataFrame,
}

impl Partitions {
    pub fn approved_count(&self) -> usize {
        self.approved.height()
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged.height()
    }
}

/// Sets the `refund_approved` column to the label codes, replacing any
/// existing column of that name. Other columns keep their order.
pub fn append_labels(df: &mut DataFrame, labels: &[Label]) -> Result<()> {
    if df.height() != labels.len() {
        return Err(OutputError::LengthMismatch {
            rows: df.height(),
            labels: labels.len(),
        });
    }
    let codes: Vec<i64> = labels.iter().map(|label| label.code()).collect();
    let column = Column::new(LABEL_COLUMN.into(), codes);
    df.with_column(column)?;
    Ok(())
}

/// Appends `labels` to a copy of `df` and splits it into approved and flagged rows.
pub fn partition_by_label(df: &DataFrame, labels: &[Label]) -> Result<Partitions> {
    let mut labelled = df.clone();
    append_labels(&mut labelled, labels)?;

    let approved_mask: Vec<bool> = labels
        .iter()
        .map(|label| *label == Label::Approved)
        .collect();
    let flagged_mask: Vec<bool> = approved_mask.iter().map(|approved| !approved).collect();

    let approved = labelled.filter(&BooleanChunked::from_slice(
        "approved".into(),
        &approved_mask,
    ))?;
    let flagged = labelled.filter(&BooleanChunked::from_slice(
        "flagged".into(),
        &flagged_mask,
    ))?;
    Ok(Partitions { approved, flagged })
}
