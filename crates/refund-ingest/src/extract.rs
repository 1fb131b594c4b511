//! Feature and label extraction from loaded tables.

use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use refund_model::{FEATURE_COLUMNS, FeatureMatrix, LABEL_COLUMN, Label, TrainingSet};

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};

/// Reads `name` as `f64` values, rejecting nulls.
fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| IngestError::MissingColumn {
            column: name.to_string(),
        })?;
    let values = column
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .map_err(|e| IngestError::NonNumericColumn {
            column: name.to_string(),
            message: e.to_string(),
        })?;
    let values = values.f64()?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| IngestError::MissingValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}

/// Extracts the feature columns, in [`FEATURE_COLUMNS`] order.
///
/// Integer columns are widened to `f64`. Extra columns are ignored.
pub fn feature_matrix(df: &DataFrame) -> Result<FeatureMatrix> {
    let columns = FEATURE_COLUMNS
        .iter()
        .map(|name| numeric_column(df, name))
        .collect::<Result<Vec<_>>>()?;
    Ok(FeatureMatrix::from_columns(&columns)?)
}

/// Extracts the `refund_approved` label column.
pub fn label_vector(df: &DataFrame) -> Result<Vec<Label>> {
    numeric_column(df, LABEL_COLUMN)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let label = if value.fract() == 0.0 {
                Label::from_code(value as i64).ok()
            } else {
                None
            };
            label.ok_or(IngestError::InvalidLabel { row, value })
        })
        .collect()
}

/// Builds a training set from a table holding both features and labels.
pub fn training_set(df: &DataFrame) -> Result<TrainingSet> {
    let features = feature_matrix(df)?;
    let labels = label_vector(df)?;
    Ok(TrainingSet::new(features, labels)?)
}

/// Loads historical records from `path` as a training set.
pub fn load_training_set(path: &Path) -> Result<TrainingSet> {
    let df = read_csv_table(path)?;
    let set = training_set(&df)?;
    let counts = set.label_counts();
    debug!(
        path = %path.display(),
        rows = set.len(),
        approved = counts.approved,
        flagged = counts.flagged,
        "loaded training set"
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn historical_df() -> DataFrame {
        df!(
            "purchase_amount" => [120.5, 40.0, 310.0],
            "return_reason_code" => [1i64, 3, 2],
            "customer_return_rate" => [0.05, 0.6, 0.1],
            "refund_approved" => [1i64, 0, 1],
        )
        .unwrap()
    }

    #[test]
    fn extracts_features_in_schema_order() {
        let df = historical_df();
        let features = feature_matrix(&df).unwrap();

        assert_eq!(features.width(), 3);
        assert_eq!(features.len(), 3);
        assert_eq!(features.row(1), &[40.0, 3.0, 0.6]);
    }

    #[test]
    fn extracts_labels() {
        let df = historical_df();
        let labels = label_vector(&df).unwrap();

        assert_eq!(labels, vec![Label::Approved, Label::Flagged, Label::Approved]);
    }

    #[test]
    fn missing_feature_column_is_reported() {
        let df = historical_df().drop("return_reason_code").unwrap();
        let err = feature_matrix(&df).unwrap_err();

        assert!(matches!(
            err,
            IngestError::MissingColumn { ref column } if column == "return_reason_code"
        ));
    }

    #[test]
    fn null_feature_is_reported_with_row() {
        let df = df!(
            "purchase_amount" => [Some(10.0), None],
            "return_reason_code" => [1i64, 2],
            "customer_return_rate" => [0.1, 0.2],
        )
        .unwrap();
        let err = feature_matrix(&df).unwrap_err();

        assert!(matches!(
            err,
            IngestError::MissingValue { ref column, row: 1 } if column == "purchase_amount"
        ));
    }

    #[test]
    fn text_feature_is_not_numeric() {
        let df = df!(
            "purchase_amount" => ["cheap", "pricey"],
            "return_reason_code" => [1i64, 2],
            "customer_return_rate" => [0.1, 0.2],
        )
        .unwrap();
        let err = feature_matrix(&df).unwrap_err();

        assert!(matches!(err, IngestError::NonNumericColumn { .. }));
    }

    #[test]
    fn label_outside_binary_is_rejected() {
        let df = df!(
            "purchase_amount" => [10.0, 20.0],
            "return_reason_code" => [1i64, 2],
            "customer_return_rate" => [0.1, 0.2],
            "refund_approved" => [1i64, 2],
        )
        .unwrap();
        let err = training_set(&df).unwrap_err();

        assert!(matches!(err, IngestError::InvalidLabel { row: 1, .. }));
    }
}
