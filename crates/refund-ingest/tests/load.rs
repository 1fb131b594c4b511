use std::io::Write;

use refund_ingest::{IngestError, feature_matrix, load_training_set, read_csv_table};
use refund_model::Label;
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{content}").expect("write csv");
    file
}

#[test]
fn loads_historical_file() {
    let file = create_temp_csv(
        "purchase_amount,return_reason_code,customer_return_rate,refund_approved\n\
         120,1,0.05,1\n\
         35.5,4,0.75,0\n\
         80,2,0.2,1\n",
    );
    let set = load_training_set(file.path()).expect("load training set");

    assert_eq!(set.len(), 3);
    assert_eq!(set.features().row(0), &[120.0, 1.0, 0.05]);
    assert_eq!(set.features().row(1), &[35.5, 4.0, 0.75]);
    assert_eq!(
        set.labels(),
        &[Label::Approved, Label::Flagged, Label::Approved]
    );
}

#[test]
fn new_requests_without_label_yield_features() {
    let file = create_temp_csv(
        "customer_return_rate,purchase_amount,return_reason_code\n\
         0.1,50,2\n",
    );
    let df = read_csv_table(file.path()).expect("read csv");
    let features = feature_matrix(&df).expect("features");

    // Reordered columns still come out in schema order.
    assert_eq!(features.row(0), &[50.0, 2.0, 0.1]);
}

#[test]
fn header_only_requests_yield_empty_matrix() {
    let file = create_temp_csv("purchase_amount,return_reason_code,customer_return_rate\n");
    let df = read_csv_table(file.path()).expect("read csv");
    let features = feature_matrix(&df).expect("features");

    assert!(features.is_empty());
    assert_eq!(features.width(), 3);
}

#[test]
fn missing_label_column_is_an_error() {
    let file = create_temp_csv(
        "purchase_amount,return_reason_code,customer_return_rate\n\
         10,1,0.1\n",
    );
    let err = load_training_set(file.path()).unwrap_err();

    assert!(matches!(
        err,
        IngestError::MissingColumn { ref column } if column == "refund_approved"
    ));
}

#[test]
fn ragged_rows_fail_to_parse() {
    let file = create_temp_csv(
        "purchase_amount,return_reason_code,customer_return_rate\n\
         10,1,0.1\n\
         20,2,0.2,9,9\n",
    );
    let err = read_csv_table(file.path()).unwrap_err();

    assert!(matches!(err, IngestError::CsvParse { .. }));
}
