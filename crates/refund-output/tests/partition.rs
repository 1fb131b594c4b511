use std::fs;
use std::path::Path;

use polars::prelude::*;
use proptest::prelude::*;

use refund_model::Label;
use refund_output::{OutputPaths, partition_by_label, write_partitions};

fn requests(amounts: &[f64]) -> DataFrame {
    let codes: Vec<i64> = (0..amounts.len() as i64).map(|i| i % 5).collect();
    let rates: Vec<f64> = amounts.iter().map(|a| a / 1000.0).collect();
    df!(
        "purchase_amount" => amounts,
        "return_reason_code" => codes,
        "customer_return_rate" => rates,
    )
    .unwrap()
}

fn data_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

fn label_field(line: &str) -> &str {
    line.rsplit(',').next().unwrap()
}

#[test]
fn all_approved_leaves_flagged_file_with_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths {
        approved: dir.path().join("approved.csv"),
        flagged: dir.path().join("flagged.csv"),
    };
    let df = requests(&[10.0, 20.0, 30.0, 40.0, 50.0]);
    let mut parts = partition_by_label(&df, &[Label::Approved; 5]).unwrap();

    write_partitions(&mut parts, &paths).unwrap();

    assert_eq!(data_lines(&paths.approved).len(), 5);
    let flagged = fs::read_to_string(&paths.flagged).unwrap();
    assert_eq!(
        flagged.trim_end(),
        "purchase_amount,return_reason_code,customer_return_rate,refund_approved"
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_row_lands_in_exactly_one_file(flags in prop::collection::vec(any::<bool>(), 0..60)) {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths {
            approved: dir.path().join("approved.csv"),
            flagged: dir.path().join("flagged.csv"),
        };
        // Distinct amounts identify each input row in the output.
        let amounts: Vec<f64> = (0..flags.len()).map(|i| i as f64 + 0.5).collect();
        let labels: Vec<Label> = flags
            .iter()
            .map(|&approved| if approved { Label::Approved } else { Label::Flagged })
            .collect();
        let df = requests(&amounts);
        let mut parts = partition_by_label(&df, &labels).unwrap();
        write_partitions(&mut parts, &paths).unwrap();

        let approved = data_lines(&paths.approved);
        let flagged = data_lines(&paths.flagged);
        prop_assert_eq!(approved.len() + flagged.len(), flags.len());
        prop_assert!(approved.iter().all(|line| label_field(line) == "1"));
        prop_assert!(flagged.iter().all(|line| label_field(line) == "0"));

        let expected_approved: Vec<String> = amounts
            .iter()
            .zip(&flags)
            .filter(|(_, approved)| **approved)
            .map(|(amount, _)| amount.to_string())
            .collect();
        let seen_approved: Vec<String> = approved
            .iter()
            .map(|line| line.split(',').next().unwrap().to_string())
            .collect();
        prop_assert_eq!(seen_approved, expected_approved);
    }
}
