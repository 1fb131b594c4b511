//! Refund triage pipeline: load, split, train, evaluate, predict, write.
//!
//! Each stage runs exactly once, in order, inside its own `tracing` span.
//! The first error aborts the run; nothing is retried.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use refund_forest::{
    ConfusionMatrix, DEFAULT_TEST_FRACTION, ForestConfig, RandomForest, accuracy_score,
    train_test_split,
};
use refund_ingest::{feature_matrix, load_training_set, read_csv_table};
use refund_model::TrainingSet;
use refund_output::{OutputPaths, partition_by_label, write_partitions};

pub const DEFAULT_HISTORICAL_FILE: &str = "historical_refund_data.csv";
pub const DEFAULT_REQUESTS_FILE: &str = "new_refund_requests.csv";

/// Inputs, outputs, and model settings for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Historical records with the `refund_approved` label.
    pub historical: PathBuf,
    /// New requests to classify.
    pub requests: PathBuf,
    pub outputs: OutputPaths,
    /// Share of historical rows held out for accuracy.
    pub test_fraction: f64,
    /// Forest settings; `forest.seed` also seeds the train/test split.
    pub forest: ForestConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            historical: PathBuf::from(DEFAULT_HISTORICAL_FILE),
            requests: PathBuf::from(DEFAULT_REQUESTS_FILE),
            outputs: OutputPaths::default(),
            test_fraction: DEFAULT_TEST_FRACTION,
            forest: ForestConfig::default(),
        }
    }
}

/// Held-out scores of a fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
}

/// Row counts of the predicted new requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictionCounts {
    pub requests: usize,
    pub approved: usize,
    pub flagged: usize,
}

/// Everything a run reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub historical_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub seed: u64,
    pub trees: usize,
    pub evaluation: Evaluation,
    pub predictions: PredictionCounts,
    pub outputs: OutputPaths,
}

/// Splits historical records into training and held-out sets.
pub fn split_training_set(
    set: &TrainingSet,
    test_fraction: f64,
    seed: u64,
) -> Result<(TrainingSet, TrainingSet)> {
    let split = train_test_split(set.len(), test_fraction, seed)?;
    Ok((set.select(&split.train), set.select(&split.test)))
}

/// Fits the forest on the training set.
pub fn train_model(train: &TrainingSet, config: &ForestConfig) -> Result<RandomForest> {
    Ok(RandomForest::fit(train.features(), train.labels(), config)?)
}

/// Scores `model` on the held-out set.
pub fn evaluate_model(model: &RandomForest, test: &TrainingSet) -> Result<Evaluation> {
    let predicted = model.predict(test.features())?;
    let accuracy = accuracy_score(test.labels(), &predicted)?;
    let confusion = ConfusionMatrix::from_predictions(test.labels(), &predicted)?;
    Ok(Evaluation {
        accuracy,
        confusion,
    })
}

/// Predicts every request in `requests` and writes the two partitions.
pub fn predict_and_save(
    model: &RandomForest,
    requests: &Path,
    outputs: &OutputPaths,
) -> Result<PredictionCounts> {
    let df = read_csv_table(requests)
        .with_context(|| format!("load new requests: {}", requests.display()))?;
    if df.height() == 0 {
        warn!(path = %requests.display(), "no new refund requests");
    }
    let features = feature_matrix(&df)
        .with_context(|| format!("extract features: {}", requests.display()))?;
    let labels = model.predict(&features).context("predict new requests")?;

    let mut partitions = partition_by_label(&df, &labels).context("partition requests")?;
    info_span!(
        "write",
        approved = partitions.approved_count(),
        flagged = partitions.flagged_count()
    )
    .in_scope(|| write_partitions(&mut partitions, outputs))
    .context("write outputs")?;
    debug!(
        approved = %outputs.approved.display(),
        flagged = %outputs.flagged.display(),
        "partitions written"
    );

    Ok(PredictionCounts {
        requests: df.height(),
        approved: partitions.approved_count(),
        flagged: partitions.flagged_count(),
    })
}

/// Runs every stage in order, writing the accuracy line and the output
/// paths to `out` as soon as each is known.
pub fn run_pipeline(config: &PipelineConfig, out: &mut dyn Write) -> Result<RunSummary> {
    let seed = config.forest.seed;

    // =========================================================================
    // Stage 1: Load historical records
    // =========================================================================
    let load_span = info_span!("load", path = %config.historical.display());
    let load_start = Instant::now();
    let historical = load_span
        .in_scope(|| load_training_set(&config.historical))
        .with_context(|| format!("load historical data: {}", config.historical.display()))?;
    let counts = historical.label_counts();
    info!(
        rows = historical.len(),
        approved = counts.approved,
        flagged = counts.flagged,
        duration_ms = load_start.elapsed().as_millis(),
        "historical data loaded"
    );

    // =========================================================================
    // Stage 2: Train/test split
    // =========================================================================
    let (train, test) = info_span!("split", seed, test_fraction = config.test_fraction)
        .in_scope(|| split_training_set(&historical, config.test_fraction, seed))
        .context("split historical data")?;
    info!(
        train_rows = train.len(),
        test_rows = test.len(),
        "split historical data"
    );

    // =========================================================================
    // Stage 3: Fit
    // =========================================================================
    let train_start = Instant::now();
    let model = info_span!("train", trees = config.forest.n_trees, seed)
        .in_scope(|| train_model(&train, &config.forest))
        .context("train model")?;
    info!(
        trees = model.n_trees(),
        duration_ms = train_start.elapsed().as_millis(),
        "model trained"
    );

    // =========================================================================
    // Stage 4: Evaluate on held-out rows
    // =========================================================================
    let evaluation = info_span!("evaluate", rows = test.len())
        .in_scope(|| evaluate_model(&model, &test))
        .context("evaluate model")?;
    info!(
        accuracy = evaluation.accuracy,
        true_approved = evaluation.confusion.true_approved,
        false_approved = evaluation.confusion.false_approved,
        true_flagged = evaluation.confusion.true_flagged,
        false_flagged = evaluation.confusion.false_flagged,
        "model evaluated"
    );
    writeln!(out, "Accuracy: {:.2}", evaluation.accuracy)?;

    // =========================================================================
    // Stage 5: Predict new requests and write partitions
    // =========================================================================
    let predict_start = Instant::now();
    let predictions = info_span!("predict", path = %config.requests.display())
        .in_scope(|| predict_and_save(&model, &config.requests, &config.outputs))?;
    info!(
        requests = predictions.requests,
        approved = predictions.approved,
        flagged = predictions.flagged,
        duration_ms = predict_start.elapsed().as_millis(),
        "requests classified"
    );
    writeln!(
        out,
        "Results saved to {} and {}",
        config.outputs.approved.display(),
        config.outputs.flagged.display()
    )?;

    Ok(RunSummary {
        historical_rows: historical.len(),
        train_rows: train.len(),
        test_rows: test.len(),
        seed,
        trees: model.n_trees(),
        evaluation,
        predictions,
        outputs: config.outputs.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use refund_model::{FeatureMatrix, Label};

    fn small_set(n: usize) -> TrainingSet {
        let mut features = FeatureMatrix::new(3);
        let mut labels = Vec::new();
        for i in 0..n {
            let amount = i as f64 * 5.0;
            features.push_row(&[amount, (i % 3) as f64, 0.2]).unwrap();
            labels.push(if amount < 100.0 {
                Label::Approved
            } else {
                Label::Flagged
            });
        }
        TrainingSet::new(features, labels).unwrap()
    }

    #[test]
    fn split_is_eighty_twenty() {
        let (train, test) = split_training_set(&small_set(100), 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn evaluation_accuracy_matches_confusion() {
        let set = small_set(60);
        let (train, test) = split_training_set(&set, 0.2, 42).unwrap();
        let model = train_model(&train, &ForestConfig::default().with_trees(15)).unwrap();
        let evaluation = evaluate_model(&model, &test).unwrap();

        assert_eq!(evaluation.confusion.total(), test.len());
        assert!((evaluation.accuracy - evaluation.confusion.accuracy()).abs() < 1e-12);
    }

    #[test]
    fn default_config_uses_conventional_files() {
        let config = PipelineConfig::default();
        assert_eq!(config.historical, PathBuf::from("historical_refund_data.csv"));
        assert_eq!(config.requests, PathBuf::from("new_refund_requests.csv"));
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.forest.seed, 42);
    }
}
