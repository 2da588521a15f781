//! The four-stage training pipeline: load, train, extract rules, export.

use std::path::Path;
use tracing::warn;

use insider_core::dataset::{Dataset, DEFAULT_TARGET};
use insider_core::Result;

use crate::exporter;
use crate::trainer;

/// Minimum suspicious-labeled samples required to train at all.
pub const MIN_POSITIVE_SAMPLES: usize = 10;

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Model trained and artifacts exported.
    Trained,
    /// Too few positive samples; nothing was trained or written.
    Skipped { positives: usize },
}

/// Run one full pipeline against a CSV, exporting into
/// `<out_root>/<model_dir>` when the dataset qualifies.
pub fn run_pipeline(
    csv_path: &Path,
    features: &[&str],
    model_dir: &str,
    out_root: &Path,
) -> Result<PipelineOutcome> {
    let dataset = Dataset::from_csv(csv_path, features, DEFAULT_TARGET)?;

    let positives = dataset.positive_count();
    if positives < MIN_POSITIVE_SAMPLES {
        warn!(
            "Not enough positive samples ({}), need at least {}",
            positives, MIN_POSITIVE_SAMPLES
        );
        return Ok(PipelineOutcome::Skipped { positives });
    }

    let classifier = trainer::train_classifier(
        &dataset.matrix,
        &dataset.labels,
        &dataset.feature_names,
    )?;
    exporter::export(&classifier, &out_root.join(model_dir))?;

    Ok(PipelineOutcome::Trained)
}
