//! Artifact export for a trained classifier.
//!
//! Writes the native serialized model, a JSON metadata document, and the
//! simplified rule list into one output directory per pipeline. The optional
//! portable export never blocks the mandatory artifacts.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use insider_core::Result;

use crate::rules::{extract_top_rules, DecisionRule, TOP_RULES};
use crate::trainer::{TrainedClassifier, DECISION_THRESHOLD};

/// Native serialized model artifact.
pub const MODEL_FILE: &str = "insider_model.json";
/// Feature metadata and importance map.
pub const MODEL_INFO_FILE: &str = "model_info.json";
/// Simplified rule list.
pub const RULES_FILE: &str = "decision_rules.json";
/// Framework-agnostic model, written only with the `portable-export` feature.
pub const PORTABLE_FILE: &str = "insider_model.portable.json";

/// Constant model-type tag recorded in the metadata document.
pub const MODEL_TYPE: &str = "gbdt";

#[derive(Debug, Serialize)]
struct ModelInfo<'a> {
    features: &'a [String],
    n_features: usize,
    model_type: &'static str,
    threshold: f64,
    feature_importance: BTreeMap<&'a str, f64>,
}

/// Persist all artifacts for one trained classifier under `out_dir`.
pub fn export(classifier: &TrainedClassifier, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let model_path = out_dir.join(MODEL_FILE);
    classifier.save_native(&model_path)?;
    info!("Saved model to {}", model_path.display());

    let info = ModelInfo {
        features: classifier.feature_names(),
        n_features: classifier.feature_names().len(),
        model_type: MODEL_TYPE,
        threshold: DECISION_THRESHOLD,
        feature_importance: classifier
            .feature_names()
            .iter()
            .map(|n| n.as_str())
            .zip(classifier.importance().iter().copied())
            .collect(),
    };
    let info_path = out_dir.join(MODEL_INFO_FILE);
    fs::write(&info_path, serde_json::to_string_pretty(&info)?)?;
    info!("Saved model info to {}", info_path.display());

    let rules: Vec<DecisionRule> = extract_top_rules(classifier, TOP_RULES);
    let rules_path = out_dir.join(RULES_FILE);
    fs::write(&rules_path, serde_json::to_string_pretty(&rules)?)?;
    info!("Saved decision rules to {}", rules_path.display());

    write_portable(classifier, out_dir);

    Ok(())
}

/// Portable export: the native model wrapped with its feature schema so
/// non-Rust consumers can load it without this crate.
#[cfg(feature = "portable-export")]
fn write_portable(classifier: &TrainedClassifier, out_dir: &Path) {
    use tracing::warn;

    let result: Result<()> = (|| {
        let raw = fs::read_to_string(out_dir.join(MODEL_FILE))?;
        let model: serde_json::Value = serde_json::from_str(&raw)?;
        let portable = serde_json::json!({
            "format": "gbdt-json",
            "features": classifier.feature_names(),
            "threshold": DECISION_THRESHOLD,
            "model": model,
        });
        fs::write(
            out_dir.join(PORTABLE_FILE),
            serde_json::to_string_pretty(&portable)?,
        )?;
        Ok(())
    })();

    // Partial failure here must not roll back the mandatory artifacts.
    match result {
        Ok(()) => info!(
            "Saved portable model to {}",
            out_dir.join(PORTABLE_FILE).display()
        ),
        Err(e) => warn!("Portable model export failed, continuing: {}", e),
    }
}

#[cfg(not(feature = "portable-export"))]
fn write_portable(_classifier: &TrainedClassifier, _out_dir: &Path) {
    info!("Note: portable-export feature not enabled, skipping portable model");
}
