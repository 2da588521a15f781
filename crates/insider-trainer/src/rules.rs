//! Simplified decision rules derived from feature importance.
//!
//! This is a presentation-layer summary for downstream consumers: the top
//! features by importance, each paired with a static description. It does not
//! extract actual tree split conditions.

use serde::{Deserialize, Serialize};

use insider_core::features;

use crate::trainer::TrainedClassifier;

/// Default number of rules to extract.
pub const TOP_RULES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRule {
    pub feature: String,
    pub importance: f64,
    pub description: String,
}

/// Top-`top_n` features ranked by importance descending.
pub fn extract_top_rules(classifier: &TrainedClassifier, top_n: usize) -> Vec<DecisionRule> {
    let mut ranked: Vec<(&String, f64)> = classifier
        .feature_names()
        .iter()
        .zip(classifier.importance().iter().copied())
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(feature, importance)| DecisionRule {
            feature: feature.clone(),
            importance,
            description: features::description(feature).to_string(),
        })
        .collect()
}
