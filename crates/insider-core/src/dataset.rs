//! CSV dataset loading for model training.
//!
//! Input files carry one row per trade or wallet, a superset of the fixed
//! feature columns, and a binary `is_suspicious` label column. Missing cells
//! are treated as zero; no other imputation is applied.

use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};

/// Default binary target column.
pub const DEFAULT_TARGET: &str = "is_suspicious";

/// A loaded feature matrix with its binary label vector.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Requested feature columns actually present in the source, in request order.
    pub feature_names: Vec<String>,
    /// Row-major feature matrix, one inner vector per sample.
    pub matrix: Vec<Vec<f64>>,
    /// Binary labels (0 = normal, 1 = suspicious).
    pub labels: Vec<u8>,
}

impl Dataset {
    /// Load a headered CSV, selecting `requested` feature columns and the
    /// `target` label column.
    ///
    /// Fails if the target column is absent. Requested feature columns that
    /// are missing from the header are dropped with a warning.
    pub fn from_csv(path: impl AsRef<Path>, requested: &[&str], target: &str) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading {}...", path.display());

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let target_idx = headers.iter().position(|h| h == target).ok_or_else(|| {
            Error::Config {
                message: format!("Target column '{}' not found in data", target),
            }
        })?;

        // Resolve requested features against the header, preserving request order.
        let mut feature_names = Vec::with_capacity(requested.len());
        let mut feature_indices = Vec::with_capacity(requested.len());
        let mut missing = Vec::new();
        for &feature in requested {
            match headers.iter().position(|h| h == feature) {
                Some(idx) => {
                    feature_names.push(feature.to_string());
                    feature_indices.push(idx);
                }
                None => missing.push(feature),
            }
        }
        if !missing.is_empty() {
            warn!("Missing features: {:?}", missing);
        }

        let mut matrix = Vec::new();
        let mut labels = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Vec<f64> = feature_indices
                .iter()
                .map(|&idx| fill_missing(record.get(idx)))
                .collect();
            let label = if fill_missing(record.get(target_idx)) != 0.0 {
                1
            } else {
                0
            };
            matrix.push(row);
            labels.push(label);
        }

        let dataset = Self {
            feature_names,
            matrix,
            labels,
        };
        info!(
            "Loaded {} samples, {} positive ({:.1}%)",
            dataset.len(),
            dataset.positive_count(),
            dataset.positive_rate() * 100.0
        );

        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of suspicious-labeled samples.
    pub fn positive_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }

    /// Fraction of suspicious-labeled samples (0.0 for an empty dataset).
    pub fn positive_rate(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.positive_count() as f64 / self.len() as f64
    }
}

/// Convert a raw CSV cell to a numeric value, treating missing, blank, and
/// unparseable cells as zero.
pub fn fill_missing(cell: Option<&str>) -> f64 {
    cell.map(|c| c.trim().parse::<f64>().unwrap_or(0.0))
        .unwrap_or(0.0)
}
