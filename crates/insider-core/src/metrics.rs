//! Binary classification metrics for model evaluation.

use serde::{Deserialize, Serialize};

/// Confusion-matrix based report for the normal/suspicious classes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub tp: usize,
    pub tn: usize,
    pub fp: usize,
    pub fn_: usize,
}

impl ClassificationReport {
    /// Build a report from hard predictions and true labels.
    pub fn from_predictions(predictions: &[u8], labels: &[u8]) -> Self {
        let mut report = Self::default();
        for (&pred, &label) in predictions.iter().zip(labels.iter()) {
            match (pred, label) {
                (1, 1) => report.tp += 1,
                (0, 0) => report.tn += 1,
                (1, 0) => report.fp += 1,
                (0, 1) => report.fn_ += 1,
                _ => {}
            }
        }
        report
    }

    /// Precision for the suspicious class.
    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    /// Recall for the suspicious class.
    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    /// F1 for the suspicious class.
    pub fn f1(&self) -> f64 {
        harmonic(self.precision(), self.recall())
    }

    /// Precision for the normal class.
    pub fn normal_precision(&self) -> f64 {
        ratio(self.tn, self.tn + self.fn_)
    }

    /// Recall for the normal class.
    pub fn normal_recall(&self) -> f64 {
        ratio(self.tn, self.tn + self.fp)
    }

    /// F1 for the normal class.
    pub fn normal_f1(&self) -> f64 {
        harmonic(self.normal_precision(), self.normal_recall())
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    /// Render a per-class precision/recall/F1/support table.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10} {:>10}\n",
            "", "precision", "recall", "f1-score", "support"
        ));
        out.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            "Normal",
            self.normal_precision(),
            self.normal_recall(),
            self.normal_f1(),
            self.tn + self.fp
        ));
        out.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            "Suspicious",
            self.precision(),
            self.recall(),
            self.f1(),
            self.tp + self.fn_
        ));
        out.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}\n",
            "accuracy",
            "",
            "",
            self.accuracy(),
            self.total()
        ));
        out
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

fn harmonic(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// ROC AUC via the trapezoidal rule over scores sorted descending.
///
/// Returns 0.5 when either class is empty.
pub fn roc_auc(scores: &[f64], labels: &[u8]) -> f64 {
    if scores.is_empty() || labels.is_empty() {
        return 0.5;
    }

    let mut pairs: Vec<_> = scores.iter().zip(labels.iter()).collect();
    pairs.sort_by(|a, b| b.0.partial_cmp(a.0).unwrap_or(std::cmp::Ordering::Equal));

    let n_pos = labels.iter().filter(|&&l| l == 1).count() as f64;
    let n_neg = labels.iter().filter(|&&l| l == 0).count() as f64;
    if n_pos == 0.0 || n_neg == 0.0 {
        return 0.5;
    }

    let mut auc = 0.0;
    let mut tp = 0.0;
    let mut fp = 0.0;
    let mut prev_tp = 0.0;
    let mut prev_fp = 0.0;
    for (_, &label) in pairs {
        if label == 1 {
            tp += 1.0;
        } else {
            fp += 1.0;
        }
        auc += (fp - prev_fp) * (tp + prev_tp) / 2.0;
        prev_tp = tp;
        prev_fp = fp;
    }

    auc / (n_pos * n_neg)
}

/// Average precision: mean of precision-at-k over the positions of positive
/// samples when ranked by descending score.
///
/// Returns 0.0 when there are no positives.
pub fn average_precision(scores: &[f64], labels: &[u8]) -> f64 {
    let n_pos = labels.iter().filter(|&&l| l == 1).count();
    if scores.is_empty() || n_pos == 0 {
        return 0.0;
    }

    let mut pairs: Vec<_> = scores.iter().zip(labels.iter()).collect();
    pairs.sort_by(|a, b| b.0.partial_cmp(a.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut hits = 0usize;
    let mut sum = 0.0;
    for (rank, (_, &label)) in pairs.iter().enumerate() {
        if label == 1 {
            hits += 1;
            sum += hits as f64 / (rank + 1) as f64;
        }
    }

    sum / n_pos as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let predictions = vec![1, 0, 1, 1, 0, 0, 1, 0];
        let labels = vec![1, 0, 0, 1, 0, 1, 1, 0];

        let report = ClassificationReport::from_predictions(&predictions, &labels);
        assert_eq!(report.tp, 3);
        assert_eq!(report.tn, 3);
        assert_eq!(report.fp, 1);
        assert_eq!(report.fn_, 1);
        assert!((report.accuracy() - 0.75).abs() < 1e-9);
        assert!((report.precision() - 0.75).abs() < 1e-9);
        assert!((report.recall() - 0.75).abs() < 1e-9);
        assert!((report.f1() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_report_render_mentions_both_classes() {
        let report = ClassificationReport::from_predictions(&[1, 0], &[1, 0]);
        let rendered = report.render();
        assert!(rendered.contains("Normal"));
        assert!(rendered.contains("Suspicious"));
        assert!(rendered.contains("support"));
    }

    #[test]
    fn test_roc_auc_perfect_ranking() {
        let scores = vec![0.9, 0.8, 0.3, 0.1];
        let labels = vec![1, 1, 0, 0];
        assert!((roc_auc(&scores, &labels) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_roc_auc_inverted_ranking() {
        let scores = vec![0.1, 0.2, 0.8, 0.9];
        let labels = vec![1, 1, 0, 0];
        assert!(roc_auc(&scores, &labels) < 0.01);
    }

    #[test]
    fn test_roc_auc_degenerate_labels() {
        assert_eq!(roc_auc(&[0.3, 0.7], &[0, 0]), 0.5);
        assert_eq!(roc_auc(&[0.3, 0.7], &[1, 1]), 0.5);
        assert_eq!(roc_auc(&[], &[]), 0.5);
    }

    #[test]
    fn test_average_precision_perfect_ranking() {
        let scores = vec![0.9, 0.8, 0.3, 0.1];
        let labels = vec![1, 1, 0, 0];
        assert!((average_precision(&scores, &labels) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_precision_interleaved() {
        let scores = vec![0.9, 0.8, 0.7, 0.6];
        let labels = vec![1, 0, 1, 0];
        // Positives land at ranks 1 and 3: (1/1 + 2/3) / 2.
        let expected = (1.0 + 2.0 / 3.0) / 2.0;
        assert!((average_precision(&scores, &labels) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_average_precision_no_positives() {
        assert_eq!(average_precision(&[0.5, 0.4], &[0, 0]), 0.0);
    }
}
