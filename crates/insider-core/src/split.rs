//! Stratified splitting utilities.
//!
//! The trainer splits 80/20 stratified on the label with a fixed seed, and
//! cross-validation uses stratified k-folds so that heavily imbalanced data
//! keeps at least a few positives in every fold.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Split sample indices into (train, test), stratified by label.
///
/// Each class is shuffled independently and `round(test_fraction * class_size)`
/// of its members go to the test set, so the test split preserves the overall
/// positive rate as closely as integer counts allow.
pub fn train_test_split(labels: &[u8], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut train = Vec::new();
    let mut test = Vec::new();
    for class in [0u8, 1u8] {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();
        members.shuffle(&mut rng);

        let n_test = (test_fraction * members.len() as f64).round() as usize;
        test.extend(members.drain(..n_test.min(members.len())));
        train.extend(members);
    }

    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}

/// Partition sample indices into `k` disjoint folds, stratified by label.
///
/// Each class is shuffled with the seed and dealt round-robin across folds.
pub fn stratified_folds(labels: &[u8], k: usize, seed: u64) -> Vec<Vec<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut folds: Vec<Vec<usize>> = vec![Vec::new(); k];

    for class in [0u8, 1u8] {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();
        members.shuffle(&mut rng);

        for (i, idx) in members.into_iter().enumerate() {
            folds[i % k].push(idx);
        }
    }

    for fold in &mut folds {
        fold.sort_unstable();
    }
    folds
}

/// Weight applied to positive samples to rebalance the loss:
/// `negatives / max(positives, 1)`.
///
/// Must be computed from the training split only, not the full dataset.
pub fn scale_pos_weight(labels: &[u8]) -> f64 {
    let positives = labels.iter().filter(|&&l| l == 1).count();
    let negatives = labels.len() - positives;
    negatives as f64 / positives.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(positives: usize, negatives: usize) -> Vec<u8> {
        let mut l = vec![1u8; positives];
        l.extend(vec![0u8; negatives]);
        l
    }

    #[test]
    fn test_split_is_stratified() {
        let labels = labels(20, 80);
        let (train, test) = train_test_split(&labels, 0.2, 42);

        assert_eq!(train.len() + test.len(), 100);
        let test_pos = test.iter().filter(|&&i| labels[i] == 1).count();
        let train_pos = train.iter().filter(|&&i| labels[i] == 1).count();
        assert_eq!(test_pos, 4);
        assert_eq!(train_pos, 16);
    }

    #[test]
    fn test_split_is_deterministic() {
        let labels = labels(15, 185);
        let first = train_test_split(&labels, 0.2, 42);
        let second = train_test_split(&labels, 0.2, 42);
        assert_eq!(first, second);
    }

    #[test]
    fn test_split_has_no_overlap() {
        let labels = labels(10, 40);
        let (train, test) = train_test_split(&labels, 0.2, 7);
        for idx in &test {
            assert!(!train.contains(idx));
        }
    }

    #[test]
    fn test_folds_are_disjoint_and_cover_everything() {
        let labels = labels(13, 87);
        let folds = stratified_folds(&labels, 5, 42);

        let mut all: Vec<usize> = folds.iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_folds_spread_positives() {
        let labels = labels(10, 90);
        let folds = stratified_folds(&labels, 5, 42);

        for fold in &folds {
            let pos = fold.iter().filter(|&&i| labels[i] == 1).count();
            assert_eq!(pos, 2);
        }
    }

    #[test]
    fn test_scale_pos_weight() {
        assert_eq!(scale_pos_weight(&labels(10, 90)), 9.0);
        assert_eq!(scale_pos_weight(&labels(1, 1)), 1.0);
        // No positives: denominator clamps to 1.
        assert_eq!(scale_pos_weight(&labels(0, 5)), 5.0);
        assert!(scale_pos_weight(&[]) >= 0.0);
    }
}
