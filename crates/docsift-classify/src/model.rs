// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Multiclass softmax-regression classifier, fitted by full-batch gradient
// descent on the multiclass logistic loss. Weights start at zero and the
// epoch count and learning rate are fixed, so fitting and inference are
// fully deterministic.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Epochs of full-batch gradient descent.
const EPOCHS: usize = 500;
/// Gradient descent step size.
const LEARNING_RATE: f64 = 0.5;

/// A fitted multiclass linear classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    /// Per-class weight vectors, indexed `[class][feature]`.
    weights: Vec<Vec<f64>>,
    /// Per-class bias terms.
    bias: Vec<f64>,
}

impl SoftmaxClassifier {
    /// Fit a classifier on feature vectors and their class keys.
    ///
    /// `targets[i]` is the class key of `features[i]` and must be below
    /// `class_count`. All feature vectors share the same length.
    #[instrument(skip_all, fields(
        samples = features.len(),
        class_count,
        dimension = features.first().map(|f| f.len()).unwrap_or(0),
    ))]
    pub fn fit(features: &[Vec<f64>], targets: &[usize], class_count: usize) -> Self {
        let dimension = features.first().map(|f| f.len()).unwrap_or(0);
        let sample_count = features.len();

        let mut weights = vec![vec![0.0; dimension]; class_count];
        let mut bias = vec![0.0; class_count];

        for _epoch in 0..EPOCHS {
            let mut weight_grad = vec![vec![0.0; dimension]; class_count];
            let mut bias_grad = vec![0.0; class_count];

            for (vector, &target) in features.iter().zip(targets) {
                let probabilities = softmax(&scores(&weights, &bias, vector));
                for class in 0..class_count {
                    let indicator = if class == target { 1.0 } else { 0.0 };
                    let error = probabilities[class] - indicator;
                    for (gradient, &value) in weight_grad[class].iter_mut().zip(vector) {
                        *gradient += error * value;
                    }
                    bias_grad[class] += error;
                }
            }

            let step = LEARNING_RATE / sample_count as f64;
            for class in 0..class_count {
                for (weight, gradient) in weights[class].iter_mut().zip(&weight_grad[class]) {
                    *weight -= step * gradient;
                }
                bias[class] -= step * bias_grad[class];
            }
        }

        debug!("classifier fitted");
        Self { weights, bias }
    }

    /// Return the highest-scoring class key for a feature vector. Ties
    /// resolve to the lowest class key.
    pub fn predict(&self, features: &[f64]) -> usize {
        let scores = scores(&self.weights, &self.bias, features);
        let mut best = 0;
        for (class, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = class;
            }
        }
        best
    }

    /// Number of classes the classifier was fitted on.
    pub fn class_count(&self) -> usize {
        self.bias.len()
    }
}

/// Linear scores `W·x + b` for each class.
fn scores(weights: &[Vec<f64>], bias: &[f64], features: &[f64]) -> Vec<f64> {
    weights
        .iter()
        .zip(bias)
        .map(|(class_weights, b)| {
            class_weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
                + b
        })
        .collect()
}

/// Numerically stable softmax (max-subtraction before exponentiation).
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.iter().map(|e| e / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_a_linearly_separable_pair() {
        // Two classes on opposite axes.
        let features = vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.0, 1.0],
            vec![0.1, 0.9],
        ];
        let targets = vec![0, 0, 1, 1];
        let classifier = SoftmaxClassifier::fit(&features, &targets, 2);

        assert_eq!(classifier.predict(&[1.0, 0.0]), 0);
        assert_eq!(classifier.predict(&[0.0, 1.0]), 1);
        assert_eq!(classifier.class_count(), 2);
    }

    #[test]
    fn memorizes_three_classes() {
        let features = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let targets = vec![0, 1, 2];
        let classifier = SoftmaxClassifier::fit(&features, &targets, 3);

        for (vector, &target) in features.iter().zip(&targets) {
            assert_eq!(classifier.predict(vector), target);
        }
    }

    #[test]
    fn prediction_is_deterministic() {
        let features = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let targets = vec![0, 1];
        let classifier = SoftmaxClassifier::fit(&features, &targets, 2);

        let probe = vec![0.6, 0.4];
        let first = classifier.predict(&probe);
        for _ in 0..10 {
            assert_eq!(classifier.predict(&probe), first);
        }
    }

    #[test]
    fn exact_ties_resolve_to_the_lowest_class() {
        // Hand-built classifier whose classes score identically everywhere.
        let classifier: SoftmaxClassifier = serde_json::from_str(
            r#"{"weights":[[0.5,0.5],[0.5,0.5]],"bias":[0.0,0.0]}"#,
        )
        .expect("deserialize");

        assert_eq!(classifier.predict(&[1.0, 1.0]), 0);
        assert_eq!(classifier.predict(&[0.0, 0.0]), 0);
    }

    #[test]
    fn softmax_is_a_probability_distribution() {
        let probabilities = softmax(&[1.0, 2.0, 3.0]);
        let total: f64 = probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(probabilities.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn softmax_survives_large_scores() {
        let probabilities = softmax(&[1000.0, 1000.0]);
        assert!((probabilities[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn classifier_round_trips_through_serde() {
        let features = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let targets = vec![0, 1];
        let classifier = SoftmaxClassifier::fit(&features, &targets, 2);

        let json = serde_json::to_string(&classifier).expect("serialize");
        let restored: SoftmaxClassifier = serde_json::from_str(&json).expect("deserialize");

        let probe = vec![0.7, 0.3];
        assert_eq!(classifier.predict(&probe), restored.predict(&probe));
    }
}
