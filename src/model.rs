//! Baseline risk model: a logistic scorer behind a small capability trait so
//! the pipeline never depends on the concrete model.

use crate::error::PipelineError;
use crate::features::FEATURE_NAMES;
use crate::labels::sigmoid;

pub trait Scorer {
    /// Calibrate the model on a feature matrix and binary labels.
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<(), PipelineError>;
    /// Probability in [0, 1] for one feature vector.
    fn score(&self, features: &[f64]) -> Result<f64, PipelineError>;
    /// Signed per-feature contributions for one feature vector.
    fn explain(&self, features: &[f64]) -> Result<Vec<f64>, PipelineError>;
}

/// Logistic regression fitted by full-batch gradient descent. Zero-init and
/// a fixed schedule keep fitting deterministic; inference has no randomness.
#[derive(Debug, Clone, Default)]
pub struct LogisticScorer {
    weights: Vec<f64>,
    intercept: f64,
    /// Per-feature training means, the reference point for contributions.
    means: Vec<f64>,
}

const LEARNING_RATE: f64 = 0.5;
// Long enough for the near-separable calibration labels to converge to
// confident probabilities.
const EPOCHS: usize = 2000;

impl LogisticScorer {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_shape(&self, got: usize) -> Result<(), PipelineError> {
        if self.weights.is_empty() {
            return Err(PipelineError::ModelNotFitted);
        }
        if got != self.weights.len() {
            return Err(PipelineError::FeatureShape {
                expected: self.weights.len(),
                got,
            });
        }
        Ok(())
    }
}

impl Scorer for LogisticScorer {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<(), PipelineError> {
        if features.is_empty() || features.len() != labels.len() {
            return Err(PipelineError::EmptyInput);
        }
        let dims = features[0].len();
        for row in features {
            if row.len() != dims {
                return Err(PipelineError::FeatureShape {
                    expected: dims,
                    got: row.len(),
                });
            }
        }

        let n = features.len() as f64;
        self.means = vec![0.0; dims];
        for row in features {
            for (mean, value) in self.means.iter_mut().zip(row) {
                *mean += value / n;
            }
        }

        self.weights = vec![0.0; dims];
        self.intercept = 0.0;
        for _ in 0..EPOCHS {
            let mut grad_w = vec![0.0; dims];
            let mut grad_b = 0.0;
            for (row, &label) in features.iter().zip(labels) {
                let z = dot(&self.weights, row) + self.intercept;
                let residual = sigmoid(z) - f64::from(label);
                for (g, value) in grad_w.iter_mut().zip(row) {
                    *g += residual * value;
                }
                grad_b += residual;
            }
            for (w, g) in self.weights.iter_mut().zip(&grad_w) {
                *w -= LEARNING_RATE * g / n;
            }
            self.intercept -= LEARNING_RATE * grad_b / n;
        }
        Ok(())
    }

    fn score(&self, features: &[f64]) -> Result<f64, PipelineError> {
        self.check_shape(features.len())?;
        Ok(sigmoid(dot(&self.weights, features) + self.intercept))
    }

    fn explain(&self, features: &[f64]) -> Result<Vec<f64>, PipelineError> {
        self.check_shape(features.len())?;
        Ok(self
            .weights
            .iter()
            .zip(features)
            .zip(&self.means)
            .map(|((w, x), mean)| w * (x - mean))
            .collect())
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Name of the largest-magnitude contribution. Ties keep the first feature
/// in declaration order.
pub fn top_driver(contributions: &[f64]) -> Result<&'static str, PipelineError> {
    if contributions.len() != FEATURE_NAMES.len() {
        return Err(PipelineError::FeatureShape {
            expected: FEATURE_NAMES.len(),
            got: contributions.len(),
        });
    }
    let mut best = 0;
    for (idx, value) in contributions.iter().enumerate() {
        if value.abs() > contributions[best].abs() {
            best = idx;
        }
    }
    Ok(FEATURE_NAMES[best])
}

/// Train AUC via the Mann-Whitney rank form, ties averaged. `None` when the
/// labels are all one class.
pub fn train_auc(scores: &[f64], labels: &[u8]) -> Option<f64> {
    let positives = labels.iter().filter(|&&l| l == 1).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg_rank;
        }
        i = j + 1;
    }

    let positive_rank_sum: f64 = labels
        .iter()
        .zip(&ranks)
        .filter(|(&l, _)| l == 1)
        .map(|(_, &r)| r)
        .sum();
    let p = positives as f64;
    let n = negatives as f64;
    Some((positive_rank_sum - p * (p + 1.0) / 2.0) / (p * n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        // First feature separates the classes cleanly.
        let features = vec![
            vec![0.1, 0.5],
            vec![0.2, 0.4],
            vec![0.3, 0.6],
            vec![0.8, 0.5],
            vec![0.9, 0.4],
            vec![1.0, 0.6],
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];
        (features, labels)
    }

    #[test]
    fn fit_learns_separating_direction() {
        let (features, labels) = separable_data();
        let mut model = LogisticScorer::new();
        model.fit(&features, &labels).unwrap();

        let low = model.score(&[0.1, 0.5]).unwrap();
        let high = model.score(&[0.9, 0.5]).unwrap();
        assert!(high > low, "expected {high} > {low}");
        assert!((0.0..=1.0).contains(&low));
        assert!((0.0..=1.0).contains(&high));
    }

    #[test]
    fn scoring_is_deterministic() {
        let (features, labels) = separable_data();
        let mut a = LogisticScorer::new();
        let mut b = LogisticScorer::new();
        a.fit(&features, &labels).unwrap();
        b.fit(&features, &labels).unwrap();
        assert_eq!(a.score(&[0.4, 0.5]).unwrap(), b.score(&[0.4, 0.5]).unwrap());
    }

    #[test]
    fn wrong_dimensionality_is_rejected() {
        let (features, labels) = separable_data();
        let mut model = LogisticScorer::new();
        model.fit(&features, &labels).unwrap();
        let err = model.score(&[0.4]).unwrap_err();
        assert!(matches!(err, PipelineError::FeatureShape { expected: 2, got: 1 }));
        let err = model.explain(&[0.4, 0.5, 0.6]).unwrap_err();
        assert!(matches!(err, PipelineError::FeatureShape { expected: 2, got: 3 }));
    }

    #[test]
    fn unfitted_model_refuses_to_score() {
        let model = LogisticScorer::new();
        assert!(matches!(model.score(&[0.1, 0.2]), Err(PipelineError::ModelNotFitted)));
    }

    #[test]
    fn explain_signs_follow_distance_from_mean() {
        let (features, labels) = separable_data();
        let mut model = LogisticScorer::new();
        model.fit(&features, &labels).unwrap();
        // First feature has a positive weight; above-mean values contribute
        // positively, below-mean negatively.
        let above = model.explain(&[1.0, 0.5]).unwrap();
        let below = model.explain(&[0.1, 0.5]).unwrap();
        assert!(above[0] > 0.0);
        assert!(below[0] < 0.0);
    }

    #[test]
    fn top_driver_breaks_ties_on_declaration_order() {
        let mut contributions = vec![0.0; FEATURE_COUNT];
        contributions[3] = 0.4;
        contributions[7] = -0.4;
        assert_eq!(top_driver(&contributions).unwrap(), "manager_span");

        contributions[7] = -0.5;
        assert_eq!(top_driver(&contributions).unwrap(), "peer_turnover_rate");
    }

    #[test]
    fn top_driver_checks_shape() {
        assert!(matches!(
            top_driver(&[0.1, 0.2]),
            Err(PipelineError::FeatureShape { .. })
        ));
    }

    #[test]
    fn auc_is_one_for_perfect_separation() {
        let auc = train_auc(&[0.1, 0.2, 0.8, 0.9], &[0, 0, 1, 1]).unwrap();
        assert!((auc - 1.0).abs() < 1e-9);
    }

    #[test]
    fn auc_is_half_for_constant_scores() {
        let auc = train_auc(&[0.5, 0.5, 0.5, 0.5], &[0, 1, 0, 1]).unwrap();
        assert!((auc - 0.5).abs() < 1e-9);
    }

    #[test]
    fn auc_needs_both_classes() {
        assert!(train_auc(&[0.1, 0.9], &[1, 1]).is_none());
    }
}
