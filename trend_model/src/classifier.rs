use serde::{Deserialize, Serialize};

use crate::error::PredictionError;

/// One node of a fitted decision tree. Trees are stored as flat arrays with
/// child links by index; node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Training samples per class that reached this leaf.
        class_counts: Vec<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walks the row down to a leaf; `<= threshold` goes left.
    fn leaf_distribution(&self, row: &[f64]) -> Result<&[f64], PredictionError> {
        let mut index = 0usize;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let value = *row.get(*feature).ok_or(PredictionError::MalformedTree {
                        reason: "split references a feature outside the fitted width",
                    })?;
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { class_counts }) => return Ok(class_counts),
                None => {
                    return Err(PredictionError::MalformedTree {
                        reason: "node index out of bounds",
                    });
                }
            }
        }
    }
}

/// Fitted random forest for binary trend classification. Inference only; the
/// forest was trained elsewhere and arrives as a serialized artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForestClassifier {
    /// Class probabilities: normalized leaf distributions averaged over all
    /// trees. Deterministic for a given row and artifact.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, PredictionError> {
        if row.len() != self.n_features {
            return Err(PredictionError::ShapeMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(PredictionError::EmptyForest);
        }

        let mut probabilities = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let counts = tree.leaf_distribution(row)?;
            if counts.len() != self.n_classes {
                return Err(PredictionError::MalformedTree {
                    reason: "leaf class count differs from n_classes",
                });
            }
            let total: f64 = counts.iter().sum();
            if total <= 0.0 {
                return Err(PredictionError::MalformedTree { reason: "leaf has no samples" });
            }
            for (acc, &count) in probabilities.iter_mut().zip(counts) {
                *acc += count / total;
            }
        }

        let n_trees = self.trees.len() as f64;
        for p in &mut probabilities {
            *p /= n_trees;
            if !p.is_finite() {
                return Err(PredictionError::NonFiniteProbability);
            }
        }
        Ok(probabilities)
    }

    /// Argmax over `predict_proba`; on a tie the lowest class index wins.
    pub fn predict(&self, row: &[f64]) -> Result<usize, PredictionError> {
        let probabilities = self.predict_proba(row)?;
        let mut best = 0;
        for (class, &p) in probabilities.iter().enumerate() {
            if p > probabilities[best] {
                best = class;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split { feature, threshold, left: 1, right: 2 },
                TreeNode::Leaf { class_counts: left.to_vec() },
                TreeNode::Leaf { class_counts: right.to_vec() },
            ],
        }
    }

    fn forest() -> RandomForestClassifier {
        RandomForestClassifier {
            n_features: 2,
            n_classes: 2,
            trees: vec![
                stump(0, 0.0, [3.0, 1.0], [1.0, 3.0]),
                stump(1, 0.5, [2.0, 2.0], [0.0, 4.0]),
            ],
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let probs = forest().predict_proba(&[1.0, 1.0]).unwrap();
        assert_eq!(probs.len(), 2);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn predict_matches_argmax() {
        let f = forest();
        let row = [1.0, 1.0];
        let probs = f.predict_proba(&row).unwrap();
        let label = f.predict(&row).unwrap();
        assert_eq!(label, if probs[1] > probs[0] { 1 } else { 0 });
    }

    #[test]
    fn tie_resolves_to_class_zero() {
        // Both leaves split evenly: p = [0.5, 0.5].
        let f = RandomForestClassifier {
            n_features: 1,
            n_classes: 2,
            trees: vec![stump(0, 0.0, [2.0, 2.0], [1.0, 1.0])],
        };
        assert_eq!(f.predict(&[1.0]).unwrap(), 0);
    }

    #[test]
    fn wrong_width_row_is_rejected() {
        let err = forest().predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::ShapeMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn empty_forest_is_rejected() {
        let f = RandomForestClassifier { n_features: 1, n_classes: 2, trees: vec![] };
        assert!(matches!(
            f.predict_proba(&[1.0]).unwrap_err(),
            PredictionError::EmptyForest
        ));
    }

    #[test]
    fn empty_leaf_is_rejected() {
        let f = RandomForestClassifier {
            n_features: 1,
            n_classes: 2,
            trees: vec![stump(0, 0.0, [0.0, 0.0], [1.0, 1.0])],
        };
        assert!(matches!(
            f.predict_proba(&[-1.0]).unwrap_err(),
            PredictionError::MalformedTree { .. }
        ));
    }
}
