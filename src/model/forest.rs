//! Random forest classifier loaded from a JSON artifact
//!
//! The artifact mirrors the layout of a fitted scikit-learn forest: one
//! node array per tree, leaves marked by `left == -1`, and per-leaf class
//! weights in `value`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A tree node (internal or leaf)
///
/// Internal nodes route left when `row[feature] <= threshold`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeNode {
    /// Left child index (-1 for leaves)
    pub left: i64,
    /// Right child index (-1 for leaves)
    pub right: i64,
    /// Feature index to split on (negative for leaves)
    #[serde(default = "leaf_feature")]
    pub feature: i64,
    #[serde(default)]
    pub threshold: f64,
    /// Class weights at this node, one per class
    #[serde(default)]
    pub value: Vec<f64>,
}

fn leaf_feature() -> i64 {
    -2
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.left < 0 || self.right < 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    /// Number of features the tree was fitted on
    pub n_features_in: usize,
    /// Node 0 is the root
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Class probabilities at the leaf reached by `row`
    pub fn predict_proba(&self, row: &[f64], n_classes: usize) -> Vec<f64> {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.is_leaf() {
                return normalize(&node.value, n_classes);
            }
            idx = if row[node.feature as usize] <= node.threshold {
                node.left as usize
            } else {
                node.right as usize
            };
        }
    }

    /// Check node references so traversal cannot run off the array or loop.
    pub fn validate(&self, n_classes: usize) -> Result<()> {
        if self.nodes.is_empty() {
            anyhow::bail!("Tree has no nodes");
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                if node.value.len() != n_classes {
                    anyhow::bail!(
                        "Leaf {} has {} class weights, expected {}",
                        i,
                        node.value.len(),
                        n_classes
                    );
                }
                continue;
            }

            if node.feature < 0 || node.feature as usize >= self.n_features_in {
                anyhow::bail!("Node {} splits on invalid feature {}", i, node.feature);
            }
            for child in [node.left, node.right] {
                // Children must come after their parent, which rules out cycles
                if child as usize <= i || child as usize >= self.nodes.len() {
                    anyhow::bail!("Node {} has invalid child index {}", i, child);
                }
            }
        }

        Ok(())
    }
}

fn normalize(weights: &[f64], n_classes: usize) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return vec![1.0 / n_classes as f64; n_classes];
    }
    weights.iter().map(|w| w / total).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForestModel {
    pub n_estimators: usize,
    pub n_features_in: usize,
    /// Class labels, in the order of each leaf's `value`
    pub classes: Vec<String>,
    /// Feature columns in model input order
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub estimators: Vec<DecisionTree>,
}

impl RandomForestModel {
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json).context("Failed to parse model JSON")?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file: {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("Invalid model file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            anyhow::bail!("Model has no classes");
        }
        if self.estimators.len() != self.n_estimators {
            anyhow::bail!(
                "n_estimators is {} but {} trees are present",
                self.n_estimators,
                self.estimators.len()
            );
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != self.n_features_in {
            anyhow::bail!(
                "Model lists {} feature names for {} features",
                self.feature_names.len(),
                self.n_features_in
            );
        }
        for (i, tree) in self.estimators.iter().enumerate() {
            if tree.n_features_in != self.n_features_in {
                anyhow::bail!(
                    "Tree {} expects {} features, forest expects {}",
                    i,
                    tree.n_features_in,
                    self.n_features_in
                );
            }
            tree.validate(self.classes.len())
                .with_context(|| format!("Tree {} is malformed", i))?;
        }
        Ok(())
    }

    /// Feature count of the first tree
    pub fn first_tree_features(&self) -> Option<usize> {
        self.estimators.first().map(|t| t.n_features_in)
    }

    /// Mean class probabilities across all trees
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features_in {
            anyhow::bail!(
                "Row has {} features, model expects {}",
                row.len(),
                self.n_features_in
            );
        }

        let n_classes = self.classes.len();
        let mut proba = vec![0.0; n_classes];
        for tree in &self.estimators {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(row, n_classes)) {
                *acc += p;
            }
        }
        let n_trees = self.estimators.len().max(1) as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }

    /// Most probable class label per row; ties go to the earlier class.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<String>> {
        rows.iter()
            .map(|row| {
                let proba = self.predict_proba(row)?;
                let best = proba
                    .iter()
                    .enumerate()
                    .fold(0, |best, (i, p)| if *p > proba[best] { i } else { best });
                Ok(self.classes[best].clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: Vec<f64>) -> TreeNode {
        TreeNode {
            left: -1,
            right: -1,
            feature: -2,
            threshold: 0.0,
            value,
        }
    }

    fn stump(feature: i64, threshold: f64) -> DecisionTree {
        DecisionTree {
            n_features_in: 2,
            nodes: vec![
                TreeNode {
                    left: 1,
                    right: 2,
                    feature,
                    threshold,
                    value: vec![],
                },
                leaf(vec![9.0, 1.0]),
                leaf(vec![2.0, 8.0]),
            ],
        }
    }

    fn forest() -> RandomForestModel {
        RandomForestModel {
            n_estimators: 2,
            n_features_in: 2,
            classes: vec!["0".to_string(), "1".to_string()],
            feature_names: vec![],
            estimators: vec![stump(0, 10.0), stump(1, 0.5)],
        }
    }

    #[test]
    fn test_predict_majority() {
        let model = forest();
        let rows = vec![vec![5.0, 0.0], vec![20.0, 1.0]];
        assert_eq!(model.predict(&rows).unwrap(), vec!["0", "1"]);
    }

    #[test]
    fn test_predict_proba_averages_trees() {
        let model = forest();
        let proba = model.predict_proba(&[5.0, 1.0]).unwrap();
        // (0.9 + 0.2) / 2 and (0.1 + 0.8) / 2
        assert!((proba[0] - 0.55).abs() < 1e-9);
        assert!((proba[1] - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_row_width_is_checked() {
        assert!(forest().predict(&[vec![1.0]]).is_err());
    }

    #[test]
    fn test_estimator_count_must_match() {
        let mut model = forest();
        model.n_estimators = 3;
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_cyclic_tree_is_rejected() {
        let mut tree = stump(0, 1.0);
        tree.nodes[0].right = 0;
        assert!(tree.validate(2).is_err());
    }

    #[test]
    fn test_json_round_trip_loads() {
        let json = serde_json::to_string(&forest()).unwrap();
        let model = RandomForestModel::from_json(&json).unwrap();
        assert_eq!(model.first_tree_features(), Some(2));
    }
}
