//! Random forest of decision trees
//!
//! Trees are stored as flat node arrays with the root at index 0, the same
//! layout scikit-learn uses internally. A split sends a sample left when
//! `x[feature] <= threshold`. The forest averages the class probabilities of
//! all trees and picks the most probable class.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{argmax, check_dimension, Classifier};
use crate::config::read_json_artifact;
use crate::error::{PipelineError, Result};
use crate::sparse::SparseVector;

const NAME: &str = "random_forest";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Per-class sample counts (or weights) reaching this leaf
        value: [f64; 2],
    },
}

/// One fitted decision tree
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children must point forward and stay in bounds, so every walk ends in a leaf
    fn validate(&self, tree_idx: usize, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(PipelineError::invalid(NAME, format!("tree {} has no nodes", tree_idx)));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= n_features {
                        return Err(PipelineError::invalid(
                            NAME,
                            format!(
                                "tree {} node {} splits on feature {} of {}",
                                tree_idx, idx, feature, n_features
                            ),
                        ));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(PipelineError::invalid(
                                NAME,
                                format!("tree {} node {} has bad child {}", tree_idx, idx, child),
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    if total.is_nan() || total <= 0.0 || value.iter().any(|v| *v < 0.0) {
                        return Err(PipelineError::invalid(
                            NAME,
                            format!("tree {} leaf {} has value {:?}", tree_idx, idx, value),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Class probabilities of the leaf `features` falls into
    pub fn predict_proba(&self, features: &SparseVector) -> [f64; 2] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features.get(*feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    return [value[0] / total, value[1] / total];
                }
            }
        }
    }
}

/// Fitted random forest classifier
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub classes: [bool; 2],
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(self) -> Result<Self> {
        if self.trees.is_empty() {
            return Err(PipelineError::invalid(NAME, "forest has no trees"));
        }
        if self.n_features == 0 {
            return Err(PipelineError::invalid(NAME, "n_features is zero"));
        }
        if self.classes[0] == self.classes[1] {
            return Err(PipelineError::invalid(NAME, "both classes carry the same label"));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx, self.n_features)?;
        }
        Ok(self)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let model: Self = read_json_artifact(path)?;
        let model = model.validate()?;
        info!(
            "Loaded random forest from {:?}: {} trees, {} features",
            path,
            model.trees.len(),
            model.n_features
        );
        Ok(model)
    }

    /// Mean class probabilities over all trees
    pub fn predict_proba(&self, features: &SparseVector) -> [f64; 2] {
        let mut sum = [0.0, 0.0];
        for tree in &self.trees {
            let proba = tree.predict_proba(features);
            sum[0] += proba[0];
            sum[1] += proba[1];
        }
        let n = self.trees.len() as f64;
        [sum[0] / n, sum[1] / n]
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: &SparseVector) -> Result<bool> {
        check_dimension(NAME, self.n_features, features)?;
        Ok(self.classes[argmax(&self.predict_proba(features))])
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &str {
        NAME
    }
}
