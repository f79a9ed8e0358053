//! Multinomial naive Bayes

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{argmax, check_dimension, Classifier};
use crate::config::read_json_artifact;
use crate::error::{PipelineError, Result};
use crate::sparse::SparseVector;

const NAME: &str = "naive_bayes";

/// Fitted multinomial naive Bayes model.
///
/// Scores each class by its joint log likelihood
/// `class_log_prior[c] + Σ x_i · feature_log_prob[c][i]`.
#[derive(Debug, Clone, Deserialize)]
pub struct NaiveBayes {
    /// Class labels, in the model's class order
    pub classes: [bool; 2],
    pub class_log_prior: [f64; 2],
    /// Per-class log probability of each feature
    pub feature_log_prob: [Vec<f64>; 2],
}

impl NaiveBayes {
    pub fn validate(self) -> Result<Self> {
        let n = self.feature_log_prob[0].len();
        if n == 0 || self.feature_log_prob[1].len() != n {
            return Err(PipelineError::invalid(
                NAME,
                format!(
                    "feature_log_prob rows have {} and {} features",
                    n,
                    self.feature_log_prob[1].len()
                ),
            ));
        }
        if self.classes[0] == self.classes[1] {
            return Err(PipelineError::invalid(NAME, "both classes carry the same label"));
        }
        Ok(self)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let model: Self = read_json_artifact(path)?;
        let model = model.validate()?;
        info!("Loaded naive Bayes from {:?}: {} features", path, model.n_features());
        Ok(model)
    }

    /// Joint log likelihood of both classes
    pub fn joint_log_likelihood(&self, features: &SparseVector) -> [f64; 2] {
        [
            self.class_log_prior[0] + features.dot(&self.feature_log_prob[0]),
            self.class_log_prior[1] + features.dot(&self.feature_log_prob[1]),
        ]
    }
}

impl Classifier for NaiveBayes {
    fn predict(&self, features: &SparseVector) -> Result<bool> {
        check_dimension(NAME, self.n_features(), features)?;
        let jll = self.joint_log_likelihood(features);
        Ok(self.classes[argmax(&jll)])
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn name(&self) -> &str {
        NAME
    }
}
