//! Linear support vector classifier

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{check_dimension, Classifier};
use crate::config::read_json_artifact;
use crate::error::{PipelineError, Result};
use crate::sparse::SparseVector;

const NAME: &str = "linear_svc";

/// Fitted binary linear SVM: `coef · x + intercept > 0` selects `classes[1]`
#[derive(Debug, Clone, Deserialize)]
pub struct LinearSvc {
    pub classes: [bool; 2],
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LinearSvc {
    pub fn validate(self) -> Result<Self> {
        if self.coef.is_empty() {
            return Err(PipelineError::invalid(NAME, "empty coefficient vector"));
        }
        if self.classes[0] == self.classes[1] {
            return Err(PipelineError::invalid(NAME, "both classes carry the same label"));
        }
        Ok(self)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let model: Self = read_json_artifact(path)?;
        let model = model.validate()?;
        info!("Loaded linear SVC from {:?}: {} features", path, model.n_features());
        Ok(model)
    }

    /// Signed distance to the separating hyperplane (unscaled)
    pub fn decision_function(&self, features: &SparseVector) -> f64 {
        features.dot(&self.coef) + self.intercept
    }
}

impl Classifier for LinearSvc {
    fn predict(&self, features: &SparseVector) -> Result<bool> {
        check_dimension(NAME, self.n_features(), features)?;
        let score = self.decision_function(features);
        Ok(if score > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn name(&self) -> &str {
        NAME
    }
}
