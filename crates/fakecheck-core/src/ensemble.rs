//! Ensemble of the three classifiers
//!
//! The aggregate verdict is a **unanimous AND**: the article counts as
//! "probably true" only when naive Bayes, the linear SVC and the random
//! forest all say so. A single "fake" vote makes the verdict "probably
//! fake". This is deliberately not a majority vote.

use shared_types::{Label, Verdict, VerdictReport};
use tracing::debug;

use crate::classifier::Classifier;
use crate::error::{PipelineError, Result};
use crate::sparse::SparseVector;

/// Per-classifier labels plus the aggregate verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnsemblePrediction {
    pub naive_bayes: bool,
    pub linear_svc: bool,
    pub random_forest: bool,
    pub verdict: bool,
}

impl EnsemblePrediction {
    /// Combine three labels with unanimous AND
    pub fn from_labels(naive_bayes: bool, linear_svc: bool, random_forest: bool) -> Self {
        Self {
            naive_bayes,
            linear_svc,
            random_forest,
            verdict: naive_bayes && linear_svc && random_forest,
        }
    }

    pub fn report(&self) -> VerdictReport {
        VerdictReport {
            verdict: Verdict::from(self.verdict),
            naive_bayes: Label::from(self.naive_bayes),
            linear_svc: Label::from(self.linear_svc),
            random_forest: Label::from(self.random_forest),
        }
    }
}

/// The three frozen classifiers, sharing one feature space
pub struct Ensemble {
    naive_bayes: Box<dyn Classifier>,
    linear_svc: Box<dyn Classifier>,
    random_forest: Box<dyn Classifier>,
}

impl Ensemble {
    /// Build the ensemble; all members must expect the same number of features
    pub fn new(
        naive_bayes: Box<dyn Classifier>,
        linear_svc: Box<dyn Classifier>,
        random_forest: Box<dyn Classifier>,
    ) -> Result<Self> {
        let expected = naive_bayes.n_features();
        for member in [&linear_svc, &random_forest] {
            if member.n_features() != expected {
                return Err(PipelineError::DimensionMismatch {
                    model: member.name().to_string(),
                    expected,
                    actual: member.n_features(),
                });
            }
        }
        Ok(Self {
            naive_bayes,
            linear_svc,
            random_forest,
        })
    }

    pub fn n_features(&self) -> usize {
        self.naive_bayes.n_features()
    }

    /// Names of the members, in report order
    pub fn member_names(&self) -> [&str; 3] {
        [
            self.naive_bayes.name(),
            self.linear_svc.name(),
            self.random_forest.name(),
        ]
    }

    /// Run every member on the same vector and combine the labels
    pub fn predict(&self, features: &SparseVector) -> Result<EnsemblePrediction> {
        let naive_bayes = self.naive_bayes.predict(features)?;
        let linear_svc = self.linear_svc.predict(features)?;
        let random_forest = self.random_forest.predict(features)?;
        let prediction = EnsemblePrediction::from_labels(naive_bayes, linear_svc, random_forest);
        debug!(
            nb = naive_bayes,
            svc = linear_svc,
            rf = random_forest,
            verdict = prediction.verdict,
            "Ensemble prediction"
        );
        Ok(prediction)
    }
}

impl std::fmt::Debug for Ensemble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ensemble")
            .field("members", &self.member_names())
            .field("n_features", &self.n_features())
            .finish()
    }
}
