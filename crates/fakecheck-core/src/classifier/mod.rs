//! Pre-trained binary classifiers
//!
//! Every classifier is frozen: it is loaded from a JSON export of a fitted
//! model and never updated. All of them map a TF-IDF feature vector to a
//! boolean label (`true` = the article looks real).

pub mod linear_svc;
pub mod naive_bayes;
pub mod random_forest;

pub use linear_svc::LinearSvc;
pub use naive_bayes::NaiveBayes;
pub use random_forest::RandomForest;

use crate::error::{PipelineError, Result};
use crate::sparse::SparseVector;

/// Trait for frozen binary classifiers
pub trait Classifier: Send + Sync {
    /// Predict the label of one feature vector
    fn predict(&self, features: &SparseVector) -> Result<bool>;

    /// Number of features the model was fitted on
    fn n_features(&self) -> usize;

    /// Get the name of this classifier
    fn name(&self) -> &str;
}

/// Reject vectors whose dimension differs from the model's
pub(crate) fn check_dimension(model: &str, expected: usize, features: &SparseVector) -> Result<()> {
    if features.dim() != expected {
        return Err(PipelineError::DimensionMismatch {
            model: model.to_string(),
            expected,
            actual: features.dim(),
        });
    }
    Ok(())
}

/// Index of the largest score; ties go to the first class
pub(crate) fn argmax(scores: &[f64; 2]) -> usize {
    if scores[1] > scores[0] {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_tie_goes_to_first_class() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.4, 0.6]), 1);
        assert_eq!(argmax(&[-1.0, -2.0]), 0);
    }

    #[test]
    fn test_check_dimension() {
        assert!(check_dimension("nb", 3, &SparseVector::zeros(3)).is_ok());
        let err = check_dimension("nb", 3, &SparseVector::zeros(4)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Feature dimension mismatch in nb: expected 3, got 4"
        );
    }
}
