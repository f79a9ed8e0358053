//! TF-IDF feature vectorizer
//!
//! Applies a vectorizer fitted offline. The fitted parameters come from a
//! JSON export of a scikit-learn `TfidfVectorizer`; options that are not
//! present fall back to scikit-learn's defaults.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::read_json_artifact;
use crate::error::{PipelineError, Result};
use crate::sparse::SparseVector;

/// scikit-learn's default token pattern: words of two or more characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

const ARTIFACT: &str = "vectorizer";

/// Row normalization applied after TF-IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized form of a fitted vectorizer
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfParams {
    /// Term → feature index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index
    pub idf: Vec<f64>,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Fitted TF-IDF vectorizer, immutable after load
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    norm: Option<Norm>,
    sublinear_tf: bool,
    binary: bool,
    lowercase: bool,
    token_pattern: Regex,
    ngram_range: (usize, usize),
}

impl TfidfVectorizer {
    /// Validate fitted parameters and build the vectorizer
    pub fn from_params(params: TfidfParams) -> Result<Self> {
        let dim = params.idf.len();
        if params.vocabulary.len() != dim {
            return Err(PipelineError::invalid(
                ARTIFACT,
                format!(
                    "vocabulary has {} terms but idf has {} weights",
                    params.vocabulary.len(),
                    dim
                ),
            ));
        }
        let mut owner: Vec<Option<&str>> = vec![None; dim];
        for (term, &idx) in &params.vocabulary {
            let slot = owner.get_mut(idx).ok_or_else(|| {
                PipelineError::invalid(
                    ARTIFACT,
                    format!("term '{}' has index {} outside 0..{}", term, idx, dim),
                )
            })?;
            if let Some(other) = slot.replace(term) {
                return Err(PipelineError::invalid(
                    ARTIFACT,
                    format!("terms '{}' and '{}' share index {}", other, term, idx),
                ));
            }
        }
        let (min_n, max_n) = params.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(PipelineError::invalid(
                ARTIFACT,
                format!("bad ngram_range ({}, {})", min_n, max_n),
            ));
        }
        let token_pattern = Regex::new(&params.token_pattern).map_err(|e| {
            PipelineError::invalid(ARTIFACT, format!("bad token_pattern: {}", e))
        })?;

        Ok(Self {
            vocabulary: params.vocabulary,
            idf: params.idf,
            norm: params.norm,
            sublinear_tf: params.sublinear_tf,
            binary: params.binary,
            lowercase: params.lowercase,
            token_pattern,
            ngram_range: params.ngram_range,
        })
    }

    /// Load the JSON export from disk
    pub fn load(path: &Path) -> Result<Self> {
        let params: TfidfParams = read_json_artifact(path)?;
        let vectorizer = Self::from_params(params)?;
        info!(
            "Loaded TF-IDF vectorizer from {:?}: {} features",
            path,
            vectorizer.dim()
        );
        Ok(vectorizer)
    }

    /// Output dimension (vocabulary size)
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Terms the vectorizer would look up, before vocabulary filtering
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let text = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };
        let words: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > words.len() {
                break;
            }
            terms.extend(words.windows(n).map(|gram| gram.join(" ")));
        }
        terms
    }

    /// Map a lemmatized document to its feature vector
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(document) {
            if let Some(idx) = self.feature_index(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let weighted = counts.into_iter().map(|(idx, count)| {
            let tf = if self.binary {
                1.0
            } else if self.sublinear_tf {
                1.0 + count.ln()
            } else {
                count
            };
            (idx, tf * self.idf[idx])
        });

        let mut vector = SparseVector::from_pairs(self.dim(), weighted)?;

        match self.norm {
            Some(Norm::L2) => {
                let norm = vector.l2_norm();
                vector.scale_down(norm);
            }
            Some(Norm::L1) => {
                let norm = vector.l1_norm();
                vector.scale_down(norm);
            }
            None => {}
        }

        debug!(
            "Vectorized document: {} non-zero features of {}",
            vector.nnz(),
            vector.dim()
        );
        Ok(vector)
    }
}
