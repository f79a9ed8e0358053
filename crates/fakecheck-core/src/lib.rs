//! fakecheck core - text pipeline and classifier ensemble for Polish news
//!
//! This crate provides:
//! - Text normalization, tokenization and stop-word filtering
//! - Morphological analysis and first-interpretation lemmatization
//! - A TF-IDF vectorizer applied from fitted parameters
//! - Naive Bayes, linear SVC and random forest classifiers
//! - The unanimous-AND ensemble and the end-to-end pipeline
//!
//! ## Features
//!
//! - `server` (default): enables async [`classify`] with a timeout (requires tokio)

pub mod classifier;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod lemmatize;
pub mod morph;
pub mod normalize;
pub mod pipeline;
pub mod sparse;
pub mod tokenize;
pub mod vectorizer;

// Re-export commonly used types
pub use classifier::{Classifier, LinearSvc, NaiveBayes, RandomForest};
pub use config::ArtifactPaths;
pub use ensemble::{Ensemble, EnsemblePrediction};
pub use error::{PipelineError, Result};
pub use lemmatize::{Deadline, Lemmatizer};
pub use morph::{DictionaryAnalyzer, Interpretation, MorphAnalyzer};
pub use normalize::normalize;
pub use pipeline::{Pipeline, PipelineOutput};
pub use sparse::SparseVector;
pub use tokenize::{tokenize, StopWords};
pub use vectorizer::TfidfVectorizer;

#[cfg(feature = "server")]
pub use pipeline::classify;
