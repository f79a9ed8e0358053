//! Artifact locations
//!
//! All artifacts are produced offline and consumed read-only. They are
//! loaded once per process by [`crate::Pipeline::load`].

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{PipelineError, Result};

/// Default file name of the stop-word list
pub const STOP_WORDS_FILE: &str = "stopwords.txt";
/// Default file name of the morphological dictionary
pub const MORPH_DICTIONARY_FILE: &str = "polimorf.tab";
/// Default file name of the fitted TF-IDF vectorizer
pub const VECTORIZER_FILE: &str = "tfidf.json";
pub const NAIVE_BAYES_FILE: &str = "nb_classifier.json";
pub const LINEAR_SVC_FILE: &str = "svc_classifier.json";
pub const RANDOM_FOREST_FILE: &str = "rf_classifier.json";

/// Paths to every artifact the pipeline needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Newline-delimited stop-word list
    pub stop_words: PathBuf,
    /// Tab-separated morphological dictionary (form, lemma, tag)
    pub morph_dictionary: PathBuf,
    /// TF-IDF vectorizer export (JSON)
    pub vectorizer: PathBuf,
    pub naive_bayes: PathBuf,
    pub linear_svc: PathBuf,
    pub random_forest: PathBuf,
}

impl ArtifactPaths {
    /// Artifacts stored side by side in one directory under their default names
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            stop_words: dir.join(STOP_WORDS_FILE),
            morph_dictionary: dir.join(MORPH_DICTIONARY_FILE),
            vectorizer: dir.join(VECTORIZER_FILE),
            naive_bayes: dir.join(NAIVE_BAYES_FILE),
            linear_svc: dir.join(LINEAR_SVC_FILE),
            random_forest: dir.join(RANDOM_FOREST_FILE),
        }
    }

    /// Override the morphological dictionary location
    pub fn with_morph_dictionary(mut self, path: impl Into<PathBuf>) -> Self {
        self.morph_dictionary = path.into();
        self
    }

    /// All paths, in load order
    pub fn all(&self) -> [&Path; 6] {
        [
            &self.stop_words,
            &self.morph_dictionary,
            &self.vectorizer,
            &self.naive_bayes,
            &self.linear_svc,
            &self.random_forest,
        ]
    }
}

/// Read and deserialize a JSON artifact
pub(crate) fn read_json_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| PipelineError::ArtifactIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|e| PipelineError::ArtifactFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
