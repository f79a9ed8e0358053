//! End-to-end classification pipeline
//!
//! raw text → normalize → tokenize → drop stop words → lemmatize →
//! TF-IDF vectorize → ensemble predict.
//!
//! A [`Pipeline`] is immutable once built. Load it once at startup and share
//! it (e.g. behind an `Arc`) between concurrent requests; no locking is needed.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::classifier::{LinearSvc, NaiveBayes, RandomForest};
use crate::config::ArtifactPaths;
use crate::ensemble::{Ensemble, EnsemblePrediction};
use crate::error::{PipelineError, Result};
use crate::lemmatize::{Deadline, Lemmatizer};
use crate::morph::DictionaryAnalyzer;
use crate::normalize::normalize;
use crate::sparse::SparseVector;
use crate::tokenize::{tokenize, StopWords};
use crate::vectorizer::TfidfVectorizer;

/// Everything produced for one article
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Tokens left after stop-word filtering
    pub tokens: Vec<String>,
    /// One lemma per token
    pub lemmas: Vec<String>,
    pub features: SparseVector,
    pub prediction: EnsemblePrediction,
}

impl PipelineOutput {
    /// True when nothing survived normalization and filtering.
    ///
    /// The classifiers still ran on the all-zero vector, so `prediction` holds
    /// their default answer.
    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

/// Loaded artifacts plus the stage order
#[derive(Debug)]
pub struct Pipeline {
    stop_words: StopWords,
    lemmatizer: Lemmatizer,
    vectorizer: TfidfVectorizer,
    ensemble: Ensemble,
}

impl Pipeline {
    /// Assemble a pipeline from already-loaded parts
    pub fn from_parts(
        stop_words: StopWords,
        lemmatizer: Lemmatizer,
        vectorizer: TfidfVectorizer,
        ensemble: Ensemble,
    ) -> Result<Self> {
        if vectorizer.dim() != ensemble.n_features() {
            return Err(PipelineError::DimensionMismatch {
                model: "ensemble".to_string(),
                expected: ensemble.n_features(),
                actual: vectorizer.dim(),
            });
        }
        Ok(Self {
            stop_words,
            lemmatizer,
            vectorizer,
            ensemble,
        })
    }

    /// Load every artifact from disk. Any missing or malformed artifact is fatal.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        info!("Loading pipeline artifacts");
        let stop_words = StopWords::load(&paths.stop_words)?;
        let analyzer = DictionaryAnalyzer::load(&paths.morph_dictionary)?;
        let vectorizer = TfidfVectorizer::load(&paths.vectorizer)?;
        let ensemble = Ensemble::new(
            Box::new(NaiveBayes::load(&paths.naive_bayes)?),
            Box::new(LinearSvc::load(&paths.linear_svc)?),
            Box::new(RandomForest::load(&paths.random_forest)?),
        )?;

        let pipeline = Self::from_parts(
            stop_words,
            Lemmatizer::new(Arc::new(analyzer)),
            vectorizer,
            ensemble,
        )?;
        info!(
            "Pipeline ready: {} stop words, {} features",
            pipeline.stop_words.len(),
            pipeline.n_features()
        );
        Ok(pipeline)
    }

    /// Shorthand for [`Pipeline::load`] with default file names in `dir`
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(&ArtifactPaths::in_dir(dir))
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.dim()
    }

    /// Normalize, tokenize and filter; the text-only half of the pipeline
    pub fn tokens(&self, raw: &str) -> Vec<String> {
        let normalized = normalize(raw);
        let tokens = tokenize(&normalized);
        let token_count = tokens.len();
        let kept = self.stop_words.filter(tokens);
        debug!(
            "Tokenized {} chars into {} tokens, {} after stop words",
            raw.len(),
            token_count,
            kept.len()
        );
        kept
    }

    /// Classify one article
    pub fn run(&self, raw: &str) -> Result<PipelineOutput> {
        self.run_within(raw, None)
    }

    /// Classify one article, giving up with `Timeout` once `deadline` passes.
    ///
    /// The deadline is checked between tokens during lemmatization, the
    /// stage whose cost grows with input length.
    pub fn run_within(&self, raw: &str, deadline: Option<&Deadline>) -> Result<PipelineOutput> {
        let tokens = self.tokens(raw);
        let lemmas = self.lemmatizer.lemmas_within(&tokens, deadline)?;
        let features = self.vectorizer.transform(&lemmas.join(" "))?;
        let prediction = self.ensemble.predict(&features)?;

        Ok(PipelineOutput {
            tokens,
            lemmas,
            features,
            prediction,
        })
    }
}

/// Run the pipeline on the blocking pool, giving up after `timeout_ms`.
///
/// Lemmatization of very long inputs dominates the cost; a request that
/// exceeds the budget fails with [`PipelineError::Timeout`] and is not retried.
/// The blocking task shares the same deadline, so it stops at the next token
/// instead of running to completion after the caller has given up.
#[cfg(feature = "server")]
pub async fn classify(
    pipeline: Arc<Pipeline>,
    text: String,
    timeout_ms: u64,
) -> Result<PipelineOutput> {
    use std::time::Duration;

    let deadline = Deadline::after_ms(timeout_ms);
    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(move || pipeline.run_within(&text, Some(&deadline))),
    )
    .await;

    match result {
        Ok(Ok(output)) => output,
        Ok(Err(join_error)) => Err(PipelineError::Task(join_error.to_string())),
        Err(_timeout) => Err(PipelineError::Timeout(timeout_ms)),
    }
}
