use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading artifacts or running the pipeline.
///
/// All of them are fatal for the request (or for startup, when raised while
/// loading artifacts). None of them may be turned into a verdict.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read artifact {path}: {source}")]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {reason}")]
    ArtifactFormat { path: PathBuf, reason: String },

    #[error("Invalid {artifact}: {reason}")]
    InvalidArtifact { artifact: String, reason: String },

    #[error("Morphological analyzer returned no interpretation for token '{0}'")]
    NoInterpretation(String),

    #[error("Feature dimension mismatch in {model}: expected {expected}, got {actual}")]
    DimensionMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("Pipeline timeout after {0}ms")]
    Timeout(u64),

    #[error("Pipeline task failed: {0}")]
    Task(String),
}

impl PipelineError {
    pub(crate) fn invalid(artifact: &str, reason: impl Into<String>) -> Self {
        PipelineError::InvalidArtifact {
            artifact: artifact.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
