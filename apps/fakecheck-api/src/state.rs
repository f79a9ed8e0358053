//! Application state for the fakecheck server
//!
//! The pipeline is loaded once at startup and shared read-only between
//! requests.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use fakecheck_core::{ArtifactPaths, Pipeline};
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded artifacts, immutable for the life of the process
    pub pipeline: Arc<Pipeline>,
    /// Per-request pipeline budget in milliseconds
    pub timeout_ms: u64,
}

impl AppState {
    pub fn new(pipeline: Pipeline, timeout_ms: u64) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            timeout_ms,
        }
    }

    /// Load every artifact from `artifact_dir`. Fails startup on the first bad file.
    pub fn load(artifact_dir: &Path, timeout_ms: u64) -> Result<Self> {
        info!("Loading artifacts from {:?}", artifact_dir);
        let paths = ArtifactPaths::in_dir(artifact_dir);
        let pipeline = Pipeline::load(&paths)
            .with_context(|| format!("failed to load artifacts from {}", artifact_dir.display()))?;
        Ok(Self::new(pipeline, timeout_ms))
    }
}
