//! API handlers for the fakecheck server
//!
//! Provides REST endpoints for:
//! - Health checks
//! - Article verification
//! - The placeholder report shown before a submission

use std::sync::Arc;

use axum::{extract::State, Json};
use fakecheck_core::{classify, PipelineOutput};
use serde::{Deserialize, Serialize};
use shared_types::VerdictReport;
use tracing::{debug, info, warn};

use crate::error::ServerError;
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub vocabulary_size: usize,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "fakecheck-api",
        version: env!("CARGO_PKG_VERSION"),
        vocabulary_size: state.pipeline.n_features(),
    })
}

/// Verification request. A missing or null `text` means nothing was submitted yet.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Verdict and per-classifier labels as display strings
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub pending: bool,
    pub verdict: String,
    pub naive_bayes: String,
    pub linear_svc: String,
    pub random_forest: String,
    pub lemma_count: usize,
    pub empty_input: bool,
}

impl VerifyResponse {
    fn from_report(report: &VerdictReport, lemma_count: usize, empty_input: bool) -> Self {
        let [verdict, naive_bayes, linear_svc, random_forest] = report.display_values();
        Self {
            success: true,
            pending: report.is_pending(),
            verdict,
            naive_bayes,
            linear_svc,
            random_forest,
            lemma_count,
            empty_input,
        }
    }

    pub fn pending() -> Self {
        Self::from_report(&VerdictReport::pending(), 0, false)
    }
}

impl From<&PipelineOutput> for VerifyResponse {
    fn from(output: &PipelineOutput) -> Self {
        Self::from_report(
            &output.prediction.report(),
            output.lemmas.len(),
            output.is_empty(),
        )
    }
}

/// Handler: POST /api/verify
pub async fn handle_verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ServerError> {
    let Some(text) = request.text else {
        debug!("No text submitted, returning placeholder report");
        return Ok(Json(VerifyResponse::pending()));
    };

    info!("Verifying article of {} chars", text.chars().count());
    let output = classify(Arc::clone(&state.pipeline), text, state.timeout_ms)
        .await
        .map_err(|e| {
            warn!("Verification failed: {}", e);
            ServerError::from(e)
        })?;

    let response = VerifyResponse::from(&output);
    info!(
        "Verdict: {} (nb={}, svc={}, rf={})",
        response.verdict, response.naive_bayes, response.linear_svc, response.random_forest
    );
    Ok(Json(response))
}

/// Handler: GET /api/verdict/pending
pub async fn handle_pending() -> Json<VerifyResponse> {
    Json(VerifyResponse::pending())
}
