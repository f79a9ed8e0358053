//! Error types for the fakecheck server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fakecheck_core::PipelineError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Lemmatization(String),

    #[error("Pipeline timeout after {0}ms")]
    Timeout(u64),

    #[error("{0}")]
    DimensionMismatch(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl ServerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::Lemmatization(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "LEMMATIZATION_FAILED")
            }
            ServerError::Timeout(_) => (StatusCode::REQUEST_TIMEOUT, "TIMEOUT"),
            ServerError::DimensionMismatch(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "FEATURE_DIMENSION_MISMATCH",
            ),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::NoInterpretation(_) => ServerError::Lemmatization(err.to_string()),
            PipelineError::Timeout(ms) => ServerError::Timeout(ms),
            PipelineError::DimensionMismatch { .. } => {
                ServerError::DimensionMismatch(err.to_string())
            }
            other => ServerError::Internal(other.to_string()),
        }
    }
}
