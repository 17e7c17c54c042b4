//! API error types with structured JSON responses.
//!
//! Body shapes are part of the wire contract: gate rejections carry a
//! machine-readable code plus a `details.reason` the client shows to the
//! user, internal errors surface their message since this serves a
//! prototype client that needs the detail for diagnosis.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::triage::TriageError;

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No symptoms provided")]
    EmptyInput,
    #[error("Unknown disease: {0}")]
    UnknownDisease(String),
    #[error("Insufficient symptom evidence: {reason}")]
    InsufficientEvidence { reason: String },
    #[error("Unsupported language: {detected}")]
    UnsupportedLanguage { detected: String },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::EmptyInput => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "No symptoms provided" }),
            ),
            ApiError::UnknownDisease(name) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Unknown disease: {name}") }),
            ),
            ApiError::InsufficientEvidence { reason } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "INSUFFICIENT_SYMPTOM_EVIDENCE",
                    "details": { "reason": reason },
                }),
            ),
            ApiError::UnsupportedLanguage { detected } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "UNSUPPORTED_LANGUAGE",
                    "details": { "detected": detected },
                }),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "INTERNAL_ERROR", "message": detail }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::InsufficientEvidence { reason } => {
                ApiError::InsufficientEvidence { reason }
            }
            TriageError::UnsupportedLanguage { detected } => {
                ApiError::UnsupportedLanguage { detected }
            }
            TriageError::Model(e) => ApiError::Internal(e.to_string()),
        }
    }
}
