#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::OrchestratorError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The AI's structured answer failed shape checks. A wrong or absent
    /// score is worse than an explicit failure for a user-facing metric.
    #[error("Invalid response format from AI: {0}")]
    InvalidAiResponse(String),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidAiResponse(msg) => {
                tracing::error!("AI response validation failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INVALID_AI_RESPONSE",
                    msg.clone(),
                )
            }
            AppError::Orchestrator(e) => {
                tracing::error!("AI provider error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI_PROVIDER_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
