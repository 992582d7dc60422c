//! Axum route handlers for the scoring and coaching endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::analysis::coaching::{coaching_text, CoachingKind};
use crate::analysis::scoring::score_resume_against_job;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume: String,
    #[serde(rename = "jobDesc")]
    pub job_desc: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub resume: String,
    #[serde(rename = "jobDesc")]
    pub job_desc: String,
    #[serde(rename = "missingKeywords", default)]
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub text: String,
}

/// POST /api/score
///
/// Scores a resume against a job description. Failures still carry the safe
/// default payload (score 0, empty lists) so the frontend can render a
/// degraded-but-valid state instead of an error page.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Response, AppError> {
    if request.resume.trim().is_empty() || request.job_desc.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume and Job Description are required.".to_string(),
        ));
    }

    match score_resume_against_job(&state.orchestrator, &request.resume, &request.job_desc).await {
        Ok(result) => Ok(Json(result).into_response()),
        Err(err) => {
            error!(error = %err, "resume scoring failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": "Unable to generate ATS score. Please try again.",
                    "error": err.to_string(),
                    "score": 0,
                    "strengths": [],
                    "weaknesses": []
                })),
            )
                .into_response())
        }
    }
}

/// POST /api/analyze
///
/// Returns coaching text: likely interview questions, or the resume
/// rewritten around missing keywords.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.resume.trim().is_empty() || request.job_desc.trim().is_empty() {
        return Err(AppError::Validation("Missing required fields.".to_string()));
    }
    let kind = CoachingKind::from_request(&request.kind)
        .ok_or_else(|| AppError::Validation("Invalid analysis type.".to_string()))?;

    let text = coaching_text(
        &state.orchestrator,
        kind,
        &request.resume,
        &request.job_desc,
        &request.missing_keywords,
    )
    .await?;

    debug!(
        preview = %text.chars().take(200).collect::<String>().replace('\n', " "),
        "analysis text ready"
    );

    Ok(Json(AnalyzeResponse { text }))
}
