//! Axum route handlers for the job posting endpoints.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::analysis::categorize::categorize_job_requirements;
use crate::errors::AppError;
use crate::jobs::JobPosting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub job_title: String,
    #[serde(default)]
    pub company: Option<String>,
    pub full_description: String,
}

/// POST /api/jobs
///
/// Stores a posting with AI-categorized keywords. Categorization never
/// blocks storage; it degrades to empty categories.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if request.job_title.trim().is_empty() || request.full_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job title and description are required.".to_string(),
        ));
    }

    let keywords =
        categorize_job_requirements(&state.orchestrator, &request.full_description).await;

    let posting = JobPosting {
        id: Uuid::new_v4(),
        job_title: request.job_title,
        company: request.company,
        full_description: request.full_description,
        keywords,
        created_at: Utc::now(),
    };
    state.jobs.insert(posting).await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Job posting added successfully with categorized keywords!"
        })),
    ))
}

/// GET /api/jobs
///
/// Lists stored postings, newest first.
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<JobPosting>> {
    Json(state.jobs.list().await)
}
