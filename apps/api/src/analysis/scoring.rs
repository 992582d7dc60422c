//! Scoring interpreter — resume-vs-job match assessment with validation.
//!
//! Unlike categorization, a malformed AI answer here is surfaced to the
//! caller instead of silently degraded; the endpoint layer renders it with a
//! safe default payload.

use serde_json::Value;
use tracing::info;

use crate::analysis::prompts;
use crate::errors::AppError;
use crate::fallback::ScoreResult;
use crate::llm_client::{strip_json_fences, CompletionOutcome, CompletionRequest, Orchestrator};

pub async fn score_resume_against_job(
    orchestrator: &Orchestrator,
    resume: &str,
    job_desc: &str,
) -> Result<ScoreResult, AppError> {
    let call = CompletionRequest {
        system: prompts::SCORE_SYSTEM.to_string(),
        user: prompts::scoring_user_message(job_desc, resume),
        want_json: true,
    };

    let outcome = orchestrator.complete(&call).await?;
    let result = interpret_score(outcome)?;
    info!(score = result.score, "resume scoring finished");
    Ok(result)
}

/// Validates and repairs a provider score payload: `score` must be numeric,
/// `strengths`/`weaknesses` must be arrays. Valid shapes are clamped to
/// [0, 100] and the lists filtered to at most three non-empty trimmed
/// strings.
fn interpret_score(outcome: CompletionOutcome) -> Result<ScoreResult, AppError> {
    let text = match outcome {
        // The local scorer upholds the invariants by construction.
        CompletionOutcome::LocalScore(result) => return Ok(result),
        CompletionOutcome::RemoteText(text) => text,
    };

    let parsed: Value = serde_json::from_str(strip_json_fences(&text))
        .map_err(|e| AppError::InvalidAiResponse(format!("not a JSON object: {e}")))?;

    let score = parsed
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| AppError::InvalidAiResponse("\"score\" is not a number".to_string()))?;
    let strengths = parsed
        .get("strengths")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::InvalidAiResponse("\"strengths\" is not an array".to_string()))?;
    let weaknesses = parsed
        .get("weaknesses")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::InvalidAiResponse("\"weaknesses\" is not an array".to_string()))?;

    Ok(ScoreResult {
        score: score.clamp(0.0, 100.0).round() as u32,
        strengths: clean_entries(strengths),
        weaknesses: clean_entries(weaknesses),
    })
}

/// Keeps only non-empty trimmed strings, at most three.
fn clean_entries(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(text: &str) -> CompletionOutcome {
        CompletionOutcome::RemoteText(text.to_string())
    }

    #[test]
    fn test_valid_payload_passes_through() {
        let result = interpret_score(remote(
            r#"{"score": 72, "strengths": ["Rust", "Docker"], "weaknesses": ["Kubernetes"]}"#,
        ))
        .unwrap();
        assert_eq!(result.score, 72);
        assert_eq!(result.strengths, vec!["Rust", "Docker"]);
        assert_eq!(result.weaknesses, vec!["Kubernetes"]);
    }

    #[test]
    fn test_score_clamped_to_range() {
        let high = interpret_score(remote(
            r#"{"score": 250, "strengths": [], "weaknesses": []}"#,
        ))
        .unwrap();
        assert_eq!(high.score, 100);

        let low = interpret_score(remote(
            r#"{"score": -10, "strengths": [], "weaknesses": []}"#,
        ))
        .unwrap();
        assert_eq!(low.score, 0);
    }

    #[test]
    fn test_lists_filtered_and_truncated() {
        let result = interpret_score(remote(
            r#"{"score": 50,
                "strengths": ["  a  ", "", "   ", "b", 7, "c", "d"],
                "weaknesses": ["x"]}"#,
        ))
        .unwrap();
        assert_eq!(result.strengths, vec!["a", "b", "c"]);
        assert_eq!(result.weaknesses, vec!["x"]);
    }

    #[test]
    fn test_non_json_is_a_validation_error() {
        let err = interpret_score(remote("Sorry, I cannot help with that.")).unwrap_err();
        assert!(matches!(err, AppError::InvalidAiResponse(_)));
    }

    #[test]
    fn test_non_numeric_score_is_a_validation_error() {
        let err = interpret_score(remote(
            r#"{"score": "high", "strengths": [], "weaknesses": []}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidAiResponse(_)));
    }

    #[test]
    fn test_missing_lists_are_a_validation_error() {
        let err = interpret_score(remote(r#"{"score": 40}"#)).unwrap_err();
        assert!(matches!(err, AppError::InvalidAiResponse(_)));
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let result = interpret_score(remote(
            "```json\n{\"score\": 33, \"strengths\": [], \"weaknesses\": []}\n```",
        ))
        .unwrap();
        assert_eq!(result.score, 33);
    }

    #[test]
    fn test_local_score_passes_through_untouched() {
        let local = ScoreResult {
            score: 50,
            strengths: vec!["python".into()],
            weaknesses: vec!["docker".into()],
        };
        let result = interpret_score(CompletionOutcome::LocalScore(local.clone())).unwrap();
        assert_eq!(result, local);
    }
}
