//! Coaching interpreter — free-text interview questions or a resume rewrite.
//!
//! Degrades to locally synthesized content instead of failing: when the
//! orchestrator fell back to the keyword scorer, the score's weaknesses are
//! turned into the expected prose shape, and a malformed or truncated
//! question list from a remote model is regenerated locally.

use crate::analysis::prompts;
use crate::errors::AppError;
use crate::fallback::local_interview_questions;
use crate::llm_client::{CompletionOutcome, CompletionRequest, Orchestrator};

/// Which coaching output the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachingKind {
    InterviewQuestions,
    Suggestions,
}

impl CoachingKind {
    /// Maps the wire-level `type` field. Unknown values are the caller's
    /// error, not ours.
    pub fn from_request(value: &str) -> Option<Self> {
        match value {
            "interview_questions" => Some(CoachingKind::InterviewQuestions),
            "suggestions" => Some(CoachingKind::Suggestions),
            _ => None,
        }
    }
}

pub async fn coaching_text(
    orchestrator: &Orchestrator,
    kind: CoachingKind,
    resume: &str,
    job_desc: &str,
    missing_keywords: &[String],
) -> Result<String, AppError> {
    let user = match kind {
        CoachingKind::InterviewQuestions => {
            prompts::interview_questions_user_message(job_desc, resume)
        }
        CoachingKind::Suggestions => {
            prompts::suggestions_user_message(job_desc, resume, missing_keywords)
        }
    };
    let call = CompletionRequest {
        system: prompts::COACH_SYSTEM.to_string(),
        user,
        want_json: false,
    };

    let outcome = orchestrator.complete(&call).await?;
    Ok(interpret_coaching(kind, resume, job_desc, outcome))
}

/// Pure post-processing half of coaching, split out for tests.
fn interpret_coaching(
    kind: CoachingKind,
    resume: &str,
    job_desc: &str,
    outcome: CompletionOutcome,
) -> String {
    let text = match outcome {
        CompletionOutcome::RemoteText(text) => text,
        // Free text was wanted but the local scorer answered; synthesize the
        // expected shape from its structured output.
        CompletionOutcome::LocalScore(result) => match kind {
            CoachingKind::Suggestions => rewritten_resume(resume, &result.weaknesses),
            CoachingKind::InterviewQuestions => local_interview_questions(job_desc).join("\n"),
        },
    };

    // Safety net against a malformed or truncated remote answer.
    if kind == CoachingKind::InterviewQuestions && looks_insufficient(&text) {
        return local_interview_questions(job_desc).join("\n");
    }
    text
}

/// Appends up to eight missing keywords to the resume under a Skills heading,
/// or behind a marker comment when a skills section already exists.
fn rewritten_resume(resume: &str, weaknesses: &[String]) -> String {
    let missing: Vec<&str> = weaknesses.iter().take(8).map(String::as_str).collect();

    let mut rewritten = resume.to_string();
    if !missing.is_empty() {
        let list = missing.join("\n- ");
        if resume.to_lowercase().contains("skills") {
            rewritten.push_str(&format!(
                "\n\n// Add these keywords to your Skills or Experience section:\n- {list}"
            ));
        } else {
            rewritten.push_str(&format!("\n\nSkills:\n- {list}"));
        }
    }

    format!(
        "Here is a rewritten version of your resume with missing keywords added for better job match:\n\n{rewritten}"
    )
}

/// A usable question list has at least two numbered items or two non-blank
/// lines, and at least ten characters overall.
fn looks_insufficient(text: &str) -> bool {
    let cleaned = text.trim();
    if cleaned.len() < 10 {
        return true;
    }
    let numbered = numbered_item_count(cleaned);
    let lines = cleaned.lines().filter(|l| !l.trim().is_empty()).count();
    numbered < 2 && lines < 2
}

/// Counts `<digit>.` markers, the pattern the frontend splits questions on.
fn numbered_item_count(text: &str) -> usize {
    text.as_bytes()
        .windows(2)
        .filter(|w| w[0].is_ascii_digit() && w[1] == b'.')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::ScoreResult;

    fn local(weaknesses: &[&str]) -> CompletionOutcome {
        CompletionOutcome::LocalScore(ScoreResult {
            score: 20,
            strengths: vec![],
            weaknesses: weaknesses.iter().map(|w| w.to_string()).collect(),
        })
    }

    #[test]
    fn test_remote_suggestion_text_used_verbatim() {
        let text = interpret_coaching(
            CoachingKind::Suggestions,
            "resume",
            "job",
            CompletionOutcome::RemoteText("Here is my advice.".into()),
        );
        assert_eq!(text, "Here is my advice.");
    }

    #[test]
    fn test_fallback_rewrite_adds_skills_heading() {
        let text = interpret_coaching(
            CoachingKind::Suggestions,
            "Ten years of backend work.",
            "job",
            local(&["docker", "kubernetes"]),
        );
        assert!(text.starts_with("Here is a rewritten version of your resume"));
        assert!(text.contains("\n\nSkills:\n- docker\n- kubernetes"));
    }

    #[test]
    fn test_fallback_rewrite_marks_existing_skills_section() {
        let text = interpret_coaching(
            CoachingKind::Suggestions,
            "Skills: Rust, SQL",
            "job",
            local(&["docker"]),
        );
        assert!(text.contains("// Add these keywords to your Skills or Experience section:"));
        assert!(!text.contains("\n\nSkills:\n-"));
    }

    #[test]
    fn test_fallback_rewrite_caps_keywords_at_eight() {
        let weaknesses: Vec<String> = (0..12).map(|i| format!("kw{i}")).collect();
        let text = rewritten_resume("resume body", &weaknesses);
        assert!(text.contains("kw7"));
        assert!(!text.contains("kw8"));
    }

    #[test]
    fn test_fallback_rewrite_without_missing_keywords_keeps_resume() {
        let text = rewritten_resume("resume body", &[]);
        assert!(text.ends_with("resume body"));
    }

    #[test]
    fn test_fallback_questions_are_generated_locally() {
        let text = interpret_coaching(
            CoachingKind::InterviewQuestions,
            "resume",
            "Rust developer role",
            local(&[]),
        );
        assert!(text.contains("1. "));
        assert!(text.contains("experience with Rust?"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_insufficient_remote_questions_are_regenerated() {
        let text = interpret_coaching(
            CoachingKind::InterviewQuestions,
            "resume",
            "Kubernetes role",
            CompletionOutcome::RemoteText("ok".into()),
        );
        assert!(text.contains("experience with Kubernetes?"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_sufficient_remote_questions_kept() {
        let remote = "1. Why us?\n2. Why you?\n3. Tell me about a hard bug.";
        let text = interpret_coaching(
            CoachingKind::InterviewQuestions,
            "resume",
            "job",
            CompletionOutcome::RemoteText(remote.into()),
        );
        assert_eq!(text, remote);
    }

    #[test]
    fn test_looks_insufficient_boundaries() {
        assert!(looks_insufficient(""));
        assert!(looks_insufficient("too short"));
        assert!(looks_insufficient("a single unnumbered line of text"));
        assert!(!looks_insufficient("first line of questions\nsecond line"));
        assert!(!looks_insufficient("1. one question 2. two questions"));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(
            CoachingKind::from_request("interview_questions"),
            Some(CoachingKind::InterviewQuestions)
        );
        assert_eq!(
            CoachingKind::from_request("suggestions"),
            Some(CoachingKind::Suggestions)
        );
        assert_eq!(CoachingKind::from_request("other"), None);
    }
}
