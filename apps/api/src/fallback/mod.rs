//! Local fallback — the deterministic keyword-overlap scorer used when no
//! remote AI provider can answer, plus the locally synthesized interview
//! questions that keep the analyze endpoint useful offline.
//!
//! Everything in this module is pure: no I/O, no failure modes.

use serde::{Deserialize, Serialize};

/// Structured match assessment between a resume and a job description.
///
/// Invariants: `score` is always within [0, 100]; `strengths` and
/// `weaknesses` hold at most three non-empty trimmed strings each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Crude overlap-based match score.
///
/// Algorithm:
/// 1. Normalize both texts to lowercase alphanumeric-plus-space.
/// 2. Job-description tokens longer than 3 characters, deduplicated in
///    first-seen order, form the requirement keyword set.
/// 3. A keyword matches when it appears as a substring of the normalized
///    resume. `score = round(100 * matched / total)`, clamped to [0, 100].
/// 4. First three matched keywords become strengths, first three unmatched
///    become weaknesses.
pub fn keyword_score(resume: &str, job_desc: &str) -> ScoreResult {
    let jd_norm = normalize(job_desc);
    let resume_norm = normalize(resume);

    let mut keywords: Vec<&str> = Vec::new();
    for token in jd_norm.split_whitespace() {
        if token.len() > 3 && !keywords.contains(&token) {
            keywords.push(token);
        }
    }

    if keywords.is_empty() {
        return ScoreResult {
            score: 0,
            strengths: vec![],
            weaknesses: vec![],
        };
    }

    let (matched, unmatched): (Vec<&str>, Vec<&str>) = keywords
        .iter()
        .copied()
        .partition(|k| resume_norm.contains(*k));

    let score = ((matched.len() as f64 / keywords.len() as f64) * 100.0).round() as u32;

    ScoreResult {
        score: score.min(100),
        strengths: matched.iter().take(3).map(|s| s.to_string()).collect(),
        weaknesses: unmatched.iter().take(3).map(|s| s.to_string()).collect(),
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

const JOB_MARKER: &str = "JOB DESCRIPTION:";
const RESUME_MARKER: &str = "RESUME TEXT:";

/// Splits a scoring prompt back into its job-description and resume sections.
///
/// Scoring prompts follow the fixed `JOB DESCRIPTION:` / `RESUME TEXT:`
/// layout; anything else yields empty strings rather than an error.
pub fn extract_scoring_sections(user_message: &str) -> (String, String) {
    let job_desc = user_message
        .find(JOB_MARKER)
        .and_then(|start| {
            let rest = &user_message[start + JOB_MARKER.len()..];
            rest.find(RESUME_MARKER)
                .map(|end| rest[..end].trim().to_string())
        })
        .unwrap_or_default();

    let resume = user_message
        .find(RESUME_MARKER)
        .map(|start| user_message[start + RESUME_MARKER.len()..].trim().to_string())
        .unwrap_or_default();

    (job_desc, resume)
}

const GENERIC_QUESTIONS: [&str; 5] = [
    "Can you describe your experience related to this job?",
    "What interests you about this position?",
    "How have you demonstrated skills relevant to this job?",
    "What challenges do you expect in this role?",
    "How do you stay updated with industry trends?",
];

/// Generates exactly five numbered interview questions from a job
/// description. Keyword-specific questions come first; generic questions
/// fill whatever slots remain.
pub fn local_interview_questions(job_desc: &str) -> Vec<String> {
    let mut questions: Vec<String> = job_keywords(job_desc)
        .into_iter()
        .take(5)
        .map(|kw| format!("Can you discuss your experience with {kw}?"))
        .collect();
    questions.extend(GENERIC_QUESTIONS.iter().map(|q| q.to_string()));

    // Numbered so the frontend's splitting regex recognizes them reliably.
    questions
        .into_iter()
        .take(5)
        .enumerate()
        .map(|(i, q)| format!("{}. {q}", i + 1))
        .collect()
}

/// Tokens of length >= 3 that start with a letter. `-` and `+` stay part of
/// a token so terms like "C++" and "CI-CD" survive extraction.
fn job_keywords(job_desc: &str) -> Vec<String> {
    let mut keywords = Vec::new();
    let mut current = String::new();
    for c in job_desc.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '+' {
            current.push(c);
        } else {
            flush_keyword(&mut keywords, &mut current);
        }
    }
    flush_keyword(&mut keywords, &mut current);
    keywords
}

fn flush_keyword(keywords: &mut Vec<String>, current: &mut String) {
    let starts_with_letter = current
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic());
    if current.len() >= 3 && starts_with_letter {
        keywords.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_overlap_scores_fifty() {
        let jd = "Looking for a Python developer with Docker experience.";
        let resume = "Experienced Python engineer, used Docker daily.";
        // Keywords: looking, python, developer, with, docker, experience.
        // Matched: python, docker, experience ("experienced" contains it).
        let result = keyword_score(resume, jd);
        assert_eq!(result.score, 50);
        assert_eq!(result.strengths, vec!["python", "docker", "experience"]);
        assert_eq!(result.weaknesses, vec!["looking", "developer", "with"]);
    }

    #[test]
    fn test_no_qualifying_keywords_scores_zero() {
        let result = keyword_score("anything at all", "a to the an of it");
        assert_eq!(
            result,
            ScoreResult {
                score: 0,
                strengths: vec![],
                weaknesses: vec![]
            }
        );
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        let result = keyword_score("resume text", "");
        assert_eq!(result.score, 0);
        assert!(result.strengths.is_empty());
        assert!(result.weaknesses.is_empty());
    }

    #[test]
    fn test_full_overlap_scores_hundred() {
        let result = keyword_score("rust tokio axum", "rust tokio axum");
        assert_eq!(result.score, 100);
        assert!(result.weaknesses.is_empty());
    }

    #[test]
    fn test_keywords_deduplicated_in_first_seen_order() {
        // "docker" appears twice but must count once.
        let result = keyword_score("", "docker kubernetes docker");
        assert_eq!(result.score, 0);
        assert_eq!(result.weaknesses, vec!["docker", "kubernetes"]);
    }

    #[test]
    fn test_punctuation_normalized_away() {
        let result = keyword_score("Rust!", "rust, (rust)");
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_strengths_and_weaknesses_capped_at_three() {
        let jd = "alpha bravo charlie delta echo foxtrot golf hotel";
        let matched = keyword_score(jd, jd);
        assert_eq!(matched.strengths.len(), 3);
        let unmatched = keyword_score("", jd);
        assert_eq!(unmatched.weaknesses.len(), 3);
    }

    #[test]
    fn test_extract_scoring_sections_round_trip() {
        let message = "JOB DESCRIPTION:\nSenior Rust engineer\n\nRESUME TEXT:\nTen years of systems work";
        let (job_desc, resume) = extract_scoring_sections(message);
        assert_eq!(job_desc, "Senior Rust engineer");
        assert_eq!(resume, "Ten years of systems work");
    }

    #[test]
    fn test_extract_scoring_sections_missing_markers() {
        let (job_desc, resume) = extract_scoring_sections("free-form prompt");
        assert_eq!(job_desc, "");
        assert_eq!(resume, "");
    }

    #[test]
    fn test_interview_questions_include_job_keywords() {
        let questions = local_interview_questions("We use React and Kubernetes heavily.");
        assert_eq!(questions.len(), 5);
        assert!(questions
            .iter()
            .any(|q| q.ends_with("experience with React?")));
        assert!(questions
            .iter()
            .any(|q| q.ends_with("experience with Kubernetes?")));
        for (i, q) in questions.iter().enumerate() {
            assert!(q.starts_with(&format!("{}. ", i + 1)), "not numbered: {q}");
        }
    }

    #[test]
    fn test_interview_questions_fall_back_to_generic() {
        let questions = local_interview_questions("");
        assert_eq!(questions.len(), 5);
        assert_eq!(
            questions[0],
            "1. Can you describe your experience related to this job?"
        );
    }

    #[test]
    fn test_job_keywords_skip_short_and_numeric_tokens() {
        let keywords = job_keywords("Go 42 C++ is ok 7zip");
        // "Go" and "is"/"ok" too short, "42" and "7zip" start with a digit.
        assert_eq!(keywords, vec!["C++"]);
    }
}
