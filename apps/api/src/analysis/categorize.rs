//! Categorization interpreter — extracts typed requirement lists from a job
//! description. Never fails: a posting must stay storable even when
//! categorization degrades to the empty default.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::prompts;
use crate::llm_client::{strip_json_fences, CompletionOutcome, CompletionRequest, Orchestrator};

/// Typed requirement lists extracted from a job description.
///
/// All five categories are always present; a provider that omits or
/// mis-shapes one yields an empty list, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementCategories {
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub experience_years: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

pub async fn categorize_job_requirements(
    orchestrator: &Orchestrator,
    job_description: &str,
) -> RequirementCategories {
    let call = CompletionRequest {
        system: prompts::CATEGORIZE_SYSTEM.to_string(),
        user: prompts::categorize_user_message(job_description),
        want_json: true,
    };

    match orchestrator.complete(&call).await {
        Ok(outcome) => {
            let categories = interpret_categorization(outcome);
            info!("job requirement categorization finished");
            categories
        }
        Err(err) => {
            warn!(error = %err, "categorization unavailable, storing job with empty categories");
            RequirementCategories::default()
        }
    }
}

/// Pure post-processing half of categorization, split out for tests.
fn interpret_categorization(outcome: CompletionOutcome) -> RequirementCategories {
    match outcome {
        CompletionOutcome::RemoteText(text) => {
            serde_json::from_str(strip_json_fences(&text)).unwrap_or_else(|err| {
                warn!(error = %err, "provider returned non-JSON categorization, using defaults");
                RequirementCategories::default()
            })
        }
        // The keyword scorer cannot categorize; degrade rather than guess.
        CompletionOutcome::LocalScore(_) => RequirementCategories::default(),
    }
}
