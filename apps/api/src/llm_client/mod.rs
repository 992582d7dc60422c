//! AI orchestration — the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: no other module may call a provider API directly.
//! All remote AI interactions MUST go through [`Orchestrator::complete`].
//!
//! Providers are tried in priority order (OpenRouter, then OpenAI), each
//! model within a provider in its configured order. The first success wins.
//! Rate limits and missing-model errors abandon the whole provider; anything
//! else just skips to the next model. When everything is exhausted the local
//! keyword scorer answers, if enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::fallback::{extract_scoring_sections, keyword_score, ScoreResult};

pub mod openai;
pub mod openrouter;

/// A single provider-agnostic chat-completion call. Stateless, single-use,
/// never mutated.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    /// Ask the provider for a machine-parseable JSON object instead of prose.
    pub want_json: bool,
}

/// What the orchestrator produced. Interpreters match on the tag instead of
/// probing the text for a score-shaped object.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    /// Text from a remote provider, verbatim.
    RemoteText(String),
    /// The local keyword scorer answered because no remote provider could.
    LocalScore(ScoreResult),
}

/// Failure of one provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider rate limited: {0}")]
    RateLimited(String),

    #[error("no compatible model: {0}")]
    ModelUnavailable(String),

    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("provider call timed out")]
    Timeout,

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl ProviderError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Http {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("All AI providers failed. Check OPENROUTER_API_KEY or OPENAI_API_KEY.")]
    AllProvidersExhausted,
}

/// How the orchestrator reacts to a failed provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Try the provider's next model.
    NextModel,
    /// Abandon this provider entirely; the condition is provider-wide.
    NextProvider,
}

/// The fallthrough policy, kept as one pure function so it is testable apart
/// from the retry loop. A rate limit or a missing-model error applies to the
/// whole provider, not just the model that surfaced it.
pub fn disposition(error: &ProviderError) -> Disposition {
    match error {
        ProviderError::RateLimited(_) | ProviderError::ModelUnavailable(_) => {
            Disposition::NextProvider
        }
        ProviderError::Http { .. } | ProviderError::Timeout | ProviderError::Malformed(_) => {
            Disposition::NextModel
        }
    }
}

/// One remote chat-completion backend. Adapters translate the
/// provider-agnostic [`CompletionRequest`] into their wire format and pull
/// the assistant text back out of the response envelope.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Models to try, in priority order.
    fn models(&self) -> &[String];

    async fn invoke(&self, call: &CompletionRequest, model: &str)
        -> Result<String, ProviderError>;
}

/// Tiered, credential-gated provider fallthrough. Built once at startup and
/// read-only afterwards.
pub struct Orchestrator {
    providers: Vec<Box<dyn ChatProvider>>,
    allow_local_scoring: bool,
}

impl Orchestrator {
    /// Builds the priority-ordered provider list from startup configuration.
    /// A provider whose credential is absent is simply not registered.
    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::new();

        let mut providers: Vec<Box<dyn ChatProvider>> = Vec::new();
        if let Some(key) = &config.openrouter_api_key {
            providers.push(Box::new(openrouter::OpenRouterProvider::new(
                client.clone(),
                key.clone(),
                config.port,
            )));
        }
        if let Some(key) = &config.openai_api_key {
            providers.push(Box::new(openai::OpenAiProvider::new(
                client,
                key.clone(),
                config.openai_model.clone(),
            )));
        }

        Self::new(providers, config.allow_local_scoring)
    }

    pub fn new(providers: Vec<Box<dyn ChatProvider>>, allow_local_scoring: bool) -> Self {
        Self {
            providers,
            allow_local_scoring,
        }
    }

    /// Tries every configured (provider, model) pair in priority order and
    /// returns the first successful completion.
    ///
    /// With local scoring enabled this never fails: the user message is split
    /// back into its job-description and resume sections and the keyword
    /// scorer produces a last-resort answer.
    pub async fn complete(
        &self,
        call: &CompletionRequest,
    ) -> Result<CompletionOutcome, OrchestratorError> {
        for provider in &self.providers {
            'models: for model in provider.models() {
                match provider.invoke(call, model).await {
                    Ok(text) => {
                        debug!(provider = provider.name(), model = %model, "completion succeeded");
                        return Ok(CompletionOutcome::RemoteText(text));
                    }
                    Err(err) => {
                        warn!(
                            provider = provider.name(),
                            model = %model,
                            error = %err,
                            "provider call failed"
                        );
                        match disposition(&err) {
                            Disposition::NextModel => continue,
                            Disposition::NextProvider => break 'models,
                        }
                    }
                }
            }
        }

        if self.allow_local_scoring {
            warn!("no remote AI provider available, using the local keyword scorer");
            let (job_desc, resume) = extract_scoring_sections(&call.user);
            return Ok(CompletionOutcome::LocalScore(keyword_score(
                &resume, &job_desc,
            )));
        }

        Err(OrchestratorError::AllProvidersExhausted)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared wire envelope handling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionEnvelope {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
    /// Legacy completions shape some backends still emit.
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pulls the assistant text out of a chat-completion envelope. A success
/// response that does not match the expected shape is returned verbatim
/// rather than treated as an error.
pub(crate) fn extract_completion_text(body: String) -> String {
    let Ok(envelope) = serde_json::from_str::<ChatCompletionEnvelope>(&body) else {
        return body;
    };
    let text = envelope.choices.first().and_then(|choice| {
        choice
            .message
            .as_ref()
            .and_then(|m| m.content.clone())
            .or_else(|| choice.text.clone())
    });
    text.unwrap_or(body)
}

/// Maps a non-success provider response to a [`ProviderError`].
///
/// 429 is authoritative; beyond that the human-readable error message is
/// probed for the provider-wide conditions. That is brittle, but it is the
/// only signal these providers expose, and the provider-wide skip is the
/// contract that matters.
pub(crate) fn classify_http_failure(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP {status}"));

    let lowered = message.to_lowercase();
    if status == 429 || lowered.contains("rate limit") {
        ProviderError::RateLimited(message)
    } else if lowered.contains("no endpoints found") || lowered.contains("no compatible model") {
        ProviderError::ModelUnavailable(message)
    } else {
        ProviderError::Http { status, message }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
