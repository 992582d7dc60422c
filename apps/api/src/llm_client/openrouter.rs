//! Primary provider: OpenRouter's chat-completions API.
//!
//! Multi-model: the free-tier model list is tried in order by the
//! orchestrator. Calls carry a fixed 15 second timeout so a slow model
//! cannot stall the whole fallthrough chain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};

use super::{
    classify_http_failure, extract_completion_text, ChatMessage, ChatProvider, CompletionRequest,
    ProviderError,
};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Free models, in priority order. Not all of them are reliably available;
/// the orchestrator's fallthrough handles the ones that are not.
const MODELS: [&str; 3] = [
    "mistralai/mistral-7b-instruct",
    "anthropic/claude-2",
    "meta-llama/codellama-34b-instruct",
];

#[derive(Debug, Serialize)]
struct OpenRouterRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

pub struct OpenRouterProvider {
    client: Client,
    api_key: String,
    models: Vec<String>,
    referer: String,
}

impl OpenRouterProvider {
    pub fn new(client: Client, api_key: String, port: u16) -> Self {
        Self {
            client,
            api_key,
            models: MODELS.iter().map(|m| m.to_string()).collect(),
            referer: format!("http://localhost:{port}"),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    fn models(&self) -> &[String] {
        &self.models
    }

    async fn invoke(
        &self,
        call: &CompletionRequest,
        model: &str,
    ) -> Result<String, ProviderError> {
        let request_body = OpenRouterRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &call.system,
                },
                ChatMessage {
                    role: "user",
                    content: &call.user,
                },
            ],
            response_format: call.want_json.then(|| json!({ "type": "json_object" })),
        };

        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", "Resume Architect")
            .timeout(CALL_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(ProviderError::from_transport)?;

        if !status.is_success() {
            return Err(classify_http_failure(status.as_u16(), &body));
        }

        Ok(extract_completion_text(body))
    }
}
