//! Secondary provider: OpenAI's chat-completions API.
//!
//! Single model (configurable via `OPENAI_MODEL`), tried only after the
//! primary provider is exhausted. No explicit timeout; the transport default
//! applies.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{
    classify_http_failure, extract_completion_text, ChatMessage, ChatProvider, CompletionRequest,
    ProviderError,
};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

// Low temperature: deterministic-ish analysis beats creative prose here.
const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    models: Vec<String>,
}

impl OpenAiProvider {
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            models: vec![model],
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn models(&self) -> &[String] {
        &self.models
    }

    async fn invoke(
        &self,
        call: &CompletionRequest,
        model: &str,
    ) -> Result<String, ProviderError> {
        let request_body = OpenAiRequest {
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
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
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
