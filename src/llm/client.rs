use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use tracing::debug;

/// Seam between the relay endpoint and the completion provider. The caller
/// validates the message before delegating; the credential travels with each
/// call.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, api_key: &str, message: &str) -> Result<String>;
}

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
            model: config.model,
            system_prompt: config.system_prompt,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    fn build_request(&self, message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: message.to_string(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    /// Performs exactly one exchange with the provider and classifies the
    /// outcome. Failures become `Error::Upstream` values here and are never
    /// propagated as raw transport or decode errors.
    async fn complete(&self, api_key: &str, message: &str) -> Result<String> {
        let request = self.build_request(message);
        let url = format!("{}/v1/chat/completions", self.base_url);

        debug!("Sending completion request ({} bytes) to {}", message.len(), url);

        let response = match self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(_) => return Err(Error::upstream("Failed to connect to OpenAI API")),
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(_) => return Err(Error::upstream("Failed to connect to OpenAI API")),
        };

        let body: ChatCompletionResponse = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) => return Err(Error::upstream("Failed to parse OpenAI API response")),
        };

        if status != reqwest::StatusCode::OK {
            let reason = body
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| "OpenAI API error".to_string());
            return Err(Error::Upstream(reason));
        }

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| Error::upstream("Invalid response from OpenAI API"))
    }
}
