//! Generative text collaborator
//!
//! Defines the narrow interface the pipeline uses to delegate text
//! generation, plus an HTTP client for OpenAI-compatible chat completion
//! endpoints. The service is optional everywhere it is consumed; callers
//! fall back to their deterministic paths when it is absent or fails.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::GenerativeConfig;
use crate::error::PlannerError;
use crate::Result;

/// A text-completion capability backed by a generative model.
///
/// Fails with `Unavailable`, `Timeout` or `InvalidResponse`; all callers
/// treat any of these as a signal to fall back.
#[async_trait]
pub trait GenerativeTextService: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String>;
}

/// Chat-completions client for OpenAI-compatible APIs
pub struct OpenAiChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiChatClient {
    /// Create a client from configuration; `None` when no API key is set
    #[must_use]
    pub fn from_config(config: &GenerativeConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("TripWeaver/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Some(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl GenerativeTextService for OpenAiChatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
            max_tokens,
        };

        debug!(model = %self.model, temperature, max_tokens, "requesting completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PlannerError::unavailable(format!(
                "completion API error {status}: {error_text}"
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::invalid_response(format!("malformed completion: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PlannerError::invalid_response("completion carried no content"))?;

        Ok(content.trim().to_string())
    }
}
