//! Builder-model client shim.
//!
//! The builder agent is reached through an OpenAI-compatible endpoint (a
//! local CLI bridge by default, hence the placeholder api key). This module
//! holds configuration plus a single non-streaming chat call.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::ModelConfig;
use crate::error::AppdockError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for the configured OpenAI-compatible model endpoint.
#[derive(Debug, Clone)]
pub struct ModelClient {
    client: reqwest::Client,
    completions_url: Url,
    api_key: String,
    model: String,
}

impl ModelClient {
    pub fn new(cfg: &ModelConfig) -> Result<Self, AppdockError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(10 * 60))
            .build()?;

        // Url::join would drop the version segment of a base like
        // `http://localhost:8000/v1`, so append textually.
        let completions_url = Url::parse(&format!(
            "{}/chat/completions",
            cfg.base_url.as_str().trim_end_matches('/')
        ))?;

        Ok(Self {
            client,
            completions_url,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
        })
    }

    /// Model identifier this client requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Fires one non-streaming chat completion and returns the assistant
    /// message content.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, AppdockError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let resp = self
            .client
            .post(self.completions_url.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AppdockError::ModelError(format!(
                "chat completion returned status {}",
                resp.status()
            )));
        }

        let completion: ChatCompletionResponse = resp.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppdockError::ModelError("chat completion had no choices".to_string()))
    }
}
