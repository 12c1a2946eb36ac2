use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ChatConfig;
use crate::models::chat::ChatMessage;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How far an upstream error detail is carried before truncation.
const ERROR_DETAIL_LIMIT: usize = 200;

/// Failure modes of a completion call, classified for the proxy.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no completion API credential configured")]
    MissingCredentials,
    #[error("authentication with the completion API failed")]
    Auth,
    #[error("completion API rate limit exceeded")]
    RateLimited,
    #[error("network error reaching the completion API")]
    Network,
    #[error("completion API error: {0}")]
    Api(String),
}

/// Boundary to the external completion API, swappable in tests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send an assembled message list and return the top completion text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError>;
}

/// OpenAI-compatible chat-completions client.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(cfg: &ChatConfig, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let url = format!("{}{CHAT_COMPLETIONS_PATH}", self.api_base);
        let body = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &detail));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Api(format!("malformed completion response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        let content = content.trim();

        if content.is_empty() {
            return Err(ChatError::Api("completion response contained no text".into()));
        }
        Ok(content.to_string())
    }
}

fn classify_transport_error(err: reqwest::Error) -> ChatError {
    if err.is_connect() || err.is_timeout() {
        ChatError::Network
    } else {
        ChatError::Api(err.to_string())
    }
}

fn classify_status(status: StatusCode, detail: &str) -> ChatError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ChatError::Auth,
        StatusCode::TOO_MANY_REQUESTS => ChatError::RateLimited,
        _ => {
            let detail: String = detail.chars().take(ERROR_DETAIL_LIMIT).collect();
            ChatError::Api(format!("{status}: {detail}"))
        }
    }
}
