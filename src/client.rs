//! Completion service adapter.
//!
//! Thin HTTP adapter over an OpenAI-compatible `chat/completions` endpoint.
//! Failures are surfaced, never interpreted or retried: network errors and
//! non-success statuses (where authentication failures and rate limits
//! arrive) become [`ClientError::Service`], and a 2xx body missing the
//! output text becomes [`ClientError::MalformedResponse`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::request::CompletionRequest;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors from the completion service adapter
#[derive(Debug, Error)]
pub enum ClientError {
    /// The network failed or the service rejected the request.
    #[error("Completion service error: {0}")]
    Service(String),

    /// The service answered but the body is missing expected fields.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Connection settings for one completion endpoint.
///
/// Passed in at construction so independent runs and tests can use
/// independent configurations; there is no process-wide client state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the chat completions endpoint.
    pub endpoint: String,
    /// Bearer token, if the endpoint requires one.
    pub api_key: Option<String>,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout: Duration,
}

/// What the service returned for one request.
#[derive(Debug, Clone)]
pub struct CompletionReply {
    /// The model's full output text.
    pub output_text: String,
    /// Usage counters as reported by the service, passed through opaquely.
    pub usage: serde_json::Value,
}

/// Anything that can answer a completion request.
///
/// The benchmark runner depends on this seam rather than on HTTP directly,
/// so tests can substitute stub services.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn send(&self, request: &CompletionRequest) -> ClientResult<CompletionReply>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// HTTP adapter for an OpenAI-compatible completion endpoint.
pub struct HttpClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Service(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl CompletionBackend for HttpClient {
    async fn send(&self, request: &CompletionRequest) -> ClientResult<CompletionReply> {
        let mut builder = self.http.post(&self.config.endpoint).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Service(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Service(format!(
                "Completion API error ({}): {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        extract_reply(chat_response)
    }
}

/// Pull the output text and usage counters out of a parsed response.
fn extract_reply(response: ChatResponse) -> ClientResult<CompletionReply> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::MalformedResponse("response has no choices".to_string()))?;

    let output_text = choice.message.content.ok_or_else(|| {
        ClientError::MalformedResponse("choice has no message content".to_string())
    })?;

    Ok(CompletionReply {
        output_text,
        usage: response.usage,
    })
}
