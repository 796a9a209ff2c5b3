//! Benchmark configuration.
//!
//! Model identity, credentials, and endpoint come from the environment with
//! `PREDBENCH_*` overrides; the CLI layers its flags on top. The resolved
//! configuration is handed to the client adapter at construction, so
//! independent runs and tests never share mutable state.

use std::time::Duration;

use crate::client::ClientConfig;

/// Default chat completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model. Must be one that supports predicted outputs.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default edit instruction, matching the shipped fixture modules.
pub const DEFAULT_INSTRUCTION: &str = "Add basic logging only to the `process_orders` function:\n\
- Use the standard `logging` module.\n\
- Log before processing orders and after computing the summary.\n\
- Do not change behavior of any other functions.";

/// Top-level benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Full URL of the chat completions endpoint.
    pub endpoint: String,
    /// Completion model to target.
    pub model: String,
    /// Bearer token for the service, if any.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            endpoint: std::env::var("PREDBENCH_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            model: std::env::var("PREDBENCH_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key: std::env::var("PREDBENCH_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .ok(),
            timeout_secs: std::env::var("PREDBENCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120),
        }
    }
}

impl BenchConfig {
    /// Client settings for this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
