//! Claude API client — the bounded generator call
//!
//! Exactly one attempt per request, raced against a deadline. There is no
//! retry loop because the caller always has a deterministic fallback ready;
//! a timed-out in-flight request is simply dropped.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GenerateError;
use crate::prompt::SYSTEM_PROMPT;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// API credential with a lifetime scoped to a single generator call.
/// Never logged, never serialized.
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Tuning for the generator call.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_tokens: i32,
    pub temperature: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            timeout_secs: 25,
            max_tokens: 4096,
            temperature: 0.3,
        }
    }
}

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: i32,
    temperature: f32,
    system: String,
    messages: Vec<ClaudeMessage>,
}

#[derive(Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

/// Claude Messages API client.
pub struct ClaudeClient {
    credential: Credential,
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl ClaudeClient {
    pub fn new(credential: Credential, config: GeneratorConfig) -> Self {
        // Client-level timeout backstops the explicit deadline below so a
        // stalled body read cannot outlive it either.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            credential,
            client,
            config,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.config.model
    }

    /// Send one generation request. Whichever of the HTTP call and the
    /// deadline resolves first wins; the loser is dropped.
    pub async fn invoke(&self, prompt: &str) -> Result<String, GenerateError> {
        let request_body = ClaudeRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let call = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", self.credential.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send();

        let response = tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), call)
            .await
            .map_err(|_| GenerateError::Timeout(self.config.timeout_secs))?
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout(self.config.timeout_secs)
                } else {
                    GenerateError::Upstream(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Upstream(format!(
                "Claude API error {status}: {body}"
            )));
        }

        let parsed: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Upstream(format!("unreadable response body: {e}")))?;

        let text = parsed
            .content
            .iter()
            .find(|block| block.content_type == "text" && !block.text.is_empty())
            .map(|block| block.text.clone())
            .ok_or(GenerateError::EmptyResponse)?;

        info!("model response received ({} chars)", text.len());
        Ok(text)
    }
}
