//! Gemini client backing the generative fallback.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::config::AiConfig;
use crate::dialogue::{Role, Turn};
use crate::knowledge::TrainingExample;

/// Connection timeout for HTTP requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of retries for transient failures.
const MAX_RETRIES: u32 = 3;

/// Build an HTTP client with the given overall timeout.
fn build_http_client(request_timeout: Duration) -> Result<Client, AiError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .build()
        .map_err(|e| AiError::RequestFailed(format!("failed to build HTTP client: {e}")))
}

/// Determine if a request should be retried based on status code and attempt count.
fn should_retry(status_code: u16, attempt: u32) -> bool {
    if attempt >= MAX_RETRIES {
        return false;
    }
    (500..600).contains(&status_code)
}

/// Calculate exponential backoff duration for retry attempts.
fn calculate_backoff(attempt: u32) -> Duration {
    // 1s, 2s, 4s
    Duration::from_secs(1 << attempt)
}

/// Coarse failure class of an external answerer call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswererFailure {
    ServiceUnavailable,
    ConfigurationMissing,
    MalformedResponse,
}

impl fmt::Display for AnswererFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ServiceUnavailable => "service_unavailable",
            Self::ConfigurationMissing => "configuration_missing",
            Self::MalformedResponse => "malformed_response",
        };
        f.write_str(name)
    }
}

/// Errors from AI client operations.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("API key not configured (env: {0})")]
    MissingApiKey(String),
    #[error("API request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("AI request timed out")]
    Timeout,
}

impl AiError {
    #[must_use]
    pub fn kind(&self) -> AnswererFailure {
        match self {
            Self::MissingApiKey(_) => AnswererFailure::ConfigurationMissing,
            Self::RequestFailed(_) | Self::Timeout => AnswererFailure::ServiceUnavailable,
            Self::ParseError(_) => AnswererFailure::MalformedResponse,
        }
    }
}

/// Produces a free-text reply for a conversation the local rules could not answer.
///
/// Implementations receive the transcript by shared reference and must not
/// retain or alter it.
#[async_trait]
pub trait ExternalAnswerer: Send + Sync {
    /// Generate a reply to the last user turn of `transcript`.
    async fn generate_reply(&self, transcript: &[Turn]) -> Result<String, AiError>;
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

impl<'a> Content<'a> {
    fn new(role: Role, text: &'a str) -> Self {
        let role = match role {
            Role::User => "user",
            Role::Model => "model",
        };
        Self {
            role,
            parts: [Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

/// Gemini `generateContent` answerer.
///
/// The API key may be absent at construction; each call then fails with
/// [`AiError::MissingApiKey`] and the engine falls back to its apology.
#[derive(Debug, Clone)]
pub struct GeminiAnswerer {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
    max_tokens: u32,
    few_shot: Vec<TrainingExample>,
}

impl GeminiAnswerer {
    /// Create an answerer from configuration and an already resolved key.
    ///
    /// # Errors
    ///
    /// Returns `AiError::RequestFailed` if the HTTP client cannot be built.
    pub fn new(config: &AiConfig, api_key: Option<String>) -> Result<Self, AiError> {
        Ok(Self {
            client: build_http_client(Duration::from_secs(config.timeout_secs))?,
            base_url: config.base_url.clone(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_key_env: config.api_key_env.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            few_shot: Vec::new(),
        })
    }

    /// Create an answerer reading the key from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns `AiError::RequestFailed` if the HTTP client cannot be built.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "API key not set, generative fallback will answer with an apology"
            );
        }
        Self::new(config, api_key)
    }

    /// Send `examples` as user/model pairs ahead of the conversation.
    #[must_use]
    pub fn with_few_shot(mut self, examples: Vec<TrainingExample>) -> Self {
        self.few_shot = examples;
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Outgoing contents: the system turn, the few-shot pairs, then the rest
    /// of the transcript.
    fn build_contents<'a>(&'a self, transcript: &'a [Turn]) -> Vec<Content<'a>> {
        let mut contents = Vec::with_capacity(transcript.len() + self.few_shot.len() * 2);
        let mut turns = transcript.iter();
        if let Some(system) = turns.next() {
            contents.push(Content::new(system.role, &system.text));
        }
        for example in &self.few_shot {
            contents.push(Content::new(Role::User, &example.prompt));
            contents.push(Content::new(Role::Model, &example.completion));
        }
        contents.extend(turns.map(|turn| Content::new(turn.role, &turn.text)));
        contents
    }
}

#[async_trait]
impl ExternalAnswerer for GeminiAnswerer {
    async fn generate_reply(&self, transcript: &[Turn]) -> Result<String, AiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::MissingApiKey(self.api_key_env.clone()))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let body = GenerateRequest {
            contents: self.build_contents(transcript),
            generation_config: GenerationConfig {
                max_output_tokens: self.max_tokens,
            },
        };

        let mut attempt = 0;
        loop {
            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", api_key)
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        AiError::Timeout
                    } else {
                        AiError::RequestFailed(e.to_string())
                    }
                })?;

            let status = response.status();
            if status.is_success() {
                let json: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|e| AiError::ParseError(e.to_string()))?;
                return extract_text(&json);
            }

            let status_code = status.as_u16();
            if should_retry(status_code, attempt) {
                let backoff = calculate_backoff(attempt);
                tracing::debug!(status = status_code, attempt, ?backoff, "Retrying Gemini request");
                tokio::time::sleep(backoff).await;
                attempt += 1;
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            return Err(AiError::RequestFailed(format!("HTTP {status}: {text}")));
        }
    }
}

/// Pull the first candidate's text out of a `generateContent` response.
fn extract_text(json: &serde_json::Value) -> Result<String, AiError> {
    json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| {
            let detail = json
                .get("error")
                .map_or_else(|| "no text in Gemini response".to_string(), ToString::to_string);
            AiError::ParseError(detail)
        })
}
