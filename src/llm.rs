//! Text-completion client for the agent loop.
//!
//! The agent treats the model as an opaque completion service: one prompt in,
//! one bounded completion out, generation halting at the first stop sequence.
//! `GeminiClient` talks to the Google `generateContent` endpoint; the
//! [`CompletionClient`] trait is the seam tests use to script completions.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Sampling temperature is pinned to zero: identical prompts must produce
/// identical completions for the loop to be reproducible.
const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// A stateless text-completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request exactly one completion for `prompt`, halting at the first
    /// occurrence of any stop sequence (the stop sequence itself is not
    /// included in the returned text).
    async fn generate(&self, prompt: &str, stop: &[String]) -> Result<String, LlmError>;
}

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn generate(&self, prompt: &str, stop: &[String]) -> Result<String, LlmError> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "candidateCount": 1,
                "stopSequences": stop,
                "maxOutputTokens": self.max_output_tokens,
                "temperature": TEMPERATURE,
            }
        });

        debug!(model = %self.model, prompt_len = prompt.len(), "Requesting completion");

        let response: GenerateResponse = self
            .client
            .post(self.request_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .flat_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or_else(|| LlmError::InvalidResponse("no text in candidates".to_string()))?;

        Ok(text)
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}
