//! LLM (Gemini) API client module
//!
//! Defines the `TextGenerator` seam the dispatcher talks to and the default
//! Gemini implementation over plain reqwest.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{BotError, LlmErrorKind};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Anything that turns one prompt blob into one reply blob.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable backend name used in user-facing error notices.
    fn provider_name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, BotError>;
}

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(api_key: String, model_name: String, timeout: Duration) -> Result<Self, BotError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            BotError::HttpError(format!("Failed to build Gemini HTTP client: {e}"))
        })?;
        Ok(Self {
            http,
            api_key,
            model_name,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Points the client at another endpoint root, e.g. a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model_name)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn provider_name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt);

        info!(
            model = %self.model_name,
            estimated_tokens = estimate_tokens(prompt),
            "Sending prompt to Gemini"
        );

        let request_body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            // the endpoint path contains "generate", which would trip quota sniffing
            .map_err(|e| {
                BotError::HttpError(format!("Gemini API request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!(
                    "Failed to read error response body (status {status}): {}",
                    e.without_url()
                )
            });
            let kind = if status == StatusCode::TOO_MANY_REQUESTS {
                LlmErrorKind::RateLimited
            } else {
                LlmErrorKind::Upstream
            };
            return Err(BotError::llm(
                kind,
                format!("Gemini API {status}: {error_text}"),
            ));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            BotError::llm(
                LlmErrorKind::MalformedResponse,
                format!("Failed to parse Gemini response: {}", e.without_url()),
            )
        })?;

        let text = extract_candidate_text(&response_json).ok_or_else(|| {
            BotError::llm(LlmErrorKind::MalformedResponse, "No text in response")
        })?;
        debug!(chars = text.chars().count(), "Received Gemini reply");
        Ok(text)
    }
}

/// Joins the text parts of the first candidate, if it has any.
#[must_use]
pub fn extract_candidate_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let collected: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    if collected.is_empty() {
        None
    } else {
        Some(collected.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_candidate_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hello " }, { "text": "there" }] }
            }]
        });
        assert_eq!(extract_candidate_text(&body).as_deref(), Some("Hello there"));
    }

    #[test]
    fn test_extract_candidate_text_blocked_prompt() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(extract_candidate_text(&body), None);
    }
}
