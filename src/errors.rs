use openai_api_rs::v1::error::APIError;
use thiserror::Error;

/// Coarse classification of an upstream LLM failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    RateLimited,
    Upstream,
    MalformedResponse,
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to access Discord API: {0}")]
    DiscordError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("LLM request failed: {message}")]
    LlmError { kind: LlmErrorKind, message: String },

    #[error("Failed to read PDF: {0}")]
    PdfError(String),

    #[error("LLM request timed out after {0} seconds")]
    Timeout(u64),
}

impl BotError {
    pub fn llm(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        BotError::LlmError {
            kind,
            message: message.into(),
        }
    }

    /// True when the failure should be reported to users as an exhausted quota.
    ///
    /// A structured `RateLimited` kind wins; otherwise the rendered message is
    /// searched for "quota" or "rate", which is all an unstructured upstream
    /// error gives us.
    #[must_use]
    pub fn is_quota_or_rate_limit(&self) -> bool {
        if let BotError::LlmError {
            kind: LlmErrorKind::RateLimited,
            ..
        } = self
        {
            return true;
        }
        let text = self.to_string().to_lowercase();
        text.contains("quota") || text.contains("rate")
    }
}

impl From<serenity::Error> for BotError {
    fn from(error: serenity::Error) -> Self {
        BotError::DiscordError(error.to_string())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.without_url().to_string())
    }
}

impl From<anyhow::Error> for BotError {
    fn from(error: anyhow::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<APIError> for BotError {
    fn from(error: APIError) -> Self {
        let message = format!("OpenAI API error: {}", error);
        let lowered = message.to_lowercase();
        let kind = if lowered.contains("429") || lowered.contains("rate limit") {
            LlmErrorKind::RateLimited
        } else {
            LlmErrorKind::Upstream
        };
        BotError::LlmError { kind, message }
    }
}
