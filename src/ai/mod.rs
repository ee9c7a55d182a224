//! All AI/LLM functionality

pub mod client;
pub mod openai;
pub mod prompt_builder;
pub mod summarize;

// Re-export main types for convenience
pub use client::{GeminiClient, TextGenerator, estimate_tokens};
pub use openai::OpenAiClient;
pub use prompt_builder::{ResponseStyle, build_prompt, is_simple_question};
pub use summarize::summarize_text;

use std::sync::Arc;

use crate::core::config::{AppConfig, LlmProvider};
use crate::errors::BotError;

/// Builds the backend selected in the config.
///
/// # Errors
///
/// Returns an error if the chosen client cannot be constructed.
pub fn llm_from_config(config: &AppConfig) -> Result<Arc<dyn TextGenerator>, BotError> {
    let client: Arc<dyn TextGenerator> = match &config.llm {
        LlmProvider::Gemini { api_key, model } => Arc::new(GeminiClient::new(
            api_key.clone(),
            model.clone(),
            config.llm_timeout,
        )?),
        LlmProvider::OpenAi {
            api_key,
            org_id,
            model,
        } => Arc::new(OpenAiClient::new(
            api_key.clone(),
            org_id.clone(),
            model.clone(),
        )?),
    };
    Ok(client)
}
