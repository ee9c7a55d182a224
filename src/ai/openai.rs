//! OpenAI chat-completion backend
//!
//! The combined prompt is sent as a single user message; the conversation
//! structure already lives inside the text.

use async_trait::async_trait;
use openai_api_rs::v1::api::OpenAIClient;
use openai_api_rs::v1::chat_completion::{
    ChatCompletionMessage, ChatCompletionRequest, Content, MessageRole,
};
use tokio::sync::Mutex;
use tracing::info;

use super::client::{TextGenerator, estimate_tokens};
use crate::errors::{BotError, LlmErrorKind};

pub struct OpenAiClient {
    // chat_completion takes &mut self
    inner: Mutex<OpenAIClient>,
    model_name: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns an error if the OpenAI client cannot be constructed.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
    ) -> Result<Self, BotError> {
        let mut builder = OpenAIClient::builder().with_api_key(api_key);
        if let Some(org) = org_id {
            builder = builder.with_organization(org);
        }
        let client = builder.build().map_err(|e| {
            BotError::ConfigError(format!("Failed to create OpenAI client: {}", e))
        })?;

        Ok(Self {
            inner: Mutex::new(client),
            model_name,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn provider_name(&self) -> &str {
        "OpenAI"
    }

    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{}", prompt);

        info!(
            model = %self.model_name,
            estimated_tokens = estimate_tokens(prompt),
            "Sending prompt to OpenAI"
        );

        let chat_req = ChatCompletionRequest::new(
            self.model_name.clone(),
            vec![ChatCompletionMessage {
                role: MessageRole::user,
                content: Content::Text(prompt.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            }],
        );

        let result = self.inner.lock().await.chat_completion(chat_req).await?;

        result
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| BotError::llm(LlmErrorKind::MalformedResponse, "No text in response"))
    }
}
