//! Decides whether an incoming message gets an answer and produces it.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::{
    IMAGE_GENERATION_HISTORY_NOTE, IMAGE_GENERATION_UNSUPPORTED, PDF_EXTRACTION_FAILED,
    PDF_SUMMARY_FAILED,
};
use crate::ai::{ResponseStyle, TextGenerator, build_prompt, summarize_text};
use crate::conversation::{Conversation, HistoryScope, HistoryStore};
use crate::core::models::{Attachment, AttachmentKind, DispatchOutcome, IncomingMessage, Turn};
use crate::documents::{PdfParser, extract_text_from_pdf};
use crate::errors::BotError;
use crate::utils::{
    MAX_CHUNK, classify_attachment, is_image_generation_request, split_message, strip_mention,
};

const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// The channel a message arrived on, as seen by the dispatcher.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), BotError>;

    async fn download(&self, attachment: &Attachment) -> Result<Vec<u8>, BotError>;

    async fn start_typing(&self) -> Result<(), BotError> {
        Ok(())
    }
}

enum TurnResult {
    Refused,
    Answered { reply: String, style: ResponseStyle },
    Failed(BotError),
}

pub struct Dispatcher {
    llm: Arc<dyn TextGenerator>,
    pdf_parser: Arc<dyn PdfParser>,
    history: Arc<HistoryStore>,
    scope: HistoryScope,
    llm_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        llm: Arc<dyn TextGenerator>,
        pdf_parser: Arc<dyn PdfParser>,
        history: Arc<HistoryStore>,
        scope: HistoryScope,
    ) -> Self {
        Self {
            llm,
            pdf_parser,
            history,
            scope,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = timeout;
        self
    }

    #[must_use]
    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// Handles one incoming message end to end. Failures are reported to the
    /// channel and logged; they never escape this call.
    pub async fn handle(
        &self,
        channel: &dyn ReplyChannel,
        msg: &IncomingMessage,
    ) -> DispatchOutcome {
        let span = info_span!(
            "dispatch",
            correlation_id = %Uuid::new_v4(),
            author_id = msg.author_id,
            channel_id = msg.channel_id,
        );
        let outcome = self.dispatch(channel, msg).instrument(span.clone()).await;
        span.in_scope(|| debug!(?outcome, "Message handled"));
        outcome
    }

    async fn dispatch(&self, channel: &dyn ReplyChannel, msg: &IncomingMessage) -> DispatchOutcome {
        if msg.author_is_bot {
            return DispatchOutcome::Ignored;
        }

        let mut prompt = msg.content.trim().to_string();
        let mut should_process = false;

        if msg.mentions_bot {
            prompt = strip_mention(&prompt, msg.bot_user_id);
            should_process = true;
        } else if msg.replied_to_bot {
            should_process = true;
        }

        // Only the first PDF or image attachment is acted on.
        let mut pdf_summary = None;
        for attachment in &msg.attachments {
            match classify_attachment(&attachment.filename) {
                AttachmentKind::Pdf => {
                    if !should_process || prompt.is_empty() {
                        debug!(filename = %attachment.filename, "Skipping PDF on a message that will not be answered");
                        return DispatchOutcome::Dropped;
                    }
                    match self.summarize_pdf(channel, attachment).await {
                        Some(summary) => pdf_summary = Some(summary),
                        None => return DispatchOutcome::PdfFailed,
                    }
                    break;
                }
                AttachmentKind::Image => {
                    prompt = format!(
                        "Image uploaded: {} (analysis not supported)",
                        attachment.filename
                    );
                    should_process = true;
                    break;
                }
                AttachmentKind::Unsupported => {}
            }
        }

        if !should_process || prompt.is_empty() {
            return DispatchOutcome::Dropped;
        }

        let key = self.scope.key_for(msg.author_id, msg.channel_id);
        let session = self.history.session(key).await;
        let result = {
            // Held until the turn is recorded so same-key events run one at a time.
            let mut conversation = session.lock().await;
            self.run_turn(channel, &mut conversation, prompt, pdf_summary)
                .await
        };
        drop(session);

        match result {
            TurnResult::Refused => {
                self.history.commit(key).await;
                send_or_log(channel, IMAGE_GENERATION_UNSUPPORTED).await;
                DispatchOutcome::ImageGenerationRefused
            }
            TurnResult::Answered { reply, style } => {
                self.history.commit(key).await;
                let chunks = split_message(&reply, MAX_CHUNK);
                info!(?style, chunks = chunks.len(), "Sending reply");
                for chunk in &chunks {
                    send_or_log(channel, chunk).await;
                }
                DispatchOutcome::Replied {
                    chunks: chunks.len(),
                }
            }
            TurnResult::Failed(e) => {
                self.history.release(key).await;
                let provider = self.llm.provider_name();
                error!("{} API error: {}", provider, e);
                let notice = if e.is_quota_or_rate_limit() {
                    format!("{provider} API quota exceeded. Try again later.")
                } else {
                    format!("Error with {provider} API: {e}")
                };
                send_or_log(channel, &notice).await;
                DispatchOutcome::LlmFailed
            }
        }
    }

    /// The part of a turn that reads and writes history. History changes only
    /// when the result is `Refused` or `Answered`.
    async fn run_turn(
        &self,
        channel: &dyn ReplyChannel,
        conversation: &mut Conversation,
        prompt: String,
        pdf_summary: Option<String>,
    ) -> TurnResult {
        if let Err(e) = channel.start_typing().await {
            warn!("Failed to show typing indicator: {}", e);
        }

        if is_image_generation_request(&prompt) {
            info!("Refusing image generation request");
            conversation.append(
                Turn::user(prompt),
                Turn::assistant(IMAGE_GENERATION_HISTORY_NOTE),
            );
            return TurnResult::Refused;
        }

        let full_prompt = match &pdf_summary {
            Some(summary) => format!(
                "Context from attached PDF document:\n{summary}\n\nUser question:\n{prompt}"
            ),
            None => prompt.clone(),
        };

        let style = ResponseStyle::for_message(&prompt);
        let combined_prompt = build_prompt(&conversation.turns(), &full_prompt, style);

        match self.generate(&combined_prompt).await {
            Ok(reply) => {
                let reply = reply.trim().to_string();
                conversation.append(Turn::user(full_prompt), Turn::assistant(reply.clone()));
                TurnResult::Answered { reply, style }
            }
            Err(e) => TurnResult::Failed(e),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        tokio::time::timeout(self.llm_timeout, self.llm.generate(prompt))
            .await
            .map_err(|_| BotError::Timeout(self.llm_timeout.as_secs()))?
    }

    /// Downloads, extracts and summarizes one PDF, telling the user on failure.
    async fn summarize_pdf(
        &self,
        channel: &dyn ReplyChannel,
        attachment: &Attachment,
    ) -> Option<String> {
        let bytes = match channel.download(attachment).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("PDF processing error: {}", e);
                send_or_log(channel, &format!("Error processing PDF: {e}")).await;
                return None;
            }
        };
        info!(filename = %attachment.filename, bytes = bytes.len(), "Extracting PDF text");

        let parser = self.pdf_parser.clone();
        let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(parser.as_ref(), &bytes))
            .await
            .unwrap_or_else(|e| {
                error!("PDF extraction task failed: {}", e);
                None
            });

        let Some(text) = text else {
            send_or_log(channel, PDF_EXTRACTION_FAILED).await;
            return None;
        };

        let summary = tokio::time::timeout(self.llm_timeout, summarize_text(self.llm.as_ref(), &text))
            .await
            .unwrap_or_else(|_| {
                error!("{} summarization timed out", self.llm.provider_name());
                None
            });
        if summary.is_none() {
            send_or_log(channel, PDF_SUMMARY_FAILED).await;
        }
        summary
    }
}

async fn send_or_log(channel: &dyn ReplyChannel, text: &str) {
    if let Err(e) = channel.send(text).await {
        error!("Failed to send message: {}", e);
    }
}
