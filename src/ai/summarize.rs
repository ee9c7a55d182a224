//! Short summaries of extracted document text.

use tracing::{error, info};

use super::client::TextGenerator;

/// Only this many characters of a document are sent for summarization.
pub const SUMMARY_INPUT_CAP: usize = 2000;

pub const SUMMARY_INSTRUCTION: &str =
    "Summarize the following document briefly, focusing on main points:";

/// Builds the summarization request for the first `SUMMARY_INPUT_CAP` chars.
#[must_use]
pub fn build_summary_prompt(text: &str) -> String {
    let truncated: String = text.chars().take(SUMMARY_INPUT_CAP).collect();
    format!("{SUMMARY_INSTRUCTION}\n\n{truncated}")
}

/// Returns a trimmed summary, or `None` when the LLM fails or answers with
/// nothing. Longer documents are only partially summarized.
pub async fn summarize_text(llm: &dyn TextGenerator, text: &str) -> Option<String> {
    match llm.generate(&build_summary_prompt(text)).await {
        Ok(summary) => {
            let summary = summary.trim();
            if summary.is_empty() {
                error!("{} summarization returned no text", llm.provider_name());
                None
            } else {
                info!(chars = summary.chars().count(), "Summarized document");
                Some(summary.to_string())
            }
        }
        Err(e) => {
            error!("{} summarization error: {}", llm.provider_name(), e);
            None
        }
    }
}
