/// chatrelay - A Discord chatbot that relays mentions and replies to a hosted LLM.
///
/// Messages that mention the bot, or reply to one of its messages, are sent to
/// the configured text-generation backend together with a short rolling
/// history of the conversation. An attached PDF is summarized first and the
/// summary is framed as context for the question.
///
/// # Architecture
///
/// The system uses:
/// - serenity for the Discord gateway and REST API
/// - reqwest for Gemini and openai-api-rs for OpenAI
/// - pdf-extract for document text
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use chatrelay::bot::Dispatcher;
/// use chatrelay::conversation::{HistoryScope, HistoryStore};
/// use chatrelay::documents::PdfExtractParser;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     chatrelay::setup_logging();
///
///     let config = chatrelay::core::config::AppConfig::from_env()?;
///     let llm = chatrelay::ai::llm_from_config(&config)?;
///     let dispatcher = Dispatcher::new(
///         llm,
///         Arc::new(PdfExtractParser),
///         Arc::new(HistoryStore::new()),
///         HistoryScope::Global,
///     );
///
///     chatrelay::discord::run(&config.discord_token, Arc::new(dispatcher)).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod bot;
pub mod conversation;
pub mod core;
pub mod discord;
pub mod documents;
pub mod errors;
pub mod utils;

/// Configure structured logging with JSON output.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. Calling this more than
/// once is harmless; only the first call installs the subscriber.
///
/// # Example
///
/// ```
/// chatrelay::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
