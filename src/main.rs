use anyhow::{Result, anyhow};
use std::sync::Arc;
use tracing::{error, info};

use chatrelay::ai::llm_from_config;
use chatrelay::bot::Dispatcher;
use chatrelay::conversation::{HistoryStore, MAX_PAIRS};
use chatrelay::core::config::AppConfig;
use chatrelay::documents::PdfExtractParser;

#[tokio::main]
async fn main() -> Result<()> {
    chatrelay::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        anyhow!("Config error: {}", e)
    })?;

    let llm = llm_from_config(&config)?;
    info!(
        provider = llm.provider_name(),
        scope = ?config.history_scope,
        "Starting chatrelay"
    );

    let history = Arc::new(HistoryStore::with_limits(MAX_PAIRS, config.history_max_keys));
    let dispatcher = Dispatcher::new(
        llm,
        Arc::new(PdfExtractParser),
        history,
        config.history_scope,
    )
    .with_llm_timeout(config.llm_timeout);

    chatrelay::discord::run(&config.discord_token, Arc::new(dispatcher)).await?;
    Ok(())
}
