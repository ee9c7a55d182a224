//! Discord adapter built on serenity

pub mod channel;
pub mod handler;

pub use channel::DiscordChannel;
pub use handler::{Handler, to_incoming};

use serenity::Client;
use serenity::model::gateway::GatewayIntents;
use std::sync::Arc;
use tracing::info;

use crate::bot::Dispatcher;
use crate::errors::BotError;

/// Connects to the gateway and serves events until the connection ends.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the gateway session fails.
pub async fn run(token: &str, dispatcher: Arc<Dispatcher>) -> Result<(), BotError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(Handler::new(dispatcher))
        .await?;

    info!("Starting Discord client");
    client.start().await?;
    Ok(())
}
