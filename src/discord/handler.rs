//! Serenity event handler implementation

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::UserId;
use serenity::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use super::channel::DiscordChannel;
use crate::bot::Dispatcher;
use crate::core::models::{Attachment, IncomingMessage};

pub struct Handler {
    dispatcher: Arc<Dispatcher>,
    downloader: reqwest::Client,
}

impl Handler {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            downloader: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Logged in as {} ({})", ready.user.name, ready.user.id);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let bot_id = ctx.cache.current_user().id;
        let incoming = to_incoming(&msg, bot_id);
        let channel = DiscordChannel::new(ctx.http.clone(), msg.channel_id, &self.downloader);

        let outcome = self.dispatcher.handle(&channel, &incoming).await;
        debug!(message_id = %msg.id, ?outcome, "Discord message processed");
    }
}

/// Converts a serenity message into the dispatcher's platform-neutral form.
#[must_use]
pub fn to_incoming(msg: &Message, bot_id: UserId) -> IncomingMessage {
    IncomingMessage {
        author_id: msg.author.id.get(),
        author_is_bot: msg.author.bot,
        channel_id: msg.channel_id.get(),
        content: msg.content.clone(),
        bot_user_id: bot_id.get(),
        mentions_bot: msg.mentions_user_id(bot_id),
        replied_to_bot: msg
            .referenced_message
            .as_ref()
            .is_some_and(|referenced| referenced.author.id == bot_id),
        attachments: msg
            .attachments
            .iter()
            .map(|a| Attachment {
                filename: a.filename.clone(),
                url: a.url.clone(),
                size: u64::from(a.size),
            })
            .collect(),
    }
}
