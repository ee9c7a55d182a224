use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use tracing::debug;

use crate::bot::ReplyChannel;
use crate::core::models::Attachment;
use crate::errors::BotError;

/// Discord caps uploads well below this for regular servers.
const MAX_ATTACHMENT_BYTES: u64 = 25 * 1024 * 1024;

/// Reply target for one Discord message.
pub struct DiscordChannel<'a> {
    http: Arc<Http>,
    channel_id: ChannelId,
    downloader: &'a reqwest::Client,
}

impl<'a> DiscordChannel<'a> {
    pub fn new(http: Arc<Http>, channel_id: ChannelId, downloader: &'a reqwest::Client) -> Self {
        Self {
            http,
            channel_id,
            downloader,
        }
    }
}

#[async_trait]
impl ReplyChannel for DiscordChannel<'_> {
    async fn send(&self, text: &str) -> Result<(), BotError> {
        self.channel_id.say(&self.http, text).await?;
        Ok(())
    }

    async fn download(&self, attachment: &Attachment) -> Result<Vec<u8>, BotError> {
        if attachment.size > MAX_ATTACHMENT_BYTES {
            return Err(BotError::HttpError(format!(
                "attachment {} is too large ({} bytes)",
                attachment.filename, attachment.size
            )));
        }
        debug!(filename = %attachment.filename, "Downloading attachment");
        let response = self
            .downloader
            .get(&attachment.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn start_typing(&self) -> Result<(), BotError> {
        self.channel_id.broadcast_typing(&self.http).await?;
        Ok(())
    }
}
