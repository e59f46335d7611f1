pub mod error;
pub mod models;

pub use error::{DiscordError, Result};
pub use models::*;

use std::time::Duration;

const API_BASE: &str = "https://discord.com/api/v10";
const USER_AGENT: &str = "DiscordBot (group-event-bot, 0.1)";

#[derive(Debug, Clone)]
pub struct DiscordOptions {
    pub bot_token: String,
}

/// REST client for the handful of message calls the bot needs.
///
/// Construct once and reuse; the inner reqwest client pools connections.
#[derive(Debug, Clone)]
pub struct DiscordService {
    client: reqwest::Client,
    options: DiscordOptions,
}

impl DiscordService {
    pub fn new(options: DiscordOptions) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(8))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, options }
    }

    /// Post a message to a channel, returning the created message id.
    pub async fn post_message(&self, channel_id: &str, message: &Message) -> Result<PostedMessage> {
        let url = format!("{API_BASE}/channels/{channel_id}/messages");

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.options.bot_token))
            .json(message)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json::<PostedMessage>().await?)
    }

    /// Overwrite an existing message (content and components) by id.
    pub async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<()> {
        let url = format!("{API_BASE}/channels/{channel_id}/messages/{message_id}");

        let resp = self
            .client
            .patch(&url)
            .header("Authorization", format!("Bot {}", self.options.bot_token))
            .json(message)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Post a follow-up message through the interaction webhook.
    ///
    /// Used by deferred work that no longer holds the synchronous response
    /// channel; authenticated by the interaction token, not the bot token.
    pub async fn followup(
        &self,
        application_id: &str,
        token: &str,
        message: &Message,
    ) -> Result<()> {
        let url = format!("{API_BASE}/webhooks/{application_id}/{token}");

        let resp = self.client.post(&url).json(message).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// Permalink to a message, for "open" affordances in list views.
pub fn message_link(guild_id: &str, channel_id: &str, message_id: &str) -> String {
    format!("https://discord.com/channels/{guild_id}/{channel_id}/{message_id}")
}
