//! Bot dependencies (using traits for testability)
//!
//! Central dependency container handed to every engine operation, the worker,
//! and the reminder handlers. Clients are constructed once in the app builder
//! and reused across invocations; nothing here is global.

use anyhow::Result;
use async_trait::async_trait;
use discord::{DiscordService, Message, PostedMessage};
use std::sync::Arc;

use crate::kernel::{BaseChat, BaseScheduler, BaseStore};

// =============================================================================
// DiscordService Adapter (implements BaseChat trait)
// =============================================================================

/// Wrapper around DiscordService that implements the BaseChat trait
pub struct DiscordAdapter(pub Arc<DiscordService>);

impl DiscordAdapter {
    pub fn new(service: Arc<DiscordService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseChat for DiscordAdapter {
    async fn post_message(&self, channel_id: &str, message: &Message) -> Result<PostedMessage> {
        self.0
            .post_message(channel_id, message)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<()> {
        self.0
            .edit_message(channel_id, message_id, message)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn followup(&self, application_id: &str, token: &str, message: &Message) -> Result<()> {
        self.0
            .followup(application_id, token, message)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// BotDeps
// =============================================================================

/// Bot dependencies accessible to engine operations (using traits for
/// testability)
#[derive(Clone)]
pub struct BotDeps {
    pub store: Arc<dyn BaseStore>,
    pub chat: Arc<dyn BaseChat>,
    pub scheduler: Arc<dyn BaseScheduler>,
}

impl BotDeps {
    pub fn new(
        store: Arc<dyn BaseStore>,
        chat: Arc<dyn BaseChat>,
        scheduler: Arc<dyn BaseScheduler>,
    ) -> Self {
        Self {
            store,
            chat,
            scheduler,
        }
    }
}
