// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Lifecycle rules
// (gates, status checks, uniqueness policy) live in domain actions that use
// these traits.
//
// Naming convention: Base* for trait names (e.g., BaseStore, BaseChat)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use discord::{Message, PostedMessage};
use serde::{Deserialize, Serialize};

use crate::domains::events::models::{EventRecord, MemberRecord};
use crate::domains::notices::models::{AckRecord, NoticeRecord};

// =============================================================================
// Store Trait (four keyed collections, conditional create as the only
// atomicity primitive)
// =============================================================================

/// Typed accessor over the four logical collections, each keyed by
/// (guild partition, composite sort key).
///
/// Puts overwrite whole items (last writer wins); `insert_*` methods are
/// conditional creates returning `false` when the key already exists. Range
/// reads come back in sort-key order; display ordering is a caller concern.
#[async_trait]
pub trait BaseStore: Send + Sync {
    // Events
    async fn get_event(&self, guild_id: &str, event_id: &str) -> Result<Option<EventRecord>>;
    async fn put_event(&self, event: &EventRecord) -> Result<()>;

    // Members
    /// Conditional create; `false` when the member key already exists.
    async fn insert_member(&self, member: &MemberRecord) -> Result<bool>;
    async fn get_member(&self, guild_id: &str, member_key: &str) -> Result<Option<MemberRecord>>;
    /// Unconditional delete; removing an absent key is a no-op.
    async fn delete_member(&self, guild_id: &str, member_key: &str) -> Result<()>;
    async fn list_members(&self, guild_id: &str, event_id: &str) -> Result<Vec<MemberRecord>>;

    // Notices
    async fn get_notice(&self, guild_id: &str, notice_id: &str) -> Result<Option<NoticeRecord>>;
    async fn put_notice(&self, notice: &NoticeRecord) -> Result<()>;
    async fn list_notices(&self, guild_id: &str, event_id: &str) -> Result<Vec<NoticeRecord>>;

    // Acks
    /// Conditional create; `false` when the ack key already exists.
    async fn insert_ack(&self, ack: &AckRecord) -> Result<bool>;
    async fn list_acks(&self, guild_id: &str, notice_id: &str) -> Result<Vec<AckRecord>>;
}

// =============================================================================
// Chat Trait (Infrastructure - outbound platform messaging)
// =============================================================================

#[async_trait]
pub trait BaseChat: Send + Sync {
    /// Post a message to a channel, returning the created message id.
    async fn post_message(&self, channel_id: &str, message: &Message) -> Result<PostedMessage>;

    /// Overwrite an existing message by id.
    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<()>;

    /// Post a follow-up through the interaction webhook (deferred work).
    async fn followup(&self, application_id: &str, token: &str, message: &Message) -> Result<()>;
}

// =============================================================================
// Scheduler Trait (Infrastructure - external one-shot callbacks)
// =============================================================================

/// Payload a fired schedule POSTs back to the reminder route.
///
/// Discriminated by `kind`; the handler re-reads current state before acting,
/// so a stale firing degrades to a benign skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReminderJob {
    EventRemind {
        guild_id: String,
        event_id: String,
    },
    NoticeRemind {
        guild_id: String,
        event_id: String,
        notice_id: String,
        notice_channel_id: String,
    },
}

#[async_trait]
pub trait BaseScheduler: Send + Sync {
    /// Create a one-shot schedule, or update it in place if the name exists.
    async fn upsert(
        &self,
        name: &str,
        run_at: DateTime<FixedOffset>,
        payload: &ReminderJob,
    ) -> Result<()>;

    /// Delete a schedule; deleting an unknown name succeeds.
    async fn delete(&self, name: &str) -> Result<()>;
}

// =============================================================================
// Schedule names
// =============================================================================

// Scheduler name constraints: charset [0-9a-zA-Z-_.], length <= 64.
const SCHEDULE_NAME_MAX: usize = 64;

fn sanitize_schedule_part(part: &str) -> String {
    part.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

/// Deterministic schedule name for an event's day-before reminder.
pub fn event_remind_schedule_name(guild_id: &str, event_id: &str) -> String {
    // event_id is "EVT#<uuid>"; the uuid suffix is enough to disambiguate
    // within a guild.
    let suffix = event_id.rsplit('#').next().unwrap_or(event_id);
    let suffix = &suffix[suffix.len().saturating_sub(8)..];
    let name = format!(
        "evt-remind-{}-{}",
        sanitize_schedule_part(guild_id),
        sanitize_schedule_part(suffix)
    );
    truncate_schedule_name(name)
}

/// Deterministic schedule name for a notice's acknowledgment reminder.
pub fn notice_remind_schedule_name(guild_id: &str, notice_id: &str) -> String {
    let suffix = notice_id.rsplit('#').next().unwrap_or(notice_id);
    let mut suffix = sanitize_schedule_part(suffix);
    suffix.truncate(32);
    let name = format!("ntc-{}-{}-remind", sanitize_schedule_part(guild_id), suffix);
    truncate_schedule_name(name)
}

fn truncate_schedule_name(mut name: String) -> String {
    name.truncate(SCHEDULE_NAME_MAX);
    name
}
