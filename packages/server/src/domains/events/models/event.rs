use chrono::{DateTime, FixedOffset, Utc};

/// Event record, partitioned by guild.
///
/// `recruit_message_id` and `remind_schedule` are back-filled after the
/// out-of-band announcement post and schedule registration; the record is
/// valid without them (degraded but created).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRecord {
    pub guild_id: String,
    pub event_id: String,
    pub title: String,
    pub creator_id: String,
    pub creator_name: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub recruit_channel_id: String,
    pub recruit_message_id: Option<String>,
    pub notice_channel_id: String,
    pub start_at: DateTime<FixedOffset>,
    pub remind_at: DateTime<FixedOffset>,
    pub remind_schedule: Option<String>,
}

impl EventRecord {
    pub const STATUS_OPEN: &'static str = "OPEN";
    pub const STATUS_CLOSED: &'static str = "CLOSED";

    pub fn is_open(&self) -> bool {
        self.status == Self::STATUS_OPEN
    }
}
