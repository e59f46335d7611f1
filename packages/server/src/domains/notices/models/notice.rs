use chrono::{DateTime, FixedOffset, Utc};

/// Notice record; belongs to exactly one event.
///
/// `hidden` is a display flag, orthogonal to `status`: a closed notice can
/// stay visible in the list and a hidden one can still be open.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoticeRecord {
    pub guild_id: String,
    pub notice_id: String,
    pub event_id: String,
    /// Secondary sort key `<event_id>#<created_at>#<notice_id>` for
    /// per-event range scans.
    pub event_sk: String,
    pub status: String,
    pub hidden: bool,
    pub channel_id: String,
    pub message_id: Option<String>,
    pub title: String,
    pub body: String,
    pub creator_id: String,
    pub creator_name: String,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub remind_at: Option<DateTime<FixedOffset>>,
    pub remind_schedule: Option<String>,
}

impl NoticeRecord {
    pub const STATUS_OPEN: &'static str = "OPEN";
    pub const STATUS_CLOSED: &'static str = "CLOSED";

    pub fn is_open(&self) -> bool {
        self.status == Self::STATUS_OPEN
    }

    pub fn sort_key(event_id: &str, created_at: &DateTime<Utc>, notice_id: &str) -> String {
        format!("{event_id}#{}#{notice_id}", created_at.to_rfc3339())
    }

    /// Sort-key prefix selecting all of an event's notices.
    pub fn event_prefix(event_id: &str) -> String {
        format!("{event_id}#")
    }
}
