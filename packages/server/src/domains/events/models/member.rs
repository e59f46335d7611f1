use chrono::{DateTime, Utc};

/// Join record; at most one per (event, participant), enforced by the
/// store's conditional create on `member_key`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberRecord {
    pub guild_id: String,
    pub member_key: String,
    pub event_id: String,
    pub user_id: String,
    pub username: String,
    pub joined_at: DateTime<Utc>,
}

impl MemberRecord {
    /// Composite sort key: `<event_id>#USER#<user_id>`.
    pub fn key(event_id: &str, user_id: &str) -> String {
        format!("{event_id}#USER#{user_id}")
    }

    /// Sort-key prefix selecting all of an event's members.
    pub fn event_prefix(event_id: &str) -> String {
        format!("{event_id}#USER#")
    }
}
