use chrono::{DateTime, Utc};

/// Acknowledgment record; at most one per (notice, participant), enforced by
/// the store's conditional create on `ack_key`. Never mutated or deleted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AckRecord {
    pub guild_id: String,
    pub ack_key: String,
    pub notice_id: String,
    pub event_id: String,
    pub user_id: String,
    pub username: String,
    pub acked_at: DateTime<Utc>,
}

impl AckRecord {
    /// Composite sort key: `<notice_id>#USER#<user_id>`.
    pub fn key(notice_id: &str, user_id: &str) -> String {
        format!("{notice_id}#USER#{user_id}")
    }

    /// Sort-key prefix selecting all of a notice's acknowledgments.
    pub fn notice_prefix(notice_id: &str) -> String {
        format!("{notice_id}#USER#")
    }
}
