//! PostgreSQL-backed store.
//!
//! One table per logical collection, primary key (guild partition, composite
//! sort key). The composite keys are stored as columns, which keeps the two
//! load-bearing KV semantics: conditional create (`ON CONFLICT DO NOTHING`)
//! and per-partition prefix range scans (`LIKE prefix%`). Puts overwrite the
//! whole row - last writer wins, no sequencing token.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::domains::events::models::{EventRecord, MemberRecord};
use crate::domains::notices::models::{AckRecord, NoticeRecord};
use crate::kernel::BaseStore;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseStore for PgStore {
    async fn get_event(&self, guild_id: &str, event_id: &str) -> Result<Option<EventRecord>> {
        sqlx::query_as::<_, EventRecord>(
            "SELECT * FROM events WHERE guild_id = $1 AND event_id = $2",
        )
        .bind(guild_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn put_event(&self, event: &EventRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO events (
                guild_id, event_id, title, creator_id, creator_name, created_at,
                status, recruit_channel_id, recruit_message_id, notice_channel_id,
                start_at, remind_at, remind_schedule
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             ON CONFLICT (guild_id, event_id) DO UPDATE SET
                title = EXCLUDED.title,
                status = EXCLUDED.status,
                recruit_message_id = EXCLUDED.recruit_message_id,
                remind_schedule = EXCLUDED.remind_schedule",
        )
        .bind(&event.guild_id)
        .bind(&event.event_id)
        .bind(&event.title)
        .bind(&event.creator_id)
        .bind(&event.creator_name)
        .bind(event.created_at)
        .bind(&event.status)
        .bind(&event.recruit_channel_id)
        .bind(&event.recruit_message_id)
        .bind(&event.notice_channel_id)
        .bind(event.start_at)
        .bind(event.remind_at)
        .bind(&event.remind_schedule)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_member(&self, member: &MemberRecord) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO event_members (
                guild_id, member_key, event_id, user_id, username, joined_at
             )
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (guild_id, member_key) DO NOTHING",
        )
        .bind(&member.guild_id)
        .bind(&member.member_key)
        .bind(&member.event_id)
        .bind(&member.user_id)
        .bind(&member.username)
        .bind(member.joined_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn get_member(&self, guild_id: &str, member_key: &str) -> Result<Option<MemberRecord>> {
        sqlx::query_as::<_, MemberRecord>(
            "SELECT * FROM event_members WHERE guild_id = $1 AND member_key = $2",
        )
        .bind(guild_id)
        .bind(member_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn delete_member(&self, guild_id: &str, member_key: &str) -> Result<()> {
        sqlx::query("DELETE FROM event_members WHERE guild_id = $1 AND member_key = $2")
            .bind(guild_id)
            .bind(member_key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_members(&self, guild_id: &str, event_id: &str) -> Result<Vec<MemberRecord>> {
        sqlx::query_as::<_, MemberRecord>(
            "SELECT * FROM event_members
             WHERE guild_id = $1 AND member_key LIKE $2 || '%'
             ORDER BY member_key",
        )
        .bind(guild_id)
        .bind(MemberRecord::event_prefix(event_id))
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn get_notice(&self, guild_id: &str, notice_id: &str) -> Result<Option<NoticeRecord>> {
        sqlx::query_as::<_, NoticeRecord>(
            "SELECT * FROM notices WHERE guild_id = $1 AND notice_id = $2",
        )
        .bind(guild_id)
        .bind(notice_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn put_notice(&self, notice: &NoticeRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO notices (
                guild_id, notice_id, event_id, event_sk, status, hidden,
                channel_id, message_id, title, body, creator_id, creator_name,
                created_at, closed_at, remind_at, remind_schedule
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             ON CONFLICT (guild_id, notice_id) DO UPDATE SET
                status = EXCLUDED.status,
                hidden = EXCLUDED.hidden,
                message_id = EXCLUDED.message_id,
                closed_at = EXCLUDED.closed_at,
                remind_at = EXCLUDED.remind_at,
                remind_schedule = EXCLUDED.remind_schedule",
        )
        .bind(&notice.guild_id)
        .bind(&notice.notice_id)
        .bind(&notice.event_id)
        .bind(&notice.event_sk)
        .bind(&notice.status)
        .bind(notice.hidden)
        .bind(&notice.channel_id)
        .bind(&notice.message_id)
        .bind(&notice.title)
        .bind(&notice.body)
        .bind(&notice.creator_id)
        .bind(&notice.creator_name)
        .bind(notice.created_at)
        .bind(notice.closed_at)
        .bind(notice.remind_at)
        .bind(&notice.remind_schedule)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_notices(&self, guild_id: &str, event_id: &str) -> Result<Vec<NoticeRecord>> {
        sqlx::query_as::<_, NoticeRecord>(
            "SELECT * FROM notices
             WHERE guild_id = $1 AND event_sk LIKE $2 || '%'
             ORDER BY event_sk",
        )
        .bind(guild_id)
        .bind(NoticeRecord::event_prefix(event_id))
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn insert_ack(&self, ack: &AckRecord) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO notice_acks (
                guild_id, ack_key, notice_id, event_id, user_id, username, acked_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (guild_id, ack_key) DO NOTHING",
        )
        .bind(&ack.guild_id)
        .bind(&ack.ack_key)
        .bind(&ack.notice_id)
        .bind(&ack.event_id)
        .bind(&ack.user_id)
        .bind(&ack.username)
        .bind(ack.acked_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_acks(&self, guild_id: &str, notice_id: &str) -> Result<Vec<AckRecord>> {
        sqlx::query_as::<_, AckRecord>(
            "SELECT * FROM notice_acks
             WHERE guild_id = $1 AND ack_key LIKE $2 || '%'
             ORDER BY ack_key",
        )
        .bind(guild_id)
        .bind(AckRecord::notice_prefix(notice_id))
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }
}
