//! Day-before event reminder, invoked by the scheduler callback.
//!
//! The firing is an instruction, not a fact: current state is re-read and a
//! stale or pointless firing reports a benign skip. The schedule may race an
//! in-flight close and fire anyway; the status check here is what resolves
//! that race.

use anyhow::Result;
use discord::Message;
use tracing::info;

use crate::common::RemindOutcome;
use crate::kernel::BotDeps;

pub async fn remind_event(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
) -> Result<RemindOutcome> {
    let Some(event) = deps.store.get_event(guild_id, event_id).await? else {
        info!(%guild_id, %event_id, "Event reminder skipped: event not found");
        return Ok(RemindOutcome::Skipped("event not found"));
    };

    if !event.is_open() {
        info!(%event_id, "Event reminder skipped: event closed");
        return Ok(RemindOutcome::Skipped("event closed"));
    }

    let mut members = deps.store.list_members(guild_id, event_id).await?;
    if members.is_empty() {
        info!(%event_id, "Event reminder skipped: no participants");
        return Ok(RemindOutcome::Skipped("no participants"));
    }
    members.sort_by(|a, b| a.user_id.cmp(&b.user_id));

    let mentions = members
        .iter()
        .map(|m| format!("<@{}>", m.user_id))
        .collect::<Vec<_>>()
        .join(" ");
    let content = format!("🔔 Tomorrow: **{}**\n{mentions}", event.title);

    deps.chat
        .post_message(&event.notice_channel_id, &Message::text(content))
        .await?;

    info!(%event_id, mentioned = members.len(), "Event reminder sent");
    Ok(RemindOutcome::Sent {
        mentioned: members.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BaseStore;
    use crate::domains::events::models::EventRecord;
    use crate::kernel::test_dependencies::{sample_event, sample_member, TestDependencies};

    #[tokio::test]
    async fn test_reminder_mentions_all_members() {
        let td = TestDependencies::new();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();
        td.store
            .insert_member(&sample_member("g", "EVT#1", "u1"))
            .await
            .unwrap();
        td.store
            .insert_member(&sample_member("g", "EVT#1", "u2"))
            .await
            .unwrap();

        let outcome = remind_event(&td.deps(), "g", "EVT#1").await.unwrap();
        assert_eq!(outcome, RemindOutcome::Sent { mentioned: 2 });

        let posts = td.chat.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "notice-chan");
        assert!(posts[0].1.content.contains("<@u1>"));
        assert!(posts[0].1.content.contains("<@u2>"));
    }

    #[tokio::test]
    async fn test_reminder_skips_missing_event() {
        let td = TestDependencies::new();
        let outcome = remind_event(&td.deps(), "g", "EVT#missing").await.unwrap();
        assert_eq!(outcome, RemindOutcome::Skipped("event not found"));
        assert!(td.chat.posts().is_empty());
    }

    #[tokio::test]
    async fn test_reminder_skips_closed_event() {
        let td = TestDependencies::new();
        let mut event = sample_event("g", "EVT#1", "creator");
        event.status = EventRecord::STATUS_CLOSED.to_string();
        td.store.put_event(&event).await.unwrap();

        let outcome = remind_event(&td.deps(), "g", "EVT#1").await.unwrap();
        assert_eq!(outcome, RemindOutcome::Skipped("event closed"));
        assert!(td.chat.posts().is_empty());
    }

    #[tokio::test]
    async fn test_reminder_skips_empty_roster() {
        let td = TestDependencies::new();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        let outcome = remind_event(&td.deps(), "g", "EVT#1").await.unwrap();
        assert_eq!(outcome, RemindOutcome::Skipped("no participants"));
        assert!(td.chat.posts().is_empty());
    }
}
