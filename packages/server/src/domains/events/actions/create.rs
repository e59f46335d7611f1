//! Event creation (deferred worker job).
//!
//! Runs off the request path; the synchronous reply was already sent, so all
//! user feedback goes through the follow-up webhook. Sequence: validate,
//! write the event, post the recruitment message, back-fill the message id,
//! register the day-before reminder. A failed reminder registration leaves a
//! created event without a reminder; a failed event write fails the job.

use anyhow::Result;
use chrono::{Duration, Utc};
use discord::Message;
use tracing::{error, info};

use crate::common::id::new_event_id;
use crate::common::time::parse_wall_clock;
use crate::domains::events::messages::build_recruit_message;
use crate::domains::events::models::EventRecord;
use crate::kernel::{event_remind_schedule_name, BotDeps, CreateEventJob, ReminderJob};

pub async fn create_event(deps: &BotDeps, job: CreateEventJob) -> Result<()> {
    let Some(title) = job.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
        return reject(deps, &job, "❌ A title is required").await;
    };
    let Some(notice_channel_id) = job
        .notice_channel_id
        .as_deref()
        .filter(|c| !c.is_empty())
    else {
        return reject(deps, &job, "❌ Pick a channel for notices").await;
    };
    let Some(start_at_raw) = job.start_at.as_deref().map(str::trim).filter(|s| !s.is_empty())
    else {
        return reject(deps, &job, "❌ A start time is required").await;
    };
    let Some(start_at) = parse_wall_clock(start_at_raw) else {
        return reject(
            deps,
            &job,
            "❌ Enter the start time as `YYYY-MM-DD HH:MM`, e.g. 2026-01-18 21:00",
        )
        .await;
    };

    let event_id = new_event_id();
    let remind_at = start_at - Duration::days(1);

    let mut event = EventRecord {
        guild_id: job.guild_id.clone(),
        event_id: event_id.clone(),
        title: title.to_string(),
        creator_id: job.creator_id.clone(),
        creator_name: job.creator_name.clone(),
        created_at: Utc::now(),
        status: EventRecord::STATUS_OPEN.to_string(),
        recruit_channel_id: job.recruit_channel_id.clone(),
        recruit_message_id: None,
        notice_channel_id: notice_channel_id.to_string(),
        start_at,
        remind_at,
        remind_schedule: None,
    };
    deps.store.put_event(&event).await?;

    let message = build_recruit_message(&event, &[]);
    let posted = deps
        .chat
        .post_message(&event.recruit_channel_id, &message)
        .await?;
    event.recruit_message_id = Some(posted.id);
    deps.store.put_event(&event).await?;

    let schedule_name = event_remind_schedule_name(&event.guild_id, &event.event_id);
    let payload = ReminderJob::EventRemind {
        guild_id: event.guild_id.clone(),
        event_id: event.event_id.clone(),
    };
    match deps.scheduler.upsert(&schedule_name, remind_at, &payload).await {
        Ok(()) => {
            event.remind_schedule = Some(schedule_name);
            deps.store.put_event(&event).await?;
        }
        Err(e) => {
            // Degraded but created: the event stands without a reminder.
            error!(
                error = %e,
                event_id = %event.event_id,
                "Reminder registration failed; event created without reminder"
            );
        }
    }

    info!(event_id = %event.event_id, guild_id = %event.guild_id, "Event created");
    Ok(())
}

async fn reject(deps: &BotDeps, job: &CreateEventJob, reason: &str) -> Result<()> {
    deps.chat
        .followup(&job.application_id, &job.token, &Message::text(reason))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::format_wall_clock;
    use crate::kernel::test_dependencies::{MockScheduler, TestDependencies};

    fn valid_job() -> CreateEventJob {
        CreateEventJob {
            guild_id: "guild-1".to_string(),
            application_id: "app-1".to_string(),
            token: "tok".to_string(),
            recruit_channel_id: "recruit-chan".to_string(),
            creator_id: "user-1".to_string(),
            creator_name: "alice".to_string(),
            title: Some("Raid night".to_string()),
            notice_channel_id: Some("notice-chan".to_string()),
            start_at: Some("2026-01-19 21:00".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_computes_day_before_reminder() {
        let td = TestDependencies::new();
        create_event(&td.deps(), valid_job()).await.unwrap();

        let event = td.store.only_event();
        assert_eq!(format_wall_clock(&event.start_at), "2026-01-19 21:00");
        assert_eq!(format_wall_clock(&event.remind_at), "2026-01-18 21:00");

        let upserts = td.scheduler.upserts();
        assert_eq!(upserts.len(), 1);
        assert_eq!(upserts[0].1, event.remind_at);
        assert_eq!(event.remind_schedule.as_deref(), Some(upserts[0].0.as_str()));
    }

    #[tokio::test]
    async fn test_create_backfills_posted_message_id() {
        let td = TestDependencies::new();
        create_event(&td.deps(), valid_job()).await.unwrap();

        assert_eq!(td.chat.posts().len(), 1);
        assert_eq!(td.chat.posts()[0].0, "recruit-chan");
        let event = td.store.only_event();
        assert_eq!(event.recruit_message_id.as_deref(), Some("msg-1"));
        assert_eq!(event.status, EventRecord::STATUS_OPEN);
    }

    #[tokio::test]
    async fn test_missing_title_rejects_without_writing() {
        let td = TestDependencies::new();
        let job = CreateEventJob {
            title: Some("   ".to_string()),
            ..valid_job()
        };
        create_event(&td.deps(), job).await.unwrap();

        assert_eq!(td.store.event_count(), 0);
        assert!(td.chat.posts().is_empty());
        let followups = td.chat.followups();
        assert_eq!(followups.len(), 1);
        assert!(followups[0].2.content.contains("title"));
    }

    #[tokio::test]
    async fn test_malformed_start_time_rejects_without_writing() {
        let td = TestDependencies::new();
        let job = CreateEventJob {
            start_at: Some("next friday".to_string()),
            ..valid_job()
        };
        create_event(&td.deps(), job).await.unwrap();

        assert!(td.chat.posts().is_empty());
        assert_eq!(td.chat.followups().len(), 1);
    }

    #[tokio::test]
    async fn test_scheduler_failure_still_creates_event() {
        let td = TestDependencies::new().with_scheduler(MockScheduler::new().with_failing_upserts());
        create_event(&td.deps(), valid_job()).await.unwrap();

        let event = td.store.only_event();
        assert_eq!(event.remind_schedule, None);
        assert_eq!(td.chat.posts().len(), 1);
    }
}
