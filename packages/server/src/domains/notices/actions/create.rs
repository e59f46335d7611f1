//! Notice creation from a submitted form.
//!
//! Gate order: existence, authorization, open-notice conflict, then input
//! validation. The reminder-time parse runs before the store write so a
//! formatting mistake never leaves a partial notice behind. After the write:
//! optional schedule registration, message post, message-id back-fill.

use chrono::Utc;
use tracing::{error, info};

use crate::common::id::new_notice_id;
use crate::common::time::parse_wall_clock;
use crate::common::ActionError;
use crate::domains::notices::actions::check_creation_gates;
use crate::domains::notices::messages::build_notice_message;
use crate::domains::notices::models::NoticeRecord;
use crate::kernel::{notice_remind_schedule_name, BotDeps, ReminderJob};

#[allow(clippy::too_many_arguments)]
pub async fn create_notice(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
    user_id: &str,
    username: &str,
    title: &str,
    body: &str,
    remind_at_raw: Option<&str>,
) -> Result<(), ActionError> {
    let event = check_creation_gates(deps, guild_id, event_id, user_id).await?;

    let title = title.trim();
    let body = body.trim();
    if title.is_empty() || body.is_empty() {
        return Err(ActionError::Validation(
            "Title and body are required".to_string(),
        ));
    }

    let remind_at = match remind_at_raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(parse_wall_clock(raw).ok_or_else(|| {
            ActionError::Validation(
                "Enter the reminder time as `YYYY-MM-DD HH:MM`, e.g. 2026-01-18 21:00".to_string(),
            )
        })?),
        None => None,
    };

    let created_at = Utc::now();
    let notice_id = new_notice_id();
    let mut notice = NoticeRecord {
        guild_id: guild_id.to_string(),
        notice_id: notice_id.clone(),
        event_id: event_id.to_string(),
        event_sk: NoticeRecord::sort_key(event_id, &created_at, &notice_id),
        status: NoticeRecord::STATUS_OPEN.to_string(),
        hidden: false,
        channel_id: event.notice_channel_id.clone(),
        message_id: None,
        title: title.to_string(),
        body: body.to_string(),
        creator_id: user_id.to_string(),
        creator_name: username.to_string(),
        created_at,
        closed_at: None,
        remind_at: None,
        remind_schedule: None,
    };
    deps.store.put_notice(&notice).await?;

    if let Some(remind_at) = remind_at {
        let schedule_name = notice_remind_schedule_name(guild_id, &notice_id);
        let payload = ReminderJob::NoticeRemind {
            guild_id: guild_id.to_string(),
            event_id: event_id.to_string(),
            notice_id: notice_id.clone(),
            notice_channel_id: notice.channel_id.clone(),
        };
        match deps.scheduler.upsert(&schedule_name, remind_at, &payload).await {
            Ok(()) => {
                notice.remind_at = Some(remind_at);
                notice.remind_schedule = Some(schedule_name);
                deps.store.put_notice(&notice).await?;
            }
            Err(e) => {
                // The notice stands without its reminder.
                error!(
                    error = %e,
                    notice_id = %notice_id,
                    "Reminder registration failed; notice created without reminder"
                );
            }
        }
    }

    let member_count = deps.store.list_members(guild_id, event_id).await?.len();
    let message = build_notice_message(&notice, 0, member_count);
    let posted = deps.chat.post_message(&notice.channel_id, &message).await?;
    notice.message_id = Some(posted.id);
    deps.store.put_notice(&notice).await?;

    info!(%notice_id, %event_id, "Notice created");
    Ok(())
}
