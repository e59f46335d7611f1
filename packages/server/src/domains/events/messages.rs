//! Recruitment message rendering.
//!
//! Re-render policy: read current aggregate state, rebuild the whole message,
//! overwrite by id. Concurrent updates interleave and the last writer wins.

use discord::{button_style, ActionRow, Button, Message};
use tracing::warn;

use crate::common::actions::Action;
use crate::common::time::format_wall_clock;
use crate::domains::events::models::EventRecord;
use crate::kernel::BotDeps;

fn decorate_title(title: &str) -> String {
    let line = "━━━━━━━━━━━━━━";
    format!("{line}\n **{title}** \n{line}")
}

/// Build the recruitment message for the current event state.
pub fn build_recruit_message(event: &EventRecord, member_names: &[String]) -> Message {
    let closed = !event.is_open();

    let roster = if member_names.is_empty() {
        "- nobody yet".to_string()
    } else {
        member_names
            .iter()
            .map(|name| format!("- {name}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut content = format!(
        "📣 Looking for participants\n{}\n",
        decorate_title(&event.title)
    );
    content.push_str(&format!(
        "📅 **Starts**: {}\n",
        format_wall_clock(&event.start_at)
    ));
    content.push_str(&format!("\n**Participants**\n{roster}\n\n"));
    if closed {
        content.push_str("🔒 **Recruitment closed**\n");
    } else {
        content.push_str("Use the buttons below to join or withdraw!");
    }

    let event_id = event.event_id.clone();
    let join = Button::new(
        button_style::PRIMARY,
        "Join",
        Action::JoinEvent(event_id.clone()).encode(),
    )
    .disabled(closed);
    let leave = Button::new(
        button_style::DANGER,
        "Withdraw",
        Action::LeaveEvent(event_id.clone()).encode(),
    );
    let close = Button::new(
        button_style::SECONDARY,
        "Close",
        Action::CloseEvent(event_id.clone()).encode(),
    )
    .disabled(closed);
    let notice_open = Button::new(
        button_style::SECONDARY,
        "New notice",
        Action::NoticeOpen(event_id.clone()).encode(),
    );
    let notice_list = Button::new(
        button_style::SECONDARY,
        "Notices",
        Action::NoticeList(event_id).encode(),
    );

    Message::with_components(
        content,
        vec![
            ActionRow::new(vec![join.into(), leave.into(), close.into()]),
            ActionRow::new(vec![notice_open.into(), notice_list.into()]),
        ],
    )
}

/// Re-render the recruitment message from current store state.
///
/// Missing event or message location is logged and skipped - there is
/// nothing to overwrite.
pub async fn refresh_recruit_message(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
) -> anyhow::Result<()> {
    let Some(event) = deps.store.get_event(guild_id, event_id).await? else {
        warn!(%guild_id, %event_id, "Recruit refresh: event not found");
        return Ok(());
    };

    let Some(message_id) = event.recruit_message_id.clone() else {
        warn!(%event_id, "Recruit refresh: message id not back-filled yet");
        return Ok(());
    };

    let mut members = deps.store.list_members(guild_id, event_id).await?;
    members.sort_by(|a, b| a.joined_at.cmp(&b.joined_at));
    let member_names: Vec<String> = members.into_iter().map(|m| m.username).collect();

    let message = build_recruit_message(&event, &member_names);
    deps.chat
        .edit_message(&event.recruit_channel_id, &message_id, &message)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::sample_event;

    #[test]
    fn test_open_event_keeps_join_enabled() {
        let event = sample_event("g", "EVT#1", "creator");
        let message = build_recruit_message(&event, &[]);
        assert_eq!(message.components.len(), 2);
        assert!(message.content.contains("2026-01-19 21:00"));
        assert!(message.content.contains("- nobody yet"));
    }

    #[test]
    fn test_closed_event_shows_closed_marker() {
        let mut event = sample_event("g", "EVT#1", "creator");
        event.status = EventRecord::STATUS_CLOSED.to_string();
        let message = build_recruit_message(&event, &["alice".to_string()]);
        assert!(message.content.contains("Recruitment closed"));
        assert!(message.content.contains("- alice"));
    }
}
