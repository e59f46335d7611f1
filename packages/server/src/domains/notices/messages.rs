//! Notice message and list-view rendering.

use discord::{
    button_style, message_link, ActionRow, Button, Message, ResponseData, EPHEMERAL,
};
use tracing::warn;

use crate::common::actions::Action;
use crate::domains::notices::models::NoticeRecord;
use crate::kernel::BotDeps;

// Platform hard caps for interactive elements, not business rules.
const MAX_ROWS_PER_LIST: usize = 5;
const MAX_NOTICES_PER_GROUP: usize = 10;

/// Build the posted notice message for the current state.
///
/// The acknowledge control exists only while the notice is open; closing
/// re-renders without it.
pub fn build_notice_message(notice: &NoticeRecord, ack_count: usize, member_count: usize) -> Message {
    let mut content = format!(
        "📣 **Notice**\n**{}**\n\n{}\n\n✅ Confirmed: **{ack_count} / {member_count}**\n",
        notice.title, notice.body
    );

    if !notice.is_open() {
        content.push_str("🔒 **Confirmations are closed**\n");
        return Message::text(content);
    }

    let ack = Button::new(
        button_style::SUCCESS,
        "Confirm",
        Action::NoticeAck(notice.notice_id.clone()).encode(),
    );
    Message::with_components(content, vec![ActionRow::new(vec![ack.into()])])
}

/// Re-render the posted notice message from current store state.
pub async fn refresh_notice_message(deps: &BotDeps, notice: &NoticeRecord) -> anyhow::Result<()> {
    let Some(message_id) = notice.message_id.clone() else {
        warn!(notice_id = %notice.notice_id, "Notice refresh: message id not back-filled yet");
        return Ok(());
    };

    let ack_count = deps
        .store
        .list_acks(&notice.guild_id, &notice.notice_id)
        .await?
        .len();
    let member_count = deps
        .store
        .list_members(&notice.guild_id, &notice.event_id)
        .await?
        .len();

    let message = build_notice_message(notice, ack_count, member_count);
    deps.chat
        .edit_message(&notice.channel_id, &message_id, &message)
        .await
}

fn notice_row(guild_id: &str, notice: &NoticeRecord) -> ActionRow {
    let mut buttons = Vec::new();

    if let Some(message_id) = &notice.message_id {
        buttons.push(Button::link("Open", message_link(guild_id, &notice.channel_id, message_id)).into());
    }

    if notice.hidden {
        buttons.push(
            Button::new(
                button_style::SECONDARY,
                "Show",
                Action::NoticeShow(notice.notice_id.clone()).encode(),
            )
            .into(),
        );
    } else {
        if notice.is_open() {
            buttons.push(
                Button::new(
                    button_style::SECONDARY,
                    "Close",
                    Action::NoticeClose(notice.notice_id.clone()).encode(),
                )
                .into(),
            );
        }
        buttons.push(
            Button::new(
                button_style::SECONDARY,
                "Hide",
                Action::NoticeHide(notice.notice_id.clone()).encode(),
            )
            .into(),
        );
    }

    ActionRow::new(buttons)
}

/// Ephemeral list view: newest first, visible and hidden groups, each row
/// carrying the controls its (status, visibility) combination allows.
///
/// Callers pass notices already ordered newest-first.
pub fn build_notice_list(guild_id: &str, notices: &[NoticeRecord]) -> ResponseData {
    let visible: Vec<&NoticeRecord> = notices.iter().filter(|n| !n.hidden).collect();
    let hidden: Vec<&NoticeRecord> = notices.iter().filter(|n| n.hidden).collect();

    let mut lines = vec!["📜 **Notices for this event**".to_string()];
    if notices.is_empty() {
        lines.push("(no notices yet)".to_string());
    }

    let mut rows = Vec::new();

    if !visible.is_empty() {
        lines.push("\n**Visible**".to_string());
        for notice in visible.iter().take(MAX_NOTICES_PER_GROUP) {
            lines.push(format!("- {} ({})", notice.title, notice.status));
            rows.push(notice_row(guild_id, notice));
        }
    }

    if !hidden.is_empty() {
        lines.push("\n**Hidden**".to_string());
        for notice in hidden.iter().take(MAX_NOTICES_PER_GROUP) {
            lines.push(format!("- {} ({})", notice.title, notice.status));
            rows.push(notice_row(guild_id, notice));
        }
    }

    rows.truncate(MAX_ROWS_PER_LIST);

    ResponseData {
        content: Some(lines.join("\n")),
        flags: Some(EPHEMERAL),
        components: rows,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::sample_notice;

    #[test]
    fn test_open_notice_has_ack_control() {
        let notice = sample_notice("g", "NTC#1", "EVT#1", "creator");
        let message = build_notice_message(&notice, 2, 5);
        assert!(message.content.contains("2 / 5"));
        assert_eq!(message.components.len(), 1);
    }

    #[test]
    fn test_closed_notice_has_no_controls() {
        let mut notice = sample_notice("g", "NTC#1", "EVT#1", "creator");
        notice.status = NoticeRecord::STATUS_CLOSED.to_string();
        let message = build_notice_message(&notice, 2, 5);
        assert!(message.content.contains("Confirmations are closed"));
        assert!(message.components.is_empty());
    }

    #[test]
    fn test_list_caps_rows_and_group_sizes() {
        let mut notices = Vec::new();
        for i in 0..12 {
            let mut n = sample_notice("g", &format!("NTC#{i}"), "EVT#1", "creator");
            n.title = format!("visible-{i}");
            notices.push(n);
        }
        for i in 0..3 {
            let mut n = sample_notice("g", &format!("NTC#h{i}"), "EVT#1", "creator");
            n.title = format!("hidden-{i}");
            n.hidden = true;
            notices.push(n);
        }

        let data = build_notice_list("g", &notices);
        let content = data.content.unwrap();

        let visible_lines = content.matches("- visible-").count();
        let hidden_lines = content.matches("- hidden-").count();
        assert_eq!(visible_lines, 10);
        assert_eq!(hidden_lines, 3);
        assert!(data.components.len() <= 5);
    }

    #[test]
    fn test_empty_list_has_placeholder() {
        let data = build_notice_list("g", &[]);
        assert!(data.content.unwrap().contains("(no notices yet)"));
        assert!(data.components.is_empty());
    }
}
