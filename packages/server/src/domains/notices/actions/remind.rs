//! Acknowledgment reminder, invoked by the scheduler callback.
//!
//! Re-reads the notice and computes the set still missing a confirmation;
//! anything stale (closed, vanished, fully confirmed) is a benign skip. The
//! re-read record, not the callback payload, decides where the message goes.

use anyhow::Result;
use discord::{message_link, Message};
use std::collections::BTreeSet;
use tracing::info;

use crate::common::RemindOutcome;
use crate::kernel::BotDeps;

pub async fn remind_notice(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
    notice_id: &str,
) -> Result<RemindOutcome> {
    let Some(notice) = deps.store.get_notice(guild_id, notice_id).await? else {
        info!(%guild_id, %notice_id, "Notice reminder skipped: notice not found");
        return Ok(RemindOutcome::Skipped("notice not found"));
    };

    if !notice.is_open() {
        info!(%notice_id, "Notice reminder skipped: notice closed");
        return Ok(RemindOutcome::Skipped("notice closed"));
    }

    let members: BTreeSet<String> = deps
        .store
        .list_members(guild_id, event_id)
        .await?
        .into_iter()
        .map(|m| m.user_id)
        .collect();
    let acked: BTreeSet<String> = deps
        .store
        .list_acks(guild_id, notice_id)
        .await?
        .into_iter()
        .map(|a| a.user_id)
        .collect();
    let unacked: Vec<&String> = members.difference(&acked).collect();

    if unacked.is_empty() {
        info!(%notice_id, "Notice reminder skipped: everyone confirmed");
        return Ok(RemindOutcome::Skipped("everyone confirmed"));
    }

    let mentions = unacked
        .iter()
        .map(|user_id| format!("<@{user_id}>"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut content = format!(
        "📣 **Confirmation reminder**\n\n**\u{201c}{}\u{201d}** is still waiting for you.\n",
        notice.title
    );
    if let Some(message_id) = &notice.message_id {
        content.push_str(&format!(
            "Confirm it here 👇\n{}\n",
            message_link(guild_id, &notice.channel_id, message_id)
        ));
    }
    content.push_str(&format!("\nNot yet confirmed:\n{mentions}"));

    deps.chat
        .post_message(&notice.channel_id, &Message::text(content))
        .await?;

    info!(%notice_id, mentioned = unacked.len(), "Notice reminder sent");
    Ok(RemindOutcome::Sent {
        mentioned: unacked.len(),
    })
}
