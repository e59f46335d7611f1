//! Close, hide, and show notices. All three are restricted to the *event's*
//! creator and hand back the refreshed list view.
//!
//! Close is monotonic and tears down the reminder schedule; hide/show touch
//! only the visibility flag and are idempotent at the data level.

use chrono::Utc;
use discord::ResponseData;
use tracing::{error, info};

use crate::common::ActionError;
use crate::domains::notices::actions::list::list_notices;
use crate::domains::notices::messages::refresh_notice_message;
use crate::domains::notices::models::NoticeRecord;
use crate::kernel::{notice_remind_schedule_name, BotDeps};

pub async fn close_notice(
    deps: &BotDeps,
    guild_id: &str,
    notice_id: &str,
    user_id: &str,
) -> Result<ResponseData, ActionError> {
    let mut notice = authorize(deps, guild_id, notice_id, user_id).await?;

    if !notice.is_open() {
        return Err(ActionError::Closed("notice"));
    }

    notice.status = NoticeRecord::STATUS_CLOSED.to_string();
    notice.closed_at = Some(Utc::now());
    deps.store.put_notice(&notice).await?;
    info!(%notice_id, "Notice closed");

    // The schedule may still fire before this lands; the reminder handler
    // re-checks status, so a failed delete only costs a benign skip.
    let schedule_name = notice_remind_schedule_name(guild_id, notice_id);
    if let Err(e) = deps.scheduler.delete(&schedule_name).await {
        error!(error = %e, %notice_id, "Reminder schedule delete failed");
    }

    // Removes the acknowledge control. The close stands even if the edit
    // fails.
    if let Err(e) = refresh_notice_message(deps, &notice).await {
        error!(error = %e, %notice_id, "Notice message refresh failed after close");
    }

    list_notices(deps, guild_id, &notice.event_id).await
}

pub async fn hide_notice(
    deps: &BotDeps,
    guild_id: &str,
    notice_id: &str,
    user_id: &str,
) -> Result<ResponseData, ActionError> {
    set_hidden(deps, guild_id, notice_id, user_id, true).await
}

pub async fn show_notice(
    deps: &BotDeps,
    guild_id: &str,
    notice_id: &str,
    user_id: &str,
) -> Result<ResponseData, ActionError> {
    set_hidden(deps, guild_id, notice_id, user_id, false).await
}

async fn set_hidden(
    deps: &BotDeps,
    guild_id: &str,
    notice_id: &str,
    user_id: &str,
    hidden: bool,
) -> Result<ResponseData, ActionError> {
    let mut notice = authorize(deps, guild_id, notice_id, user_id).await?;

    notice.hidden = hidden;
    deps.store.put_notice(&notice).await?;

    list_notices(deps, guild_id, &notice.event_id).await
}

/// Load the notice and its event; require the event's creator.
async fn authorize(
    deps: &BotDeps,
    guild_id: &str,
    notice_id: &str,
    user_id: &str,
) -> Result<NoticeRecord, ActionError> {
    let notice = deps
        .store
        .get_notice(guild_id, notice_id)
        .await?
        .ok_or(ActionError::NotFound("notice"))?;

    let event = deps
        .store
        .get_event(guild_id, &notice.event_id)
        .await?
        .ok_or(ActionError::NotFound("event"))?;

    if event.creator_id != user_id {
        return Err(ActionError::Forbidden(
            "Only the event creator can manage notices",
        ));
    }

    Ok(notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BaseStore;
    use crate::domains::notices::actions::acknowledge_notice;
    use crate::kernel::test_dependencies::{
        sample_event, sample_member, sample_notice, TestDependencies,
    };

    async fn seed(td: &TestDependencies) {
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();
        td.store
            .put_notice(&sample_notice("g", "NTC#1", "EVT#1", "creator"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_close_removes_schedule_and_ack_control() {
        let td = TestDependencies::new();
        seed(&td).await;

        close_notice(&td.deps(), "g", "NTC#1", "creator")
            .await
            .unwrap();

        let notice = td.store.only_notice();
        assert_eq!(notice.status, NoticeRecord::STATUS_CLOSED);
        assert!(notice.closed_at.is_some());

        let deletes = td.scheduler.deletes();
        assert_eq!(deletes.len(), 1);
        assert!(deletes[0].starts_with("ntc-g-"));

        // Re-rendered without the acknowledge button.
        let (_, _, message) = td.chat.last_edit().unwrap();
        assert!(message.components.is_empty());
    }

    #[tokio::test]
    async fn test_ack_after_close_is_refused() {
        let td = TestDependencies::new();
        seed(&td).await;
        td.store
            .insert_member(&sample_member("g", "EVT#1", "u1"))
            .await
            .unwrap();
        let deps = td.deps();

        close_notice(&deps, "g", "NTC#1", "creator").await.unwrap();
        let err = acknowledge_notice(&deps, "g", "NTC#1", "u1", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Closed(_)));
    }

    #[tokio::test]
    async fn test_double_close_is_refused() {
        let td = TestDependencies::new();
        seed(&td).await;
        let deps = td.deps();

        close_notice(&deps, "g", "NTC#1", "creator").await.unwrap();
        let err = close_notice(&deps, "g", "NTC#1", "creator")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Closed(_)));
        assert_eq!(td.store.only_notice().status, NoticeRecord::STATUS_CLOSED);
    }

    #[tokio::test]
    async fn test_moderation_requires_event_creator() {
        let td = TestDependencies::new();
        seed(&td).await;
        // The notice's own creator field does not grant access; the event's
        // creator does.
        let mut notice = td.store.only_notice();
        notice.creator_id = "someone-else".to_string();
        td.store.put_notice(&notice).await.unwrap();

        let err = close_notice(&td.deps(), "g", "NTC#1", "someone-else")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_hide_and_show_toggle_only_visibility() {
        let td = TestDependencies::new();
        seed(&td).await;
        let deps = td.deps();

        hide_notice(&deps, "g", "NTC#1", "creator").await.unwrap();
        let notice = td.store.only_notice();
        assert!(notice.hidden);
        assert_eq!(notice.status, NoticeRecord::STATUS_OPEN);

        // Hiding again is a data-level no-op.
        hide_notice(&deps, "g", "NTC#1", "creator").await.unwrap();
        assert!(td.store.only_notice().hidden);

        show_notice(&deps, "g", "NTC#1", "creator").await.unwrap();
        assert!(!td.store.only_notice().hidden);
    }

    #[tokio::test]
    async fn test_moderation_returns_list_view() {
        let td = TestDependencies::new();
        seed(&td).await;

        let data = hide_notice(&td.deps(), "g", "NTC#1", "creator")
            .await
            .unwrap();
        assert!(data.content.unwrap().contains("**Hidden**"));
    }
}
