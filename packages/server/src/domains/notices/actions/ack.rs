//! Acknowledge a notice.
//!
//! Only current members of the notice's event may confirm, only while the
//! notice is open; the duplicate signal is the store's rejected conditional
//! write.

use chrono::Utc;

use crate::common::ActionError;
use crate::domains::events::models::MemberRecord;
use crate::domains::notices::messages::refresh_notice_message;
use crate::domains::notices::models::AckRecord;
use crate::kernel::BotDeps;

pub async fn acknowledge_notice(
    deps: &BotDeps,
    guild_id: &str,
    notice_id: &str,
    user_id: &str,
    username: &str,
) -> Result<(), ActionError> {
    let notice = deps
        .store
        .get_notice(guild_id, notice_id)
        .await?
        .ok_or(ActionError::NotFound("notice"))?;

    if !notice.is_open() {
        return Err(ActionError::Closed("notice"));
    }

    let member_key = MemberRecord::key(&notice.event_id, user_id);
    if deps.store.get_member(guild_id, &member_key).await?.is_none() {
        return Err(ActionError::NotAMember);
    }

    let ack = AckRecord {
        guild_id: guild_id.to_string(),
        ack_key: AckRecord::key(notice_id, user_id),
        notice_id: notice_id.to_string(),
        event_id: notice.event_id.clone(),
        user_id: user_id.to_string(),
        username: username.to_string(),
        acked_at: Utc::now(),
    };
    if !deps.store.insert_ack(&ack).await? {
        return Err(ActionError::Conflict("You have already confirmed"));
    }

    // The updated count is the visible effect of the ack; a failed edit
    // surfaces as a generic failure at the boundary.
    refresh_notice_message(deps, &notice).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BaseStore;
    use crate::domains::notices::models::NoticeRecord;
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
        td.store
            .insert_member(&sample_member("g", "EVT#1", "u1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_member_ack_updates_count_in_message() {
        let td = TestDependencies::new();
        seed(&td).await;

        acknowledge_notice(&td.deps(), "g", "NTC#1", "u1", "alice")
            .await
            .unwrap();

        assert_eq!(td.store.ack_count(), 1);
        let (channel, message_id, message) = td.chat.last_edit().unwrap();
        assert_eq!(channel, "notice-chan");
        assert_eq!(message_id, "notice-msg");
        assert!(message.content.contains("1 / 1"));
    }

    #[tokio::test]
    async fn test_second_ack_is_conflict_with_one_record() {
        let td = TestDependencies::new();
        seed(&td).await;
        let deps = td.deps();

        acknowledge_notice(&deps, "g", "NTC#1", "u1", "alice")
            .await
            .unwrap();
        let err = acknowledge_notice(&deps, "g", "NTC#1", "u1", "alice")
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::Conflict(_)));
        assert_eq!(td.store.ack_count(), 1);
    }

    #[tokio::test]
    async fn test_non_member_cannot_ack() {
        let td = TestDependencies::new();
        seed(&td).await;

        let err = acknowledge_notice(&td.deps(), "g", "NTC#1", "outsider", "bob")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::NotAMember));
        assert_eq!(td.store.ack_count(), 0);
    }

    #[tokio::test]
    async fn test_closed_notice_refuses_ack() {
        let td = TestDependencies::new();
        seed(&td).await;
        let mut notice = td.store.only_notice();
        notice.status = NoticeRecord::STATUS_CLOSED.to_string();
        td.store.put_notice(&notice).await.unwrap();

        let err = acknowledge_notice(&td.deps(), "g", "NTC#1", "u1", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Closed(_)));
        assert_eq!(td.store.ack_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_rerender_surfaces_as_upstream() {
        use crate::kernel::test_dependencies::MockChat;

        let td = TestDependencies::new().with_chat(MockChat::new().with_failing_sends());
        seed(&td).await;

        let err = acknowledge_notice(&td.deps(), "g", "NTC#1", "u1", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Upstream(_)));
        // The conditional write already landed; only the re-render failed.
        assert_eq!(td.store.ack_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_notice_is_not_found() {
        let td = TestDependencies::new();
        let err = acknowledge_notice(&td.deps(), "g", "NTC#missing", "u1", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::NotFound("notice")));
    }
}
