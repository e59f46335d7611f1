//! Join an open event.
//!
//! Uniqueness rides on the store's conditional create, not a prior read: the
//! duplicate signal is the rejected write itself, so two racing joins resolve
//! to exactly one member record. The status gate is still read-then-act.

use chrono::Utc;
use tracing::error;

use crate::common::ActionError;
use crate::domains::events::messages::refresh_recruit_message;
use crate::domains::events::models::MemberRecord;
use crate::kernel::BotDeps;

pub async fn join_event(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
    user_id: &str,
    username: &str,
) -> Result<(), ActionError> {
    let event = deps
        .store
        .get_event(guild_id, event_id)
        .await?
        .ok_or(ActionError::NotFound("event"))?;

    if !event.is_open() {
        return Err(ActionError::Closed("event"));
    }

    let member = MemberRecord {
        guild_id: guild_id.to_string(),
        member_key: MemberRecord::key(event_id, user_id),
        event_id: event_id.to_string(),
        user_id: user_id.to_string(),
        username: username.to_string(),
        joined_at: Utc::now(),
    };
    if !deps.store.insert_member(&member).await? {
        return Err(ActionError::Conflict("You have already joined this event"));
    }

    // The join stands even if the roster re-render fails.
    if let Err(e) = refresh_recruit_message(deps, guild_id, event_id).await {
        error!(error = %e, %event_id, "Recruit message refresh failed after join");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BaseStore;
    use crate::domains::events::models::EventRecord;
    use crate::kernel::test_dependencies::{sample_event, TestDependencies};

    #[tokio::test]
    async fn test_join_records_member_and_rerenders() {
        let td = TestDependencies::new();
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        join_event(&deps, "g", "EVT#1", "u1", "alice").await.unwrap();

        assert_eq!(td.store.member_count(), 1);
        let (_, _, message) = td.chat.last_edit().unwrap();
        assert!(message.content.contains("- alice"));
    }

    #[tokio::test]
    async fn test_second_join_is_conflict_with_one_record() {
        let td = TestDependencies::new();
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        join_event(&deps, "g", "EVT#1", "u1", "alice").await.unwrap();
        let err = join_event(&deps, "g", "EVT#1", "u1", "alice")
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::Conflict(_)));
        assert_eq!(td.store.member_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_joins_resolve_to_one_member() {
        let td = TestDependencies::new();
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            join_event(&deps, "g", "EVT#1", "u1", "alice"),
            join_event(&deps, "g", "EVT#1", "u1", "alice"),
        );

        assert_eq!(td.store.member_count(), 1);
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let conflict = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
        assert!(matches!(conflict, ActionError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_join_closed_event_is_refused() {
        let td = TestDependencies::new();
        let deps = td.deps();
        let mut event = sample_event("g", "EVT#1", "creator");
        event.status = EventRecord::STATUS_CLOSED.to_string();
        td.store.put_event(&event).await.unwrap();

        let err = join_event(&deps, "g", "EVT#1", "u1", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Closed(_)));
        assert_eq!(td.store.member_count(), 0);
    }

    #[tokio::test]
    async fn test_join_stands_even_if_rerender_fails() {
        use crate::kernel::test_dependencies::MockChat;

        let td = TestDependencies::new().with_chat(MockChat::new().with_failing_sends());
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        join_event(&deps, "g", "EVT#1", "u1", "alice").await.unwrap();
        assert_eq!(td.store.member_count(), 1);
    }

    #[tokio::test]
    async fn test_join_unknown_event_is_not_found() {
        let td = TestDependencies::new();
        let err = join_event(&td.deps(), "g", "EVT#missing", "u1", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::NotFound("event")));
    }
}
