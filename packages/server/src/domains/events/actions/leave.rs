//! Withdraw from an event.
//!
//! Unconditional delete: leaving without a join record succeeds, and leaving
//! stays possible after the event closes.

use tracing::error;

use crate::common::ActionError;
use crate::domains::events::messages::refresh_recruit_message;
use crate::domains::events::models::MemberRecord;
use crate::kernel::BotDeps;

pub async fn leave_event(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
    user_id: &str,
) -> Result<(), ActionError> {
    deps.store
        .delete_member(guild_id, &MemberRecord::key(event_id, user_id))
        .await?;

    if let Err(e) = refresh_recruit_message(deps, guild_id, event_id).await {
        error!(error = %e, %event_id, "Recruit message refresh failed after leave");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BaseStore;
    use crate::domains::events::actions::join_event;
    use crate::domains::events::models::EventRecord;
    use crate::kernel::test_dependencies::{sample_event, TestDependencies};

    #[tokio::test]
    async fn test_leave_removes_member() {
        let td = TestDependencies::new();
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();
        join_event(&deps, "g", "EVT#1", "u1", "alice").await.unwrap();

        leave_event(&deps, "g", "EVT#1", "u1").await.unwrap();
        assert_eq!(td.store.member_count(), 0);
    }

    #[tokio::test]
    async fn test_leave_without_membership_is_noop() {
        let td = TestDependencies::new();
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();
        join_event(&deps, "g", "EVT#1", "u1", "alice").await.unwrap();

        leave_event(&deps, "g", "EVT#1", "stranger").await.unwrap();
        assert_eq!(td.store.member_count(), 1);
    }

    #[tokio::test]
    async fn test_leave_allowed_after_close() {
        let td = TestDependencies::new();
        let deps = td.deps();
        let mut event = sample_event("g", "EVT#1", "creator");
        td.store.put_event(&event).await.unwrap();
        join_event(&deps, "g", "EVT#1", "u1", "alice").await.unwrap();

        event.status = EventRecord::STATUS_CLOSED.to_string();
        td.store.put_event(&event).await.unwrap();

        leave_event(&deps, "g", "EVT#1", "u1").await.unwrap();
        assert_eq!(td.store.member_count(), 0);
    }
}
