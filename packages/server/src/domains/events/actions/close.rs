//! Close recruitment for an event. Creator-only, monotonic: there is no
//! reopen.

use tracing::{error, info};

use crate::common::ActionError;
use crate::domains::events::messages::refresh_recruit_message;
use crate::domains::events::models::EventRecord;
use crate::kernel::BotDeps;

pub async fn close_event(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
    user_id: &str,
) -> Result<(), ActionError> {
    let mut event = deps
        .store
        .get_event(guild_id, event_id)
        .await?
        .ok_or(ActionError::NotFound("event"))?;

    if event.creator_id != user_id {
        return Err(ActionError::Forbidden(
            "Only the event creator can close recruitment",
        ));
    }
    if !event.is_open() {
        return Err(ActionError::Closed("event"));
    }

    event.status = EventRecord::STATUS_CLOSED.to_string();
    deps.store.put_event(&event).await?;
    info!(%event_id, %guild_id, "Event closed");

    if let Err(e) = refresh_recruit_message(deps, guild_id, event_id).await {
        error!(error = %e, %event_id, "Recruit message refresh failed after close");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BaseStore;
    use crate::domains::events::actions::join_event;
    use crate::kernel::test_dependencies::{sample_event, TestDependencies};

    #[tokio::test]
    async fn test_creator_closes_event() {
        let td = TestDependencies::new();
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        close_event(&deps, "g", "EVT#1", "creator").await.unwrap();
        let event = td.store.only_event();
        assert_eq!(event.status, EventRecord::STATUS_CLOSED);

        let (_, _, message) = td.chat.last_edit().unwrap();
        assert!(message.content.contains("Recruitment closed"));
    }

    #[tokio::test]
    async fn test_non_creator_is_forbidden() {
        let td = TestDependencies::new();
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        let err = close_event(&deps, "g", "EVT#1", "intruder")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Forbidden(_)));
        assert_eq!(td.store.only_event().status, EventRecord::STATUS_OPEN);
    }

    #[tokio::test]
    async fn test_double_close_is_refused() {
        let td = TestDependencies::new();
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        close_event(&deps, "g", "EVT#1", "creator").await.unwrap();
        let err = close_event(&deps, "g", "EVT#1", "creator")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Closed(_)));
    }

    #[tokio::test]
    async fn test_status_is_monotonic_join_after_close_refused() {
        let td = TestDependencies::new();
        let deps = td.deps();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        close_event(&deps, "g", "EVT#1", "creator").await.unwrap();
        let err = join_event(&deps, "g", "EVT#1", "u1", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Closed(_)));
        assert_eq!(td.store.only_event().status, EventRecord::STATUS_CLOSED);
    }

    #[tokio::test]
    async fn test_close_unknown_event_is_not_found() {
        let td = TestDependencies::new();
        let err = close_event(&td.deps(), "g", "EVT#missing", "creator")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::NotFound("event")));
    }
}
