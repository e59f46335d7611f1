//! Gate-check and show the notice creation form.
//!
//! The same gates run again on submission; passing here only means the form
//! is worth showing.

use discord::{InteractionResponse, TextInput};

use crate::common::actions::Action;
use crate::common::ActionError;
use crate::domains::notices::actions::check_creation_gates;
use crate::kernel::BotDeps;

pub async fn open_notice_form(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
    user_id: &str,
) -> Result<InteractionResponse, ActionError> {
    check_creation_gates(deps, guild_id, event_id, user_id).await?;

    Ok(InteractionResponse::modal(
        Action::NoticeModal(event_id.to_string()).encode(),
        "Post a notice",
        vec![
            TextInput::short("title", "Title"),
            TextInput::paragraph("body", "Body"),
            TextInput::short("remind_at", "Reminder time")
                .optional()
                .max_length(16)
                .placeholder("e.g. 2026-01-18 21:00"),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BaseStore;
    use crate::kernel::test_dependencies::{sample_event, sample_notice, TestDependencies};

    #[tokio::test]
    async fn test_creator_without_open_notice_gets_form() {
        let td = TestDependencies::new();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();

        let response = open_notice_form(&td.deps(), "g", "EVT#1", "creator")
            .await
            .unwrap();
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["type"], 9);
        assert_eq!(wire["data"]["custom_id"], "notice_modal:EVT#1");
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let td = TestDependencies::new();
        let err = open_notice_form(&td.deps(), "g", "EVT#missing", "creator")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::NotFound("event")));
    }

    #[tokio::test]
    async fn test_authorization_precedes_conflict() {
        // A non-creator is refused with Forbidden even though an open notice
        // exists and would also be a conflict.
        let td = TestDependencies::new();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();
        td.store
            .put_notice(&sample_notice("g", "NTC#1", "EVT#1", "creator"))
            .await
            .unwrap();

        let err = open_notice_form(&td.deps(), "g", "EVT#1", "intruder")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_open_notice_is_conflict_for_creator() {
        let td = TestDependencies::new();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();
        td.store
            .put_notice(&sample_notice("g", "NTC#1", "EVT#1", "creator"))
            .await
            .unwrap();

        let err = open_notice_form(&td.deps(), "g", "EVT#1", "creator")
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_closed_notice_does_not_block_form() {
        use crate::domains::notices::models::NoticeRecord;

        let td = TestDependencies::new();
        td.store
            .put_event(&sample_event("g", "EVT#1", "creator"))
            .await
            .unwrap();
        let mut notice = sample_notice("g", "NTC#1", "EVT#1", "creator");
        notice.status = NoticeRecord::STATUS_CLOSED.to_string();
        td.store.put_notice(&notice).await.unwrap();

        assert!(open_notice_form(&td.deps(), "g", "EVT#1", "creator")
            .await
            .is_ok());
    }
}
