pub mod ack;
pub mod create;
pub mod list;
pub mod moderate;
pub mod open_form;
pub mod remind;

pub use ack::acknowledge_notice;
pub use create::create_notice;
pub use list::list_notices;
pub use moderate::{close_notice, hide_notice, show_notice};
pub use open_form::open_notice_form;
pub use remind::remind_notice;

use crate::common::ActionError;
use crate::domains::events::models::EventRecord;
use crate::domains::notices::models::NoticeRecord;
use crate::kernel::{BaseStore, BotDeps};

/// Scan-based lookup of an event's OPEN notice.
///
/// Check-then-act: the scan is not atomic with the subsequent write, so two
/// racing creations can both pass and leave two OPEN notices. Kept as a
/// single seam so it could be replaced by a conditional write against a
/// per-event marker record without touching callers.
pub(crate) async fn find_open_notice(
    store: &dyn BaseStore,
    guild_id: &str,
    event_id: &str,
) -> anyhow::Result<Option<NoticeRecord>> {
    let notices = store.list_notices(guild_id, event_id).await?;
    Ok(notices.into_iter().find(|n| n.is_open()))
}

/// Gates shared by the creation form and the form submission, in order:
/// existence, then authorization, then the open-notice conflict. The
/// submission re-runs them as defense against a stale form.
pub(crate) async fn check_creation_gates(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
    user_id: &str,
) -> Result<EventRecord, ActionError> {
    let event = deps
        .store
        .get_event(guild_id, event_id)
        .await?
        .ok_or(ActionError::NotFound("event"))?;

    if event.creator_id != user_id {
        return Err(ActionError::Forbidden(
            "Only the event creator can post notices",
        ));
    }

    if find_open_notice(deps.store.as_ref(), guild_id, event_id)
        .await?
        .is_some()
    {
        return Err(ActionError::Conflict(
            "An open notice already exists; close it before posting another",
        ));
    }

    Ok(event)
}
