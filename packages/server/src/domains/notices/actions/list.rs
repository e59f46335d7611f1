//! Ephemeral notice list for an event, newest first.

use discord::ResponseData;

use crate::common::ActionError;
use crate::domains::notices::messages::build_notice_list;
use crate::kernel::BotDeps;

pub async fn list_notices(
    deps: &BotDeps,
    guild_id: &str,
    event_id: &str,
) -> Result<ResponseData, ActionError> {
    let mut notices = deps.store.list_notices(guild_id, event_id).await?;
    notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(build_notice_list(guild_id, &notices))
}
