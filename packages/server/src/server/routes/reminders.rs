//! Scheduler callback: a fired schedule POSTs its kind-tagged payload here.
//!
//! The payload is an instruction; the handlers re-read current state and
//! report benign skips instead of failing on stale firings.

use axum::{extract::Extension, Json};
use serde::Serialize;
use tracing::error;

use crate::common::RemindOutcome;
use crate::domains::{events, notices};
use crate::kernel::ReminderJob;
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct FireResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<&'static str>,
}

pub async fn reminders_handler(
    Extension(state): Extension<AppState>,
    Json(job): Json<ReminderJob>,
) -> Json<FireResponse> {
    let outcome = match &job {
        ReminderJob::EventRemind { guild_id, event_id } => {
            events::actions::remind_event(&state.deps, guild_id, event_id).await
        }
        ReminderJob::NoticeRemind {
            guild_id,
            event_id,
            notice_id,
            ..
        } => notices::actions::remind_notice(&state.deps, guild_id, event_id, notice_id).await,
    };

    match outcome {
        Ok(RemindOutcome::Sent { .. }) => Json(FireResponse {
            ok: true,
            skipped: None,
        }),
        Ok(RemindOutcome::Skipped(reason)) => Json(FireResponse {
            ok: true,
            skipped: Some(reason),
        }),
        Err(e) => {
            error!(error = %e, job = ?job, "Reminder delivery failed");
            Json(FireResponse {
                ok: false,
                skipped: None,
            })
        }
    }
}
