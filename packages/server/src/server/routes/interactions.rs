//! Platform webhook: dispatch one inbound interaction.
//!
//! Signature verification happens upstream of this server; by the time a
//! request lands here it is trusted. Every path returns a structured
//! response - engine refusals become ephemeral replies, and nothing
//! propagates as a raw fault.

use axum::{extract::Extension, Json};
use discord::{Interaction, InteractionKind, InteractionResponse};
use tracing::error;

use crate::common::{Action, ActionError};
use crate::domains::{events, notices};
use crate::kernel::{CreateEventJob, Submit, WorkerJob};
use crate::server::app::AppState;

pub async fn interactions_handler(
    Extension(state): Extension<AppState>,
    Json(interaction): Json<Interaction>,
) -> Json<InteractionResponse> {
    let response = match interaction.kind() {
        InteractionKind::Ping => InteractionResponse::pong(),
        InteractionKind::Command => handle_command(&state, &interaction),
        InteractionKind::Component => handle_component(&state, &interaction).await,
        InteractionKind::ModalSubmit => handle_modal(&state, &interaction).await,
        InteractionKind::Unknown => InteractionResponse::ephemeral("Unsupported interaction type"),
    };
    Json(response)
}

/// Acting user and tenant, present on guild-scoped interactions.
struct Actor<'a> {
    guild_id: &'a str,
    user_id: &'a str,
    username: &'a str,
}

fn actor(interaction: &Interaction) -> Option<Actor<'_>> {
    let guild_id = interaction.guild_id.as_deref()?;
    let user = interaction.user()?;
    Some(Actor {
        guild_id,
        user_id: &user.id,
        username: &user.username,
    })
}

fn guild_only() -> InteractionResponse {
    InteractionResponse::ephemeral("⛔ This only works inside a server")
}

/// Convert an engine refusal into the ephemeral reply the platform expects.
fn failure(err: ActionError) -> InteractionResponse {
    if let ActionError::Upstream(e) = &err {
        error!(error = ?e, "Upstream failure while handling interaction");
    }
    InteractionResponse::ephemeral(err.user_message())
}

fn handle_command(state: &AppState, interaction: &Interaction) -> InteractionResponse {
    let data = interaction.data.clone().unwrap_or_default();

    match data.name.as_deref() {
        Some("ping") => InteractionResponse::content("pong"),
        Some("event") => {
            let Some(actor) = actor(interaction) else {
                return guild_only();
            };
            let (Some(application_id), Some(token)) = (
                interaction.application_id.as_deref(),
                interaction.token.as_deref(),
            ) else {
                return InteractionResponse::ephemeral("❌ Malformed interaction");
            };
            let Some(channel_id) = interaction.channel.as_ref().map(|c| c.id.as_str()) else {
                return InteractionResponse::ephemeral("❌ Malformed interaction");
            };
            let Some(create) = data.subcommand("create") else {
                return InteractionResponse::ephemeral("Unknown command");
            };

            // Option values stay unvalidated here; the worker owns validation
            // and reports through the follow-up webhook.
            let job = WorkerJob::EventCreate(CreateEventJob {
                guild_id: actor.guild_id.to_string(),
                application_id: application_id.to_string(),
                token: token.to_string(),
                recruit_channel_id: channel_id.to_string(),
                creator_id: actor.user_id.to_string(),
                creator_name: actor.username.to_string(),
                title: create.get_str("title"),
                notice_channel_id: create.get_str("notice_channel"),
                start_at: create.get_str("start_at"),
            });

            match state.worker.submit(job) {
                Submit::Accepted => InteractionResponse::ephemeral("✅ Creating your event!"),
                Submit::Rejected => {
                    InteractionResponse::ephemeral("❌ Could not start event creation, try again")
                }
            }
        }
        _ => InteractionResponse::ephemeral("Unknown command"),
    }
}

async fn handle_component(state: &AppState, interaction: &Interaction) -> InteractionResponse {
    let Some(actor) = actor(interaction) else {
        return guild_only();
    };
    let custom_id = interaction
        .data
        .as_ref()
        .and_then(|d| d.custom_id.as_deref())
        .unwrap_or_default();
    let Some(action) = Action::decode(custom_id) else {
        return InteractionResponse::ephemeral("Unknown component");
    };
    let deps = &state.deps;

    match action {
        Action::JoinEvent(event_id) => {
            match events::actions::join_event(
                deps,
                actor.guild_id,
                &event_id,
                actor.user_id,
                actor.username,
            )
            .await
            {
                Ok(()) => InteractionResponse::ephemeral("✅ You're in!"),
                Err(err) => failure(err),
            }
        }
        Action::LeaveEvent(event_id) => {
            match events::actions::leave_event(deps, actor.guild_id, &event_id, actor.user_id)
                .await
            {
                Ok(()) => InteractionResponse::ephemeral("✅ Your participation was withdrawn"),
                Err(err) => failure(err),
            }
        }
        Action::CloseEvent(event_id) => {
            match events::actions::close_event(deps, actor.guild_id, &event_id, actor.user_id)
                .await
            {
                Ok(()) => InteractionResponse::ephemeral("🔒 Recruitment closed!"),
                Err(err) => failure(err),
            }
        }
        Action::NoticeOpen(event_id) => {
            match notices::actions::open_notice_form(deps, actor.guild_id, &event_id, actor.user_id)
                .await
            {
                Ok(modal) => modal,
                Err(err) => failure(err),
            }
        }
        Action::NoticeList(event_id) => {
            match notices::actions::list_notices(deps, actor.guild_id, &event_id).await {
                Ok(data) => InteractionResponse::message(data),
                Err(err) => failure(err),
            }
        }
        Action::NoticeAck(notice_id) => {
            match notices::actions::acknowledge_notice(
                deps,
                actor.guild_id,
                &notice_id,
                actor.user_id,
                actor.username,
            )
            .await
            {
                Ok(()) => InteractionResponse::ephemeral("✅ Confirmed!"),
                Err(err) => failure(err),
            }
        }
        Action::NoticeClose(notice_id) => {
            match notices::actions::close_notice(deps, actor.guild_id, &notice_id, actor.user_id)
                .await
            {
                Ok(data) => InteractionResponse::message(data),
                Err(err) => failure(err),
            }
        }
        Action::NoticeHide(notice_id) => {
            match notices::actions::hide_notice(deps, actor.guild_id, &notice_id, actor.user_id)
                .await
            {
                Ok(data) => InteractionResponse::message(data),
                Err(err) => failure(err),
            }
        }
        Action::NoticeShow(notice_id) => {
            match notices::actions::show_notice(deps, actor.guild_id, &notice_id, actor.user_id)
                .await
            {
                Ok(data) => InteractionResponse::message(data),
                Err(err) => failure(err),
            }
        }
        // The form tag arrives through modal submission, not a button.
        Action::NoticeModal(_) => InteractionResponse::ephemeral("Unknown component"),
    }
}

async fn handle_modal(state: &AppState, interaction: &Interaction) -> InteractionResponse {
    let Some(actor) = actor(interaction) else {
        return guild_only();
    };
    let data = interaction.data.clone().unwrap_or_default();
    let custom_id = data.custom_id.as_deref().unwrap_or_default();

    match Action::decode(custom_id) {
        Some(Action::NoticeModal(event_id)) => {
            let title = data.modal_value("title").unwrap_or_default();
            let body = data.modal_value("body").unwrap_or_default();
            let remind_at = data.modal_value("remind_at");

            match notices::actions::create_notice(
                &state.deps,
                actor.guild_id,
                &event_id,
                actor.user_id,
                actor.username,
                &title,
                &body,
                remind_at.as_deref(),
            )
            .await
            {
                Ok(()) => InteractionResponse::ephemeral("✅ Notice posted!"),
                Err(err) => failure(err),
            }
        }
        _ => InteractionResponse::ephemeral("Unknown modal"),
    }
}
