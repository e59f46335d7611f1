//! Application setup and server configuration.
//!
//! Clients are constructed once here and injected everywhere - no global
//! handles. The deferred worker is spawned alongside the router and shares
//! the same dependency container.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use discord::{DiscordOptions, DiscordService};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::{
    spawn_worker, BotDeps, DiscordAdapter, PgStore, SchedulerClient, WorkerHandle,
};
use crate::server::routes::{health_handler, interactions_handler, reminders_handler};

/// Interaction bursts beyond this are rejected rather than queued; the
/// submit result tells the user to retry.
const WORKER_QUEUE_CAPACITY: usize = 64;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<BotDeps>,
    pub worker: WorkerHandle,
}

/// Build the Axum application router.
///
/// Returns (Router, Arc<BotDeps>) - deps are also needed by anything the
/// binary wires up beside the router.
pub fn build_app(pool: PgPool, config: &Config) -> (Router, Arc<BotDeps>) {
    let discord = Arc::new(DiscordService::new(DiscordOptions {
        bot_token: config.discord_bot_token.clone(),
    }));

    let scheduler = Arc::new(SchedulerClient::new(
        &config.scheduler_url,
        config.scheduler_token.as_deref(),
        &config.reminder_callback_url,
    ));

    let store = Arc::new(PgStore::new(pool.clone()));

    let deps = Arc::new(BotDeps::new(
        store,
        Arc::new(DiscordAdapter::new(discord)),
        scheduler,
    ));

    let worker = spawn_worker(deps.clone(), WORKER_QUEUE_CAPACITY);

    let app_state = AppState {
        db_pool: pool,
        deps: deps.clone(),
        worker,
    };

    let app = Router::new()
        .route("/interactions", post(interactions_handler))
        .route("/reminders/fire", post(reminders_handler))
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http());

    (app, deps)
}
