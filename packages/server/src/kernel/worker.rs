//! Deferred worker for long-running interaction work.
//!
//! The platform discards replies that miss its latency budget, so event
//! creation (store write + announcement post + schedule registration) runs
//! off the request path. Hand-off is fire-and-forget: `submit` is a
//! non-blocking try-send with an explicit accepted/rejected result, the job
//! gets exactly one attempt, and failures are logged - there is no return
//! channel to the original caller and no retry.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::domains::events;
use crate::kernel::BotDeps;

/// Closed set of jobs the worker executes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkerJob {
    EventCreate(CreateEventJob),
}

/// Everything event creation needs, captured from the interaction before the
/// synchronous reply is sent. Option fields are user input the worker still
/// has to validate; feedback goes through the follow-up webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventJob {
    pub guild_id: String,
    pub application_id: String,
    pub token: String,
    pub recruit_channel_id: String,
    pub creator_id: String,
    pub creator_name: String,
    pub title: Option<String>,
    pub notice_channel_id: Option<String>,
    pub start_at: Option<String>,
}

/// Result of a hand-off attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    Accepted,
    Rejected,
}

/// Cheap clonable handle for submitting jobs to the worker task.
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<WorkerJob>,
}

impl WorkerHandle {
    /// Hand a job to the worker without waiting. A full or closed queue
    /// rejects the job; the caller reports the bare failure to the user.
    pub fn submit(&self, job: WorkerJob) -> Submit {
        match self.tx.try_send(job) {
            Ok(()) => Submit::Accepted,
            Err(e) => {
                error!(error = %e, "Worker rejected job");
                Submit::Rejected
            }
        }
    }
}

/// Spawn the worker task and return its submit handle.
pub fn spawn_worker(deps: Arc<BotDeps>, capacity: usize) -> WorkerHandle {
    let (tx, mut rx) = mpsc::channel::<WorkerJob>(capacity);

    tokio::spawn(async move {
        info!("Deferred worker started");
        while let Some(job) = rx.recv().await {
            if let Err(e) = run_job(&deps, job).await {
                // Terminal for this invocation: observable only here and in
                // the absence of the side effect.
                error!(error = %e, "Worker job failed");
            }
        }
        info!("Deferred worker stopped");
    });

    WorkerHandle { tx }
}

async fn run_job(deps: &BotDeps, job: WorkerJob) -> anyhow::Result<()> {
    match job {
        WorkerJob::EventCreate(job) => events::actions::create_event(deps, job).await,
    }
}
