//! Kernel module - infrastructure and injected dependencies.

pub mod deps;
pub mod pg_store;
pub mod scheduler_client;
pub mod test_dependencies;
pub mod traits;
pub mod worker;

pub use deps::{BotDeps, DiscordAdapter};
pub use pg_store::PgStore;
pub use scheduler_client::SchedulerClient;
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use worker::{spawn_worker, CreateEventJob, Submit, WorkerHandle, WorkerJob};
