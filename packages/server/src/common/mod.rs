//! Shared helpers: action tags, domain errors, ids, tenant wall-clock time.

pub mod actions;
pub mod error;
pub mod id;
pub mod time;
pub mod types;

pub use actions::Action;
pub use error::ActionError;
pub use types::RemindOutcome;
