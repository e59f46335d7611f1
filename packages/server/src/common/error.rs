use thiserror::Error;

/// Failure taxonomy for engine operations.
///
/// Every variant except `Upstream` is a refusal with a message safe to show
/// the acting user verbatim; `Upstream` is logged in full and surfaced as a
/// generic failure.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("only event participants can confirm")]
    NotAMember,

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0} is closed")]
    Closed(&'static str),

    #[error("upstream call failed: {0}")]
    Upstream(#[from] anyhow::Error),
}

impl ActionError {
    /// Ephemeral-reply rendering used at the interaction boundary.
    pub fn user_message(&self) -> String {
        match self {
            ActionError::Validation(msg) => format!("❌ {msg}"),
            ActionError::NotFound(entity) => format!("❌ The {entity} could not be found"),
            ActionError::Forbidden(msg) => format!("⛔ {msg}"),
            ActionError::NotAMember => "⛔ Only event participants can confirm".to_string(),
            ActionError::Conflict(msg) => format!("⚠️ {msg}"),
            ActionError::Closed(entity) => format!("🔒 This {entity} is closed"),
            ActionError::Upstream(_) => "❌ Something went wrong, please try again".to_string(),
        }
    }
}
