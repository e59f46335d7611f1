// HTTP routes
pub mod health;
pub mod interactions;
pub mod reminders;

pub use health::*;
pub use interactions::*;
pub use reminders::*;
