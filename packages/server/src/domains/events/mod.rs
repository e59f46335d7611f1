//! Event lifecycle: recruit, join/leave, close, day-before reminder.

pub mod actions;
pub mod messages;
pub mod models;
