//! Notice lifecycle: creation form, acknowledgment, close/hide/show, list,
//! acknowledgment reminder.

pub mod actions;
pub mod messages;
pub mod models;
