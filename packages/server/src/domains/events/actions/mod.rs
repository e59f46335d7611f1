pub mod close;
pub mod create;
pub mod join;
pub mod leave;
pub mod remind;

pub use close::close_event;
pub use create::create_event;
pub use join::join_event;
pub use leave::leave_event;
pub use remind::remind_event;
