//! Domain engines: the event and notice lifecycles.

pub mod events;
pub mod notices;
