//! Entity id generation.
//!
//! Ids are opaque, prefixed by collection (`EVT#`, `NTC#`) so composite sort
//! keys built from them stay self-describing.

use uuid::Uuid;

pub fn new_event_id() -> String {
    format!("EVT#{}", Uuid::new_v4().simple())
}

pub fn new_notice_id() -> String {
    format!("NTC#{}", Uuid::new_v4().simple())
}
