//! Component action identifiers.
//!
//! Buttons and modals carry an opaque `"<action>:<entity_id>"` custom id on
//! the wire. It is decoded once at the interaction boundary into this closed
//! enum so the router can match exhaustively instead of string-prefix
//! scanning.

/// A decoded component/modal action and the entity it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Join an event (entity: event id).
    JoinEvent(String),
    /// Withdraw from an event (entity: event id).
    LeaveEvent(String),
    /// Close recruitment (entity: event id).
    CloseEvent(String),
    /// Show the notice creation form (entity: event id).
    NoticeOpen(String),
    /// List an event's notices (entity: event id).
    NoticeList(String),
    /// Submitted notice creation form (entity: event id).
    NoticeModal(String),
    /// Acknowledge a notice (entity: notice id).
    NoticeAck(String),
    /// Close a notice (entity: notice id).
    NoticeClose(String),
    /// Hide a notice from the list view (entity: notice id).
    NoticeHide(String),
    /// Show a hidden notice again (entity: notice id).
    NoticeShow(String),
}

impl Action {
    /// Wire encoding, used as the component custom id.
    pub fn encode(&self) -> String {
        let (tag, id) = match self {
            Action::JoinEvent(id) => ("join_event", id),
            Action::LeaveEvent(id) => ("leave_event", id),
            Action::CloseEvent(id) => ("close_event", id),
            Action::NoticeOpen(id) => ("notice_open", id),
            Action::NoticeList(id) => ("notice_list", id),
            Action::NoticeModal(id) => ("notice_modal", id),
            Action::NoticeAck(id) => ("notice_ack", id),
            Action::NoticeClose(id) => ("notice_close", id),
            Action::NoticeHide(id) => ("notice_hide", id),
            Action::NoticeShow(id) => ("notice_show", id),
        };
        format!("{tag}:{id}")
    }

    /// Decode a custom id; `None` for unknown tags or missing entity ids.
    pub fn decode(custom_id: &str) -> Option<Action> {
        let (tag, id) = custom_id.split_once(':')?;
        if id.is_empty() {
            return None;
        }
        let id = id.to_string();
        match tag {
            "join_event" => Some(Action::JoinEvent(id)),
            "leave_event" => Some(Action::LeaveEvent(id)),
            "close_event" => Some(Action::CloseEvent(id)),
            "notice_open" => Some(Action::NoticeOpen(id)),
            "notice_list" => Some(Action::NoticeList(id)),
            "notice_modal" => Some(Action::NoticeModal(id)),
            "notice_ack" => Some(Action::NoticeAck(id)),
            "notice_close" => Some(Action::NoticeClose(id)),
            "notice_hide" => Some(Action::NoticeHide(id)),
            "notice_show" => Some(Action::NoticeShow(id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let actions = vec![
            Action::JoinEvent("EVT#abc".to_string()),
            Action::LeaveEvent("EVT#abc".to_string()),
            Action::CloseEvent("EVT#abc".to_string()),
            Action::NoticeOpen("EVT#abc".to_string()),
            Action::NoticeList("EVT#abc".to_string()),
            Action::NoticeModal("EVT#abc".to_string()),
            Action::NoticeAck("NTC#def".to_string()),
            Action::NoticeClose("NTC#def".to_string()),
            Action::NoticeHide("NTC#def".to_string()),
            Action::NoticeShow("NTC#def".to_string()),
        ];
        for action in actions {
            assert_eq!(Action::decode(&action.encode()), Some(action));
        }
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        assert_eq!(Action::decode("promote_event:EVT#abc"), None);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(Action::decode("join_event"), None);
        assert_eq!(Action::decode("join_event:"), None);
        assert_eq!(Action::decode(""), None);
    }

    #[test]
    fn test_entity_id_may_contain_separators() {
        // Entity ids contain '#'; only the first ':' splits.
        let decoded = Action::decode("notice_ack:NTC#00ff:oddball");
        assert_eq!(decoded, Some(Action::NoticeAck("NTC#00ff:oddball".to_string())));
    }
}
