//! Page-lifetime session state
//!
//! Holds the current selection and room membership. Only the subscription
//! manager mutates it, through the selection protocol and the
//! connect/disconnect handlers.

use crate::models::ConversationId;
use crate::realtime::RoomSlots;

#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Conversation the operator last selected; survives reconnects
    pub(crate) current_conversation: Option<ConversationId>,
    pub(crate) rooms: RoomSlots,
    /// Identity used to name the user room
    pub(crate) user_id: Option<String>,
    pub(crate) connected: bool,
    /// Conversation room selected before the first connect, joined once it is up
    pub(crate) pending_room: Option<String>,
}

impl Session {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id: user_id.filter(|id| !id.is_empty()),
            ..Self::default()
        }
    }

    pub fn current_conversation(&self) -> Option<&ConversationId> {
        self.current_conversation.as_ref()
    }

    pub fn is_current(&self, id: &ConversationId) -> bool {
        self.current_conversation.as_ref() == Some(id)
    }

    pub fn rooms(&self) -> &RoomSlots {
        &self.rooms
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn pending_room(&self) -> Option<&str> {
        self.pending_room.as_deref()
    }

    /// Room the user joins on connect, if an identity is known
    pub fn user_room(&self) -> Option<String> {
        self.user_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_user_id_is_unknown() {
        let session = Session::new(Some(String::new()));
        assert!(session.user_room().is_none());
    }

    #[test]
    fn test_fresh_session() {
        let session = Session::new(Some("12".to_string()));
        assert_eq!(session.user_room().as_deref(), Some("12"));
        assert!(!session.is_connected());
        assert!(session.current_conversation().is_none());
        assert!(!session.is_current(&ConversationId::new("1")));
        assert!(session.pending_room().is_none());
    }
}
