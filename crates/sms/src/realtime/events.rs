//! Realtime wire events
//!
//! Frames on the websocket are JSON objects of the form
//! `{"event": "<name>", "data": <payload>}` in both directions.

use serde::{Deserialize, Serialize};

use crate::models::Message;

/// Inbound event from the realtime feed
///
/// `Connect` and `Disconnect` are synthesized by the transport when the
/// socket opens or closes; the other variants arrive as frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum RealtimeEvent {
    Connect,
    Disconnect,
    /// A message was stored in some conversation
    NewMessage(Message),
    /// Something about the conversation list changed (ordering, unread counts)
    ConversationUpdate(ConversationUpdate),
}

/// Payload of a `conversation_update` event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationUpdate {
    /// Owner of the list that changed; informational only
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
}

impl RealtimeEvent {
    /// Parse one text frame
    pub fn from_frame(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RealtimeEvent::Connect => "connect",
            RealtimeEvent::Disconnect => "disconnect",
            RealtimeEvent::NewMessage(_) => "new_message",
            RealtimeEvent::ConversationUpdate(_) => "conversation_update",
        }
    }
}

/// Outbound room membership request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum RoomCommand {
    Join { room: String },
    Leave { room: String },
}

impl RoomCommand {
    pub fn join(room: impl Into<String>) -> Self {
        Self::Join { room: room.into() }
    }

    pub fn leave(room: impl Into<String>) -> Self {
        Self::Leave { room: room.into() }
    }

    pub fn room(&self) -> &str {
        match self {
            RoomCommand::Join { room } | RoomCommand::Leave { room } => room,
        }
    }

    /// Encode as a text frame
    pub fn to_frame(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationId, Sender};

    #[test]
    fn test_parse_new_message_frame() {
        let frame = r#"{
            "event": "new_message",
            "data": {
                "conversation_id": 5,
                "sender": "contact",
                "body": "hello",
                "timestamp": "2024-05-01T10:15:30.500000Z"
            }
        }"#;

        match RealtimeEvent::from_frame(frame).unwrap() {
            RealtimeEvent::NewMessage(message) => {
                assert_eq!(message.conversation_id, ConversationId::new("5"));
                assert_eq!(message.sender, Sender::Contact);
                assert_eq!(message.body, "hello");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_parse_conversation_update_frame() {
        let event =
            RealtimeEvent::from_frame(r#"{"event": "conversation_update", "data": {"user_id": 3}}"#)
                .unwrap();
        assert_eq!(event.name(), "conversation_update");
    }

    #[test]
    fn test_socket_io_packet_is_not_a_frame() {
        let packet = r#"42["conversation_update",{"user_id":3}]"#;
        assert!(RealtimeEvent::from_frame(packet).is_err());
    }

    #[test]
    fn test_unknown_event_rejected() {
        assert!(RealtimeEvent::from_frame(r#"{"event": "typing", "data": {}}"#).is_err());
    }

    #[test]
    fn test_room_command_frame() {
        let frame = RoomCommand::join("7").to_frame().unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"event": "join", "data": {"room": "7"}})
        );
        assert_eq!(RoomCommand::leave("7").room(), "7");
    }
}
