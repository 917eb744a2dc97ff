//! Push event routing
//!
//! Maps feed events to view actions. Every pushed message refreshes the
//! whole conversation list rather than patching one row.

use super::RealtimeEvent;
use crate::models::Message;

/// What the console must do in response to a push event
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Append to the open thread without re-rendering it
    AppendToThread(Message),
    /// Refetch and re-render the conversation list
    RefreshConversations,
}

/// Route a content event given the currently joined conversation room
///
/// Lifecycle events (`Connect`/`Disconnect`) change membership and are
/// handled by the subscription manager before reaching here.
pub fn route(event: RealtimeEvent, joined_room: Option<&str>) -> Vec<Dispatch> {
    match event {
        RealtimeEvent::NewMessage(message) => {
            let mut actions = Vec::with_capacity(2);
            if joined_room == Some(message.conversation_id.as_str()) {
                actions.push(Dispatch::AppendToThread(message));
            }
            actions.push(Dispatch::RefreshConversations);
            actions
        }
        RealtimeEvent::ConversationUpdate(_) => vec![Dispatch::RefreshConversations],
        RealtimeEvent::Connect | RealtimeEvent::Disconnect => Vec::new(),
    }
}
