//! Realtime subscription manager
//!
//! Owns the session state and the transport, applies the room state machine
//! on connect, disconnect and selection, and routes push events.

use anyhow::Result;
use log::{debug, info, warn};

use super::router::{Dispatch, route};
use super::{RealtimeEvent, RoomCommand};
use crate::models::ConversationId;
use crate::session::Session;

/// Outbound side of the realtime channel
///
/// Implementations only deliver join/leave requests; connection handling
/// stays inside the transport.
pub trait RoomTransport: Send {
    fn send(&self, command: &RoomCommand) -> Result<()>;
}

pub struct SubscriptionManager {
    transport: Box<dyn RoomTransport>,
    session: Session,
}

impl SubscriptionManager {
    pub fn new(transport: Box<dyn RoomTransport>, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Connection established: join the user room if we know who we are
    ///
    /// A conversation selected while the connection was down is joined right
    /// after the user room.
    pub fn on_connect(&mut self) {
        info!("Realtime connected");
        self.session.connected = true;
        if let Some(room) = self.session.user_room() {
            let commands = self.session.rooms.join_user(&room);
            self.emit(commands);
        }
        if let Some(room) = self.session.pending_room.take() {
            let commands = self.session.rooms.select_conversation(&room);
            self.emit(commands);
        }
    }

    /// Connection lost: leave the user room and forget conversation membership
    ///
    /// The selected conversation is kept; its room is only rejoined when the
    /// operator selects a conversation again.
    pub fn on_disconnect(&mut self) {
        info!("Realtime disconnected");
        self.session.connected = false;
        let commands = self.session.rooms.leave_user();
        self.emit(commands);
        self.session.rooms.reset_conversation();
    }

    /// Make `id` the current conversation and move the conversation room
    ///
    /// While disconnected the room is held back and joined by `on_connect`.
    /// Returns true if the current conversation changed.
    pub fn select(&mut self, id: &ConversationId) -> bool {
        let changed = !self.session.is_current(id);
        self.session.current_conversation = Some(id.clone());

        if !self.session.connected {
            debug!("Not connected; room for conversation {} deferred", id);
            self.session.pending_room = Some(id.room());
            return changed;
        }

        let commands = self.session.rooms.select_conversation(&id.room());
        self.emit(commands);
        changed
    }

    /// Apply lifecycle events and route content events
    pub fn handle(&mut self, event: RealtimeEvent) -> Vec<Dispatch> {
        debug!("Realtime event: {}", event.name());
        match event {
            RealtimeEvent::Connect => {
                self.on_connect();
                vec![Dispatch::RefreshConversations]
            }
            RealtimeEvent::Disconnect => {
                self.on_disconnect();
                Vec::new()
            }
            other => route(other, self.session.rooms.conversation().room()),
        }
    }

    fn emit(&self, commands: Vec<RoomCommand>) {
        for command in commands {
            debug!("Room request: {:?}", command);
            if let Err(e) = self.transport.send(&command) {
                warn!("Failed to send {:?}: {:#}", command, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, Sender};
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<RoomCommand>>>);

    impl Recorder {
        fn take(&self) -> Vec<RoomCommand> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl RoomTransport for Recorder {
        fn send(&self, command: &RoomCommand) -> Result<()> {
            self.0.lock().unwrap().push(command.clone());
            Ok(())
        }
    }

    fn manager(user: Option<&str>) -> (SubscriptionManager, Recorder) {
        let recorder = Recorder::default();
        let manager = SubscriptionManager::new(
            Box::new(recorder.clone()),
            Session::new(user.map(str::to_string)),
        );
        (manager, recorder)
    }

    #[test]
    fn test_connect_joins_user_room_and_refreshes() {
        let (mut manager, recorder) = manager(Some("12"));
        let actions = manager.handle(RealtimeEvent::Connect);

        assert_eq!(actions, vec![Dispatch::RefreshConversations]);
        assert_eq!(recorder.take(), vec![RoomCommand::join("12")]);
        assert!(manager.session().is_connected());
    }

    #[test]
    fn test_connect_without_identity_joins_nothing() {
        let (mut manager, recorder) = manager(None);
        manager.handle(RealtimeEvent::Connect);
        assert!(recorder.take().is_empty());
        assert!(!manager.session().rooms().user().is_joined());
    }

    #[test]
    fn test_reconnect_rejoins_user_room_but_not_conversation() {
        let (mut manager, recorder) = manager(Some("12"));
        manager.handle(RealtimeEvent::Connect);
        manager.select(&ConversationId::new("7"));
        recorder.take();

        manager.handle(RealtimeEvent::Disconnect);
        assert_eq!(recorder.take(), vec![RoomCommand::leave("12")]);

        manager.handle(RealtimeEvent::Connect);
        assert_eq!(recorder.take(), vec![RoomCommand::join("12")]);
        assert!(!manager.session().rooms().conversation().is_joined());
        // Selection itself outlives the connection
        assert!(manager.session().is_current(&ConversationId::new("7")));

        manager.select(&ConversationId::new("7"));
        assert_eq!(recorder.take(), vec![RoomCommand::join("7")]);
    }

    #[test]
    fn test_select_while_disconnected_emits_nothing() {
        let (mut manager, recorder) = manager(Some("12"));
        assert!(manager.select(&ConversationId::new("7")));
        assert!(recorder.take().is_empty());
        assert!(!manager.session().rooms().conversation().is_joined());
        assert_eq!(manager.session().pending_room(), Some("7"));
    }

    #[test]
    fn test_first_connect_joins_room_selected_beforehand() {
        let (mut manager, recorder) = manager(Some("12"));
        manager.select(&ConversationId::new("3"));
        manager.select(&ConversationId::new("7"));

        manager.handle(RealtimeEvent::Connect);
        assert_eq!(
            recorder.take(),
            vec![RoomCommand::join("12"), RoomCommand::join("7")]
        );
        assert_eq!(manager.session().rooms().conversation().room(), Some("7"));
        assert!(manager.session().pending_room().is_none());
    }

    #[test]
    fn test_selection_during_outage_joined_on_reconnect() {
        let (mut manager, recorder) = manager(Some("12"));
        manager.handle(RealtimeEvent::Connect);
        manager.select(&ConversationId::new("3"));
        manager.handle(RealtimeEvent::Disconnect);
        recorder.take();

        manager.select(&ConversationId::new("7"));
        assert!(recorder.take().is_empty());

        manager.handle(RealtimeEvent::Connect);
        assert_eq!(
            recorder.take(),
            vec![RoomCommand::join("12"), RoomCommand::join("7")]
        );
    }

    #[test]
    fn test_push_routed_against_joined_room() {
        let (mut manager, _recorder) = manager(Some("12"));
        manager.handle(RealtimeEvent::Connect);
        manager.select(&ConversationId::new("7"));

        let message = Message::new(ConversationId::new("7"), Sender::User, "hi", Utc::now());
        let actions = manager.handle(RealtimeEvent::NewMessage(message.clone()));
        assert_eq!(
            actions,
            vec![
                Dispatch::AppendToThread(message),
                Dispatch::RefreshConversations
            ]
        );
    }

    #[test]
    fn test_transport_failure_still_moves_slot() {
        struct Broken;
        impl RoomTransport for Broken {
            fn send(&self, _command: &RoomCommand) -> Result<()> {
                anyhow::bail!("socket closed")
            }
        }

        let mut manager = SubscriptionManager::new(Box::new(Broken), Session::new(None));
        manager.on_connect();
        manager.select(&ConversationId::new("3"));
        assert_eq!(manager.session().rooms().conversation().room(), Some("3"));
    }
}
