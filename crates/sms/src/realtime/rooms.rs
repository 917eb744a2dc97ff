//! Two-slot room membership state machine
//!
//! Pure transitions: each returns the join/leave commands the transport must
//! emit, and never touches the network itself.

use super::RoomCommand;

/// Membership of a single room slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Unjoined,
    Joined(String),
}

impl Slot {
    pub fn room(&self) -> Option<&str> {
        match self {
            Slot::Unjoined => None,
            Slot::Joined(room) => Some(room),
        }
    }

    pub fn is_joined(&self) -> bool {
        matches!(self, Slot::Joined(_))
    }
}

/// The per-user slot and the per-conversation slot
///
/// The conversation slot holds at most one room, so at most one
/// conversation room is ever joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSlots {
    user: Slot,
    conversation: Slot,
}

impl RoomSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> &Slot {
        &self.user
    }

    pub fn conversation(&self) -> &Slot {
        &self.conversation
    }

    /// Join the user room (on connect)
    pub fn join_user(&mut self, room: &str) -> Vec<RoomCommand> {
        Self::switch(&mut self.user, room)
    }

    /// Leave the user room (on disconnect)
    pub fn leave_user(&mut self) -> Vec<RoomCommand> {
        match std::mem::take(&mut self.user) {
            Slot::Joined(room) => vec![RoomCommand::leave(room)],
            Slot::Unjoined => Vec::new(),
        }
    }

    /// Move the conversation slot to `room`
    ///
    /// Selecting the room already held emits nothing. Selecting a different
    /// one leaves the old room before joining the new one.
    pub fn select_conversation(&mut self, room: &str) -> Vec<RoomCommand> {
        Self::switch(&mut self.conversation, room)
    }

    /// Forget conversation membership without emitting anything
    ///
    /// Used when the connection drops: the server discards membership with
    /// the socket, so there is nothing to leave.
    pub fn reset_conversation(&mut self) {
        self.conversation = Slot::Unjoined;
    }

    fn switch(slot: &mut Slot, room: &str) -> Vec<RoomCommand> {
        let mut commands = Vec::new();
        if let Slot::Joined(current) = slot {
            if current.as_str() == room {
                return commands;
            }
            commands.push(RoomCommand::leave(current.clone()));
        }
        *slot = Slot::Joined(room.to_string());
        commands.push(RoomCommand::join(room));
        commands
    }
}
