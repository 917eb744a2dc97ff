//! Realtime feed handling
//!
//! This module provides:
//! - Wire events and room commands
//! - The two-slot room state machine
//! - The push event router
//! - The subscription manager tying them to a transport

mod events;
mod manager;
mod rooms;
mod router;

pub use events::{ConversationUpdate, RealtimeEvent, RoomCommand};
pub use manager::{RoomTransport, SubscriptionManager};
pub use rooms::{RoomSlots, Slot};
pub use router::{Dispatch, route};
