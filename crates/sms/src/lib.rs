//! SMS crate - Client core for the messaging console
//!
//! This crate provides platform-independent console functionality including:
//! - Domain models (ConversationSummary, Message, SheetPreview)
//! - Console server HTTP client behind the `ConsoleApi` trait
//! - Realtime room membership and push event routing
//! - Headless views for the conversation list and the message thread
//! - Bulk composer and settings panel
//! - The `Console` controller tying them together
//!
//! This crate has no UI dependencies; front ends render the views' text
//! lines and feed events back in.

pub mod composer;
pub mod config;
pub mod console;
pub mod debounce;
pub mod error;
pub mod gateway;
pub mod models;
pub mod notify;
pub mod realtime;
pub mod session;
pub mod settings;
pub mod views;

pub use composer::{BulkComposer, Preview};
pub use config::CourierConfig;
pub use console::Console;
pub use debounce::Debouncer;
pub use error::{ApiError, ApiResult};
pub use gateway::{ConsoleApi, GatewayClient};
pub use models::{ConversationId, ConversationSummary, Message, Sender, SheetPreview, SheetRef};
pub use notify::Notifier;
pub use realtime::{
    Dispatch, RealtimeEvent, RoomCommand, RoomSlots, RoomTransport, Slot, SubscriptionManager,
    route,
};
pub use session::Session;
pub use settings::{Feedback, Form, SettingsPanel};
pub use views::{ConversationListView, ConversationRow, ThreadView};
