//! Domain models for console entities

mod conversation;
mod message;
mod sheet;

pub use conversation::{ConversationId, ConversationSummary};
pub use message::{Message, Sender};
pub use sheet::{SheetPreview, SheetRef};
