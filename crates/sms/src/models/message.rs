//! Message model representing a single SMS in a conversation

use super::ConversationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The console operator (outgoing)
    User,
    /// The remote contact (incoming)
    Contact,
}

/// A single message within a conversation
///
/// Messages are immutable once rendered. Ordering is whatever the server
/// (or the push feed) delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Server-side message ID (absent on pushed messages)
    #[serde(default)]
    pub id: Option<i64>,
    /// ID of the conversation this message belongs to
    pub conversation_id: ConversationId,
    pub sender: Sender,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(
        conversation_id: ConversationId,
        sender: Sender,
        body: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            conversation_id,
            sender,
            body: body.into(),
            timestamp,
        }
    }
}
