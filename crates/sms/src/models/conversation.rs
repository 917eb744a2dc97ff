//! Conversation model as listed by the console server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Unique identifier for a conversation
///
/// The server hands out integer ids, but the client never does arithmetic on
/// them. Both JSON numbers and strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the realtime room scoped to this conversation
    pub fn room(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ConversationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for ConversationId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for ConversationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self::from(n),
            RawId::Text(s) => Self(s),
        })
    }
}

/// Summary information for displaying a conversation in the list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Conversation ID
    pub id: ConversationId,
    /// Contact display name (the server falls back to the phone number)
    pub contact_name: String,
    /// E.164 phone number of the contact, when known
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Body of the most recent message, empty when there are none
    #[serde(default)]
    pub last_message_body: Option<String>,
    /// Timestamp of the most recent message
    #[serde(default)]
    pub last_message_time: Option<DateTime<Utc>>,
    /// Incoming messages newer than the last mark-read
    #[serde(default)]
    pub unread_count: u32,
}

impl ConversationSummary {
    /// Preview text, or the empty string when there are no messages yet
    pub fn preview(&self) -> &str {
        self.last_message_body.as_deref().unwrap_or("")
    }

    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }
}
