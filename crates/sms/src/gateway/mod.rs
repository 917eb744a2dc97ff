//! Console server integration
//!
//! This module provides:
//! - The `ConsoleApi` trait, one method per server capability
//! - An HTTP client implementing it
//! - Wire types for request and response bodies

mod client;
mod traits;

pub use client::GatewayClient;
pub use traits::ConsoleApi;

/// Console server request/response types
pub mod api {
    use serde::{Deserialize, Serialize};

    use crate::models::{ConversationId, Message, Sender};
    use chrono::{DateTime, Utc};

    /// Generic `{message}` acknowledgement
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    pub struct ServerMessage {
        #[serde(default)]
        pub message: String,
    }

    /// Body of a non-success response
    #[derive(Debug, Default, Deserialize)]
    pub struct ErrorBody {
        pub error: Option<String>,
    }

    /// Response from the sheet data endpoint
    ///
    /// The server can report a read failure with a 200 and an `error` field.
    #[derive(Debug, Deserialize)]
    pub struct SheetDataResponse {
        #[serde(default)]
        pub headers: Vec<String>,
        #[serde(default)]
        pub data: Vec<Vec<String>>,
        pub error: Option<String>,
    }

    /// Response from listing the messages of a conversation
    #[derive(Debug, Deserialize)]
    pub struct MessagesResponse {
        pub conversation_id: ConversationId,
        #[serde(default)]
        pub messages: Vec<MessageRecord>,
    }

    /// A stored message as returned inside `MessagesResponse`
    #[derive(Debug, Deserialize)]
    pub struct MessageRecord {
        pub id: Option<i64>,
        pub sender: Sender,
        pub body: String,
        pub timestamp: DateTime<Utc>,
    }

    impl MessagesResponse {
        /// Attach the envelope's conversation id to each record
        pub fn into_messages(self) -> Vec<Message> {
            let conversation_id = self.conversation_id;
            self.messages
                .into_iter()
                .map(|record| Message {
                    id: record.id,
                    conversation_id: conversation_id.clone(),
                    sender: record.sender,
                    body: record.body,
                    timestamp: record.timestamp,
                })
                .collect()
        }
    }

    #[derive(Debug, Serialize)]
    pub struct SendMessageRequest<'a> {
        pub message: &'a str,
    }

    /// Body for starting one conversation per phone number
    #[derive(Debug, Serialize)]
    pub struct StartConversationRequest<'a> {
        /// Comma-separated phone numbers
        pub phone_numbers: &'a str,
        pub initial_message: Option<&'a str>,
        pub contact_name: Option<&'a str>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    pub struct StartedConversation {
        pub phone: String,
        pub conversation_id: ConversationId,
        pub status: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    pub struct StartConversationResponse {
        #[serde(default)]
        pub message: String,
        #[serde(default)]
        pub conversations: Vec<StartedConversation>,
    }

    #[derive(Debug, Serialize)]
    pub struct BulkSmsRequest<'a> {
        pub sheet_id: &'a str,
        pub message_template: &'a str,
    }

    /// Outcome of a templated bulk send, one line per sheet row
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    pub struct BulkSendReport {
        #[serde(default)]
        pub message: String,
        #[serde(default)]
        pub results: Vec<String>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct TwilioSettings {
        pub account_sid: String,
        pub auth_token: String,
        pub phone_number: String,
    }
}
