//! Server capability trait

use super::api::{BulkSendReport, ServerMessage, StartConversationResponse, TwilioSettings};
use crate::error::ApiResult;
use crate::models::{ConversationId, ConversationSummary, Message, SheetPreview, SheetRef};

/// Trait for console server operations
///
/// This abstracts over the HTTP gateway so the console controller can be
/// driven by a scripted implementation in tests. Every method is a single
/// request with no side effects beyond the call itself.
pub trait ConsoleApi: Send + Sync {
    /// List spreadsheets, optionally filtered by a name substring
    fn list_sheets(&self, search: Option<&str>) -> ApiResult<Vec<SheetRef>>;

    /// Read the header row and data rows of a sheet
    fn get_sheet_data(&self, sheet_id: &str) -> ApiResult<SheetPreview>;

    /// List conversations, most recently active first
    fn list_conversations(&self) -> ApiResult<Vec<ConversationSummary>>;

    /// List messages of a conversation, oldest first
    fn get_messages(&self, conversation_id: &ConversationId) -> ApiResult<Vec<Message>>;

    fn mark_read(&self, conversation_id: &ConversationId) -> ApiResult<ServerMessage>;

    fn send_message(&self, conversation_id: &ConversationId, body: &str)
    -> ApiResult<ServerMessage>;

    /// Start a conversation for each comma-separated phone number
    fn start_conversation(
        &self,
        phone_numbers: &str,
        initial_message: Option<&str>,
        contact_name: Option<&str>,
    ) -> ApiResult<StartConversationResponse>;

    /// Send `template` to every row of the sheet, substituting `{{Header}}`
    fn send_bulk_sms(&self, sheet_id: &str, template: &str) -> ApiResult<BulkSendReport>;

    fn save_twilio_settings(&self, settings: &TwilioSettings) -> ApiResult<ServerMessage>;

    fn import_twilio_history(&self) -> ApiResult<ServerMessage>;

    fn recalculate_last_activity(&self) -> ApiResult<ServerMessage>;

    /// Forward pasted contact JSON to the server verbatim
    fn apply_sheet_contacts(&self, contacts: &serde_json::Value) -> ApiResult<ServerMessage>;
}
