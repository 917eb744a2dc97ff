//! Shared fakes for console tests

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use sms::gateway::api::{
    BulkSendReport, ServerMessage, StartConversationResponse, StartedConversation,
    TwilioSettings,
};
use sms::{
    ApiError, ApiResult, Console, ConsoleApi, ConversationId, ConversationSummary, Message,
    Notifier, RoomCommand, RoomTransport, Sender, SheetPreview, SheetRef,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn summary(id: &str, name: &str, body: Option<&str>, unread: u32) -> ConversationSummary {
    ConversationSummary {
        id: ConversationId::new(id),
        contact_name: name.to_string(),
        phone_number: None,
        last_message_body: body.map(str::to_string),
        last_message_time: Some(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()),
        unread_count: unread,
    }
}

pub fn message(conversation: &str, sender: Sender, body: &str) -> Message {
    Message::new(
        ConversationId::new(conversation),
        sender,
        body,
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
    )
}

/// Scripted `ConsoleApi` that records every call by name
#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<String>>,
    pub conversations: Mutex<Vec<ConversationSummary>>,
    pub messages: Mutex<HashMap<String, Vec<Message>>>,
    /// Conversations whose mark-read answers with an error
    pub mark_read_failures: Mutex<Vec<String>>,
    /// Next send_message result, success when unset
    pub send_error: Mutex<Option<ApiError>>,
    pub list_error: Mutex<Option<ApiError>>,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl FakeApi {
    pub fn with_conversations(conversations: Vec<ConversationSummary>) -> Arc<Self> {
        let api = Self::default();
        *api.conversations.lock().unwrap() = conversations;
        Arc::new(api)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

impl ConsoleApi for FakeApi {
    fn list_sheets(&self, search: Option<&str>) -> ApiResult<Vec<SheetRef>> {
        self.record(format!("list_sheets {}", search.unwrap_or("")));
        Ok(vec![SheetRef {
            id: "s1".to_string(),
            name: "Leads".to_string(),
        }])
    }

    fn get_sheet_data(&self, sheet_id: &str) -> ApiResult<SheetPreview> {
        self.record(format!("get_sheet_data {}", sheet_id));
        Ok(SheetPreview {
            headers: vec!["Name".to_string(), "Phone".to_string()],
            data: vec![vec!["Al".to_string(), "+15550001".to_string()]],
        })
    }

    fn list_conversations(&self) -> ApiResult<Vec<ConversationSummary>> {
        self.record("list_conversations".to_string());
        if let Some(e) = self.list_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.conversations.lock().unwrap().clone())
    }

    fn get_messages(&self, conversation_id: &ConversationId) -> ApiResult<Vec<Message>> {
        self.record(format!("get_messages {}", conversation_id));
        Ok(self
            .messages
            .lock()
            .unwrap()
            .get(conversation_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    fn mark_read(&self, conversation_id: &ConversationId) -> ApiResult<ServerMessage> {
        self.record(format!("mark_read {}", conversation_id));
        let failing = self.mark_read_failures.lock().unwrap();
        if failing.iter().any(|id| id == conversation_id.as_str()) {
            return Err(ApiError::server(404, "Conversation not found"));
        }
        Ok(ServerMessage {
            message: "Conversation marked as read.".to_string(),
        })
    }

    fn send_message(&self, conversation_id: &ConversationId, body: &str) -> ApiResult<ServerMessage> {
        self.record(format!("send_message {}", conversation_id));
        if let Some(e) = self.send_error.lock().unwrap().take() {
            return Err(e);
        }
        self.sent
            .lock()
            .unwrap()
            .push((conversation_id.to_string(), body.to_string()));
        Ok(ServerMessage {
            message: "Message sent successfully!".to_string(),
        })
    }

    fn start_conversation(
        &self,
        phone_numbers: &str,
        _initial_message: Option<&str>,
        _contact_name: Option<&str>,
    ) -> ApiResult<StartConversationResponse> {
        self.record(format!("start_conversation {}", phone_numbers));
        let conversations = phone_numbers
            .split(',')
            .enumerate()
            .map(|(i, phone)| StartedConversation {
                phone: phone.trim().to_string(),
                conversation_id: ConversationId::from(100 + i as i64),
                status: "created".to_string(),
            })
            .collect();
        Ok(StartConversationResponse {
            message: "Conversations processed.".to_string(),
            conversations,
        })
    }

    fn send_bulk_sms(&self, sheet_id: &str, _template: &str) -> ApiResult<BulkSendReport> {
        self.record(format!("send_bulk_sms {}", sheet_id));
        Ok(BulkSendReport {
            message: "Bulk SMS process completed.".to_string(),
            results: vec![
                "To Al: Message sent to +15550001.".to_string(),
                "To Bo: Failed - invalid number.".to_string(),
            ],
        })
    }

    fn save_twilio_settings(&self, _settings: &TwilioSettings) -> ApiResult<ServerMessage> {
        self.record("save_twilio_settings".to_string());
        Ok(ServerMessage {
            message: "Twilio settings saved successfully!".to_string(),
        })
    }

    fn import_twilio_history(&self) -> ApiResult<ServerMessage> {
        self.record("import_twilio_history".to_string());
        Ok(ServerMessage {
            message: "Imported 3 messages.".to_string(),
        })
    }

    fn recalculate_last_activity(&self) -> ApiResult<ServerMessage> {
        self.record("recalculate_last_activity".to_string());
        Ok(ServerMessage {
            message: "Recalculated 2 conversations.".to_string(),
        })
    }

    fn apply_sheet_contacts(&self, _contacts: &serde_json::Value) -> ApiResult<ServerMessage> {
        self.record("apply_sheet_contacts".to_string());
        Ok(ServerMessage {
            message: "Contacts applied.".to_string(),
        })
    }
}

#[derive(Clone, Default)]
pub struct RecordingTransport(pub Arc<Mutex<Vec<RoomCommand>>>);

impl RecordingTransport {
    pub fn take(&self) -> Vec<RoomCommand> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl RoomTransport for RecordingTransport {
    fn send(&self, command: &RoomCommand) -> anyhow::Result<()> {
        self.0.lock().unwrap().push(command.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier(pub Arc<Mutex<Vec<String>>>);

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

pub struct Harness {
    pub console: Console,
    pub api: Arc<FakeApi>,
    pub rooms: RecordingTransport,
    pub alerts: RecordingNotifier,
}

/// Console for user "42" over the fake api, not yet connected
pub fn harness(api: Arc<FakeApi>) -> Harness {
    let rooms = RecordingTransport::default();
    let alerts = RecordingNotifier::default();
    let console = Console::new(
        api.clone(),
        Box::new(rooms.clone()),
        Box::new(alerts.clone()),
        Some("42".to_string()),
    );
    Harness {
        console,
        api,
        rooms,
        alerts,
    }
}
