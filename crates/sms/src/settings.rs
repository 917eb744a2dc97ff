//! Settings panel - Twilio credentials and maintenance actions
//!
//! Each form has its own feedback region that moves through
//! Idle -> Pending -> Success | Failure.

use log::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::gateway::ConsoleApi;
use crate::gateway::api::{ServerMessage, TwilioSettings};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    Idle,
    Pending(String),
    Success(String),
    Failure(String),
}

impl Feedback {
    pub fn text(&self) -> Option<&str> {
        match self {
            Feedback::Idle => None,
            Feedback::Pending(text) | Feedback::Success(text) | Feedback::Failure(text) => {
                Some(text)
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Feedback::Failure(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Twilio,
    Import,
    Recalculate,
    Contacts,
}

impl Form {
    fn pending_text(self) -> &'static str {
        match self {
            Form::Twilio => "Saving...",
            Form::Import => "Importing... This may take a while.",
            Form::Recalculate => "Recalculating...",
            Form::Contacts => "Applying contacts...",
        }
    }
}

#[derive(Debug, Default)]
pub struct SettingsPanel {
    twilio: Feedback,
    import: Feedback,
    recalculate: Feedback,
    contacts: Feedback,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feedback(&self, form: Form) -> &Feedback {
        match form {
            Form::Twilio => &self.twilio,
            Form::Import => &self.import,
            Form::Recalculate => &self.recalculate,
            Form::Contacts => &self.contacts,
        }
    }

    fn slot(&mut self, form: Form) -> &mut Feedback {
        match form {
            Form::Twilio => &mut self.twilio,
            Form::Import => &mut self.import,
            Form::Recalculate => &mut self.recalculate,
            Form::Contacts => &mut self.contacts,
        }
    }

    /// Save Twilio credentials; all three fields are required
    pub fn save_twilio(
        &mut self,
        api: &dyn ConsoleApi,
        account_sid: &str,
        auth_token: &str,
        phone_number: &str,
    ) -> ApiResult<ServerMessage> {
        let fields = [account_sid.trim(), auth_token.trim(), phone_number.trim()];
        if fields.iter().any(|field| field.is_empty()) {
            return self.fail(Form::Twilio, ApiError::validation("All Twilio fields are required."));
        }

        let settings = TwilioSettings {
            account_sid: fields[0].to_string(),
            auth_token: fields[1].to_string(),
            phone_number: fields[2].to_string(),
        };
        self.run(Form::Twilio, || api.save_twilio_settings(&settings))
    }

    /// Import message history from Twilio
    ///
    /// Nothing happens unless the operator confirmed; returns `None` then.
    pub fn import_history(
        &mut self,
        api: &dyn ConsoleApi,
        confirmed: bool,
    ) -> Option<ApiResult<ServerMessage>> {
        if !confirmed {
            info!("History import cancelled");
            return None;
        }
        Some(self.run(Form::Import, || api.import_twilio_history()))
    }

    pub fn recalculate_last_activity(&mut self, api: &dyn ConsoleApi) -> ApiResult<ServerMessage> {
        self.run(Form::Recalculate, || api.recalculate_last_activity())
    }

    /// Forward pasted contact JSON; it must parse before anything is sent
    pub fn apply_sheet_contacts(
        &mut self,
        api: &dyn ConsoleApi,
        pasted: &str,
    ) -> ApiResult<ServerMessage> {
        let contacts: serde_json::Value = match serde_json::from_str(pasted) {
            Ok(value) => value,
            Err(e) => {
                return self.fail(Form::Contacts, ApiError::validation(format!("Invalid JSON: {}", e)));
            }
        };
        self.run(Form::Contacts, || api.apply_sheet_contacts(&contacts))
    }

    fn run(
        &mut self,
        form: Form,
        call: impl FnOnce() -> ApiResult<ServerMessage>,
    ) -> ApiResult<ServerMessage> {
        *self.slot(form) = Feedback::Pending(form.pending_text().to_string());
        info!("{:?}: {}", form, form.pending_text());

        match call() {
            Ok(response) => {
                *self.slot(form) = Feedback::Success(response.message.clone());
                Ok(response)
            }
            Err(e) => self.fail(form, e),
        }
    }

    fn fail(&mut self, form: Form, e: ApiError) -> ApiResult<ServerMessage> {
        error!("{:?} failed: {}", form, e);
        *self.slot(form) = Feedback::Failure(match &e {
            ApiError::Network { .. } | ApiError::Decode { .. } => {
                "An unexpected error occurred.".to_string()
            }
            other => other.user_message(),
        });
        Err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::api::{BulkSendReport, StartConversationResponse};
    use crate::models::{ConversationId, ConversationSummary, Message, SheetPreview, SheetRef};
    use std::sync::Mutex;

    #[derive(Default)]
    struct SettingsApi {
        saved: Mutex<Vec<TwilioSettings>>,
        contacts: Mutex<Vec<serde_json::Value>>,
        offline: bool,
    }

    impl SettingsApi {
        fn ok(&self, message: &str) -> ApiResult<ServerMessage> {
            if self.offline {
                return Err(ApiError::network("connection refused"));
            }
            Ok(ServerMessage { message: message.to_string() })
        }
    }

    impl ConsoleApi for SettingsApi {
        fn save_twilio_settings(&self, settings: &TwilioSettings) -> ApiResult<ServerMessage> {
            self.saved.lock().unwrap().push(settings.clone());
            self.ok("Twilio settings saved successfully!")
        }
        fn import_twilio_history(&self) -> ApiResult<ServerMessage> {
            self.ok("Imported 12 messages.")
        }
        fn recalculate_last_activity(&self) -> ApiResult<ServerMessage> {
            Err(ApiError::server(500, "Database is locked"))
        }
        fn apply_sheet_contacts(&self, contacts: &serde_json::Value) -> ApiResult<ServerMessage> {
            self.contacts.lock().unwrap().push(contacts.clone());
            self.ok("Updated 1 contacts.")
        }

        fn list_sheets(&self, _: Option<&str>) -> ApiResult<Vec<SheetRef>> {
            unreachable!()
        }
        fn get_sheet_data(&self, _: &str) -> ApiResult<SheetPreview> {
            unreachable!()
        }
        fn list_conversations(&self) -> ApiResult<Vec<ConversationSummary>> {
            unreachable!()
        }
        fn get_messages(&self, _: &ConversationId) -> ApiResult<Vec<Message>> {
            unreachable!()
        }
        fn mark_read(&self, _: &ConversationId) -> ApiResult<ServerMessage> {
            unreachable!()
        }
        fn send_message(&self, _: &ConversationId, _: &str) -> ApiResult<ServerMessage> {
            unreachable!()
        }
        fn start_conversation(
            &self,
            _: &str,
            _: Option<&str>,
            _: Option<&str>,
        ) -> ApiResult<StartConversationResponse> {
            unreachable!()
        }
        fn send_bulk_sms(&self, _: &str, _: &str) -> ApiResult<BulkSendReport> {
            unreachable!()
        }
    }

    #[test]
    fn test_twilio_requires_all_fields() {
        let api = SettingsApi::default();
        let mut panel = SettingsPanel::new();

        assert!(panel.save_twilio(&api, "AC1", " ", "+15550001").is_err());
        assert_eq!(
            panel.feedback(Form::Twilio),
            &Feedback::Failure("All Twilio fields are required.".to_string())
        );
        assert!(api.saved.lock().unwrap().is_empty());

        panel.save_twilio(&api, "AC1", "secret", "+15550001").unwrap();
        assert_eq!(
            panel.feedback(Form::Twilio),
            &Feedback::Success("Twilio settings saved successfully!".to_string())
        );
        assert_eq!(api.saved.lock().unwrap()[0].account_sid, "AC1");
    }

    #[test]
    fn test_import_needs_confirmation() {
        let api = SettingsApi::default();
        let mut panel = SettingsPanel::new();

        assert!(panel.import_history(&api, false).is_none());
        assert_eq!(panel.feedback(Form::Import), &Feedback::Idle);

        assert!(panel.import_history(&api, true).unwrap().is_ok());
        assert_eq!(panel.feedback(Form::Import).text(), Some("Imported 12 messages."));
    }

    #[test]
    fn test_server_failure_shows_server_text() {
        let api = SettingsApi::default();
        let mut panel = SettingsPanel::new();

        assert!(panel.recalculate_last_activity(&api).is_err());
        assert_eq!(
            panel.feedback(Form::Recalculate),
            &Feedback::Failure("Database is locked".to_string())
        );
    }

    #[test]
    fn test_network_failure_is_generic() {
        let api = SettingsApi {
            offline: true,
            ..SettingsApi::default()
        };
        let mut panel = SettingsPanel::new();

        assert!(panel.import_history(&api, true).unwrap().is_err());
        assert_eq!(
            panel.feedback(Form::Import),
            &Feedback::Failure("An unexpected error occurred.".to_string())
        );
    }

    #[test]
    fn test_contacts_must_be_json() {
        let api = SettingsApi::default();
        let mut panel = SettingsPanel::new();

        let err = panel.apply_sheet_contacts(&api, "{not json").unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
        assert!(panel.feedback(Form::Contacts).is_failure());
        assert!(api.contacts.lock().unwrap().is_empty());

        panel
            .apply_sheet_contacts(&api, r#"[{"phone": "+15550001", "name": "Al"}]"#)
            .unwrap();
        assert_eq!(api.contacts.lock().unwrap()[0][0]["name"], "Al");
    }
}
