//! Console controller
//!
//! Owns the gateway, the subscription manager and every view. Operator
//! actions and push events both go through here, so the rendered state only
//! changes in one place.

use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::composer::BulkComposer;
use crate::error::{ApiError, ApiResult};
use crate::gateway::ConsoleApi;
use crate::gateway::api::{BulkSendReport, ServerMessage, StartConversationResponse};
use crate::models::ConversationId;
use crate::notify::Notifier;
use crate::realtime::{Dispatch, RealtimeEvent, RoomTransport, SubscriptionManager};
use crate::session::Session;
use crate::settings::SettingsPanel;
use crate::views::{ConversationListView, ThreadView};

pub struct Console {
    api: Arc<dyn ConsoleApi>,
    realtime: SubscriptionManager,
    list: ConversationListView,
    thread: ThreadView,
    composer: BulkComposer,
    settings: SettingsPanel,
    notifier: Box<dyn Notifier>,
    /// Text of the message box under the thread
    message_input: String,
}

impl Console {
    pub fn new(
        api: Arc<dyn ConsoleApi>,
        transport: Box<dyn RoomTransport>,
        notifier: Box<dyn Notifier>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            api,
            realtime: SubscriptionManager::new(transport, Session::new(user_id)),
            list: ConversationListView::new(),
            thread: ThreadView::new(),
            composer: BulkComposer::new(),
            settings: SettingsPanel::new(),
            notifier,
            message_input: String::new(),
        }
    }

    pub fn session(&self) -> &Session {
        self.realtime.session()
    }

    pub fn conversations(&self) -> &ConversationListView {
        &self.list
    }

    pub fn thread(&self) -> &ThreadView {
        &self.thread
    }

    pub fn composer(&self) -> &BulkComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut BulkComposer {
        &mut self.composer
    }

    pub fn settings(&self) -> &SettingsPanel {
        &self.settings
    }

    pub fn message_input(&self) -> &str {
        &self.message_input
    }

    pub fn set_message_input(&mut self, text: impl Into<String>) {
        self.message_input = text.into();
    }

    // === Conversations ===

    /// Refetch the conversation list and replace the rendered rows
    pub fn refresh_conversations(&mut self) {
        match self.api.list_conversations() {
            Ok(summaries) => {
                debug!("Fetched {} conversations", summaries.len());
                self.list
                    .render(summaries, self.realtime.session().current_conversation());
            }
            Err(e) => {
                error!("Error fetching conversations: {}", e);
                self.list.show_error("Error loading conversations.");
            }
        }
    }

    /// Client-side filter; never refetches
    pub fn filter_conversations(&mut self, term: &str) {
        self.list.filter(term);
    }

    /// Selection protocol: move rooms, highlight, then mark read
    ///
    /// The thread and the list are only refreshed once mark-read succeeded.
    pub fn select_conversation(&mut self, id: &ConversationId) {
        if self.realtime.select(id) {
            info!("Selected conversation {}", id);
        }
        self.list.set_active(id);

        if let Err(e) = self.api.mark_read(id) {
            error!("Failed to mark conversation {} as read: {}", id, e);
            return;
        }

        self.load_thread(id);
        self.refresh_conversations();
    }

    /// Select the conversation shown at `index` among the visible rows
    pub fn select_visible(&mut self, index: usize) -> bool {
        match self.list.visible_at(index).cloned() {
            Some(id) => {
                self.select_conversation(&id);
                true
            }
            None => false,
        }
    }

    fn load_thread(&mut self, id: &ConversationId) {
        match self.api.get_messages(id) {
            Ok(messages) => {
                debug!("Fetched {} messages for conversation {}", messages.len(), id);
                self.thread.render(id.clone(), messages);
            }
            Err(e) => {
                error!("Error fetching messages for conversation {}: {}", id, e);
                self.thread.show_error("Error loading messages.");
            }
        }
    }

    /// Send the message box contents to the current conversation
    ///
    /// The box is cleared only when the server accepted the message; the
    /// message itself shows up through the realtime feed.
    pub fn send_message(&mut self) -> ApiResult<ServerMessage> {
        let Some(id) = self.realtime.session().current_conversation().cloned() else {
            return Err(self.reject("Please select a conversation first."));
        };
        if self.message_input.is_empty() {
            return Err(self.reject("Message cannot be empty."));
        }

        match self.api.send_message(&id, &self.message_input) {
            Ok(response) => {
                info!("Message sent to conversation {}", id);
                self.message_input.clear();
                Ok(response)
            }
            Err(e) => Err(self.report_failure("sending message", e)),
        }
    }

    /// Start one conversation per comma-separated phone number
    pub fn start_conversation(
        &mut self,
        phone_numbers: &str,
        contact_name: Option<&str>,
        initial_message: Option<&str>,
    ) -> ApiResult<StartConversationResponse> {
        if phone_numbers.trim().is_empty() {
            debug!("No phone numbers entered");
            return Err(ApiError::validation("Please enter at least one phone number."));
        }

        let contact_name = contact_name.filter(|name| !name.is_empty());
        let initial_message = initial_message.filter(|body| !body.is_empty());
        match self
            .api
            .start_conversation(phone_numbers, initial_message, contact_name)
        {
            Ok(response) => {
                info!("Started {} conversation(s)", response.conversations.len());
                self.notifier.alert(&response.message);
                self.refresh_conversations();
                Ok(response)
            }
            Err(e) => Err(self.report_failure("starting conversation", e)),
        }
    }

    // === Realtime ===

    /// Apply a push or lifecycle event from the realtime feed
    pub fn handle_event(&mut self, event: RealtimeEvent) {
        for dispatch in self.realtime.handle(event) {
            match dispatch {
                Dispatch::AppendToThread(message) => {
                    if self.thread.conversation() == Some(&message.conversation_id) {
                        self.thread.append(message);
                    } else {
                        debug!(
                            "Thread not showing conversation {}; message left to the list",
                            message.conversation_id
                        );
                    }
                }
                Dispatch::RefreshConversations => self.refresh_conversations(),
            }
        }
    }

    // === Bulk composer ===

    pub fn search_sheets(&mut self, query: &str) {
        if let Err(e) = self.composer.load_sheets(self.api.as_ref(), query) {
            warn!("Sheet search '{}' failed: {}", query, e);
        }
    }

    pub fn select_sheet(&mut self, sheet_id: Option<&str>) {
        if let Err(e) = self.composer.select_sheet(self.api.as_ref(), sheet_id) {
            warn!("Sheet preview failed: {}", e);
        }
    }

    /// Submit the bulk composer and refresh the list on success
    pub fn send_bulk(&mut self) -> ApiResult<BulkSendReport> {
        match self.composer.submit(self.api.as_ref()) {
            Ok(report) => {
                info!("Bulk send finished with {} result(s)", report.results.len());
                self.notifier.alert(&format!(
                    "Bulk SMS sent successfully!\n{}",
                    report.results.join("\n")
                ));
                self.refresh_conversations();
                Ok(report)
            }
            Err(e @ ApiError::Validation { .. }) => {
                self.notifier.alert(&e.user_message());
                Err(e)
            }
            Err(e) => Err(self.report_failure("sending bulk SMS", e)),
        }
    }

    // === Settings ===

    pub fn save_twilio_settings(
        &mut self,
        account_sid: &str,
        auth_token: &str,
        phone_number: &str,
    ) -> ApiResult<ServerMessage> {
        self.settings
            .save_twilio(self.api.as_ref(), account_sid, auth_token, phone_number)
    }

    pub fn import_history(&mut self, confirmed: bool) -> Option<ApiResult<ServerMessage>> {
        let result = self.settings.import_history(self.api.as_ref(), confirmed)?;
        if result.is_ok() {
            self.refresh_conversations();
        }
        Some(result)
    }

    pub fn recalculate_last_activity(&mut self) -> ApiResult<ServerMessage> {
        let result = self.settings.recalculate_last_activity(self.api.as_ref());
        if result.is_ok() {
            self.refresh_conversations();
        }
        result
    }

    pub fn apply_sheet_contacts(&mut self, pasted: &str) -> ApiResult<ServerMessage> {
        let result = self.settings.apply_sheet_contacts(self.api.as_ref(), pasted);
        if result.is_ok() {
            self.refresh_conversations();
        }
        result
    }

    // === Alerts ===

    fn reject(&self, message: &str) -> ApiError {
        self.notifier.alert(message);
        ApiError::validation(message)
    }

    /// Alert a failed action: server text when there is one, a generic
    /// line when the request never completed
    fn report_failure(&self, action: &str, e: ApiError) -> ApiError {
        error!("Error {}: {}", action, e);
        let alert = match &e {
            ApiError::Server { message, .. } | ApiError::Validation { message } => {
                format!("Error {}: {}", action, message)
            }
            ApiError::Network { .. } | ApiError::Decode { .. } => {
                format!("An error occurred while {}.", action)
            }
        };
        self.notifier.alert(&alert);
        e
    }
}
