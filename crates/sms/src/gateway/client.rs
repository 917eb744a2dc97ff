//! Console server HTTP client
//!
//! Provides one method per server capability. Uses synchronous HTTP (ureq)
//! to be executor-agnostic; callers decide which thread blocks on it.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use ureq::http::Response;
use ureq::{Agent, Body};
use url::Url;

use super::ConsoleApi;
use super::api::{
    BulkSendReport, BulkSmsRequest, ErrorBody, MessagesResponse, SendMessageRequest,
    ServerMessage, SheetDataResponse, StartConversationRequest, StartConversationResponse,
    TwilioSettings,
};
use crate::error::{ApiError, ApiResult};
use crate::models::{ConversationId, ConversationSummary, Message, SheetPreview, SheetRef};

/// HTTP client for the console server
pub struct GatewayClient {
    agent: Agent,
    base_url: String,
}

impl GatewayClient {
    /// Create a client for the server at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Server origin, e.g. `http://localhost:5000`
    /// * `timeout` - Overall per-request timeout, `None` for the transport default
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .with_context(|| format!("Invalid server URL: {}", base_url))?;

        // Non-2xx responses carry an `error` body we want to read
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();

        Ok(Self {
            agent: Agent::new_with_config(config),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.agent.get(&url).call().map_err(transport_error)?;
        read_json(response)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .agent
            .post(&url)
            .send_json(body)
            .map_err(transport_error)?;
        read_json(response)
    }

    fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send_empty()
            .map_err(transport_error)?;
        read_json(response)
    }
}

impl ConsoleApi for GatewayClient {
    fn list_sheets(&self, search: Option<&str>) -> ApiResult<Vec<SheetRef>> {
        match search.filter(|q| !q.is_empty()) {
            Some(query) => self.get(&format!(
                "/google_sheets?search={}",
                urlencoding::encode(query)
            )),
            None => self.get("/google_sheets"),
        }
    }

    fn get_sheet_data(&self, sheet_id: &str) -> ApiResult<SheetPreview> {
        let response: SheetDataResponse = self.get(&format!(
            "/google_sheet_data/{}",
            urlencoding::encode(sheet_id)
        ))?;

        if let Some(error) = response.error {
            return Err(ApiError::server(200, error));
        }

        Ok(SheetPreview {
            headers: response.headers,
            data: response.data,
        })
    }

    fn list_conversations(&self) -> ApiResult<Vec<ConversationSummary>> {
        self.get("/api/conversations")
    }

    fn get_messages(&self, conversation_id: &ConversationId) -> ApiResult<Vec<Message>> {
        let response: MessagesResponse = self.get(&format!(
            "/api/conversations/{}/messages",
            urlencoding::encode(conversation_id.as_str())
        ))?;
        Ok(response.into_messages())
    }

    fn mark_read(&self, conversation_id: &ConversationId) -> ApiResult<ServerMessage> {
        self.post_empty(&format!(
            "/api/conversations/{}/mark_read",
            urlencoding::encode(conversation_id.as_str())
        ))
    }

    fn send_message(
        &self,
        conversation_id: &ConversationId,
        body: &str,
    ) -> ApiResult<ServerMessage> {
        self.post_json(
            &format!(
                "/api/send_message/{}",
                urlencoding::encode(conversation_id.as_str())
            ),
            &SendMessageRequest { message: body },
        )
    }

    fn start_conversation(
        &self,
        phone_numbers: &str,
        initial_message: Option<&str>,
        contact_name: Option<&str>,
    ) -> ApiResult<StartConversationResponse> {
        self.post_json(
            "/api/start_conversation",
            &StartConversationRequest {
                phone_numbers,
                initial_message,
                contact_name,
            },
        )
    }

    fn send_bulk_sms(&self, sheet_id: &str, template: &str) -> ApiResult<BulkSendReport> {
        self.post_json(
            "/send_templated_bulk_sms",
            &BulkSmsRequest {
                sheet_id,
                message_template: template,
            },
        )
    }

    fn save_twilio_settings(&self, settings: &TwilioSettings) -> ApiResult<ServerMessage> {
        self.post_json("/api/configure_twilio", settings)
    }

    fn import_twilio_history(&self) -> ApiResult<ServerMessage> {
        self.post_empty("/api/import_twilio_history")
    }

    fn recalculate_last_activity(&self) -> ApiResult<ServerMessage> {
        self.post_empty("/api/recalculate_last_activity")
    }

    fn apply_sheet_contacts(&self, contacts: &serde_json::Value) -> ApiResult<ServerMessage> {
        self.post_json("/api/apply_sheet_contacts", contacts)
    }
}

/// Any error before a status line arrives is a network failure
fn transport_error(e: ureq::Error) -> ApiError {
    ApiError::network(e.to_string())
}

/// Decode a response, turning non-2xx statuses into `ApiError::Server`
fn read_json<T: DeserializeOwned>(mut response: Response<Body>) -> ApiResult<T> {
    let status = response.status();
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(transport_error)?;

    if !status.is_success() {
        return Err(server_error(status.as_u16(), &text));
    }

    serde_json::from_str(&text).map_err(|e| ApiError::decode(e.to_string()))
}

/// Prefer the server's `error` field, else a generic status message
fn server_error(status: u16, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    match parsed.error.filter(|e| !e.is_empty()) {
        Some(message) => ApiError::server(status, message),
        None => ApiError::server(status, format!("HTTP error! status: {}", status)),
    }
}
