//! Client configuration
//!
//! Settings are loaded in this order, later sources winning:
//! 1. Built-in defaults
//! 2. JSON file (~/.config/courier/courier.json)
//! 3. Environment variables (`COURIER_SERVER_URL`, `COURIER_USER_ID`)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Config filename in the Courier config directory
const CONFIG_FILE: &str = "courier.json";

const SERVER_URL_VAR: &str = "COURIER_SERVER_URL";
const USER_ID_VAR: &str = "COURIER_USER_ID";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// Console server origin
    pub server_url: String,
    /// Realtime endpoint; derived from `server_url` when unset
    pub websocket_url: Option<String>,
    /// Operator identity, used to name the user room
    pub user_id: Option<String>,
    pub search_debounce_ms: u64,
    /// Overall HTTP request timeout; unset leaves the transport default
    pub request_timeout_secs: Option<u64>,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            websocket_url: None,
            user_id: None,
            search_debounce_ms: 300,
            request_timeout_secs: None,
        }
    }
}

impl CourierConfig {
    /// Load the config file if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config: Self = config::load_or_default(CONFIG_FILE)?;
        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Load from a specific JSON file, without environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Get the default config file path (~/.config/courier/courier.json)
    pub fn default_path() -> Option<PathBuf> {
        config::config_path(CONFIG_FILE)
    }

    fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SERVER_URL_VAR).filter(|v| !v.is_empty()) {
            self.server_url = url;
        }
        if let Some(user_id) = lookup(USER_ID_VAR).filter(|v| !v.is_empty()) {
            self.user_id = Some(user_id);
        }
        self
    }

    /// Realtime endpoint, `ws(s)://<server>/socket` unless set explicitly
    pub fn websocket_url(&self) -> Result<String> {
        if let Some(url) = &self.websocket_url {
            return Ok(url.clone());
        }

        let mut url = Url::parse(&self.server_url)
            .with_context(|| format!("Invalid server URL: {}", self.server_url))?;
        let scheme = match url.scheme() {
            "https" => "wss",
            _ => "ws",
        };
        url.set_scheme(scheme)
            .map_err(|_| anyhow::anyhow!("Cannot derive websocket URL from {}", self.server_url))?;
        url.set_path("/socket");
        Ok(url.to_string())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
