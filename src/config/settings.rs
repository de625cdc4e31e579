use std::fmt;
use std::time::Duration;

use base64::Engine;
use serde::Deserialize;

use crate::utils::constants::{DEFAULT_BASE_AUTH_URL, DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL};

/// ================================
/// Client configuration
/// ================================
///
/// Field names on the wire follow the documented option names
/// (`accountId`, `clientId`, `clientSecret`, `baseURL`, `baseAuthURL`, `timeout`).
#[derive(Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    #[serde(rename = "baseURL", default = "default_base_url")]
    pub base_url: String,
    #[serde(rename = "baseAuthURL", default = "default_base_auth_url")]
    pub base_auth_url: String,
    /// milliseconds, `0` means no timeout
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl ClientConfig {
    pub fn new(
        account_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: default_base_url(),
            base_auth_url: default_base_auth_url(),
            timeout: None,
            logging: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_base_auth_url(mut self, base_auth_url: impl Into<String>) -> Self {
        self.base_auth_url = base_auth_url.into();
        self
    }

    /// Zero disables the timeout; anything else is rounded down to whole
    /// milliseconds but never below one.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(if timeout.is_zero() {
            0
        } else {
            u64::try_from(timeout.as_millis())
                .unwrap_or(u64::MAX)
                .max(1)
        });
        self
    }

    /// Configured timeout; `None` when absent or zero.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            account_id: self.account_id.to_owned(),
            client_id: self.client_id.to_owned(),
            client_secret: self.client_secret.to_owned(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("account_id", &"<redacted>")
            .field("client_id", &"<redacted>")
            .field("client_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("base_auth_url", &self.base_auth_url)
            .field("timeout", &self.timeout)
            .field("logging", &self.logging)
            .finish()
    }
}

/// ================================
/// Credentials
/// ================================
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_id: String,
    pub client_id: String,
    client_secret: String,
}

impl Credentials {
    /// `Basic base64(client_id:client_secret)`
    pub fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &"<redacted>")
            .field("client_id", &"<redacted>")
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(default_log_level(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_base_auth_url() -> String {
    DEFAULT_BASE_AUTH_URL.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
