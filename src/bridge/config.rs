//! Static per-bridge configuration.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Request/reply timeout used when none (or a non-positive one) is configured.
pub const DEFAULT_TIMEOUT_MS: i64 = 10_000;

/// Reply header through which a responder dictates the response status.
pub const SERVICE_ERROR_CODE_HEADER: &str = "Nats-Service-Error-Code";

/// Configuration for one bridge instance.
///
/// ```
/// use bus_bridge::PublishConfig;
///
/// let config = PublishConfig::from_json(
///     r#"{ "subject": "orders.create", "with_reply": true, "timeout": 2500 }"#,
/// ).unwrap();
/// assert!(config.with_reply);
/// assert_eq!(config.effective_timeout().as_millis(), 2500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishConfig {
    /// Subject template, resolved per request by a `SubjectResolver`.
    pub subject: String,
    /// Wait for a reply instead of fire-and-forget.
    #[serde(default)]
    pub with_reply: bool,
    /// Reply timeout in milliseconds; only used with `with_reply`.
    #[serde(default)]
    pub timeout: i64,
    /// Reply header carrying the service status code.
    #[serde(default = "default_status_header")]
    pub status_header: String,
}

fn default_status_header() -> String {
    SERVICE_ERROR_CODE_HEADER.to_string()
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be decoded
    #[error("invalid bridge config: {0}")]
    Decode(#[from] serde_json::Error),
    /// The subject template is empty
    #[error("bridge subject must not be empty")]
    EmptySubject,
}

impl PublishConfig {
    /// Fire-and-forget configuration for `subject`.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            with_reply: false,
            timeout: 0,
            status_header: default_status_header(),
        }
    }

    /// Switch to request/reply with the given timeout in milliseconds.
    pub fn request_reply(mut self, timeout_ms: i64) -> Self {
        self.with_reply = true;
        self.timeout = timeout_ms;
        self
    }

    /// Use a different reply header for the status override.
    pub fn status_header(mut self, name: impl Into<String>) -> Self {
        self.status_header = name.into();
        self
    }

    /// Decode and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subject.is_empty() {
            return Err(ConfigError::EmptySubject);
        }
        Ok(())
    }

    /// The reply timeout, falling back to `DEFAULT_TIMEOUT_MS` when unset or ≤ 0.
    pub fn effective_timeout(&self) -> Duration {
        let ms = if self.timeout > 0 {
            self.timeout
        } else {
            DEFAULT_TIMEOUT_MS
        };
        Duration::from_millis(ms.unsigned_abs())
    }
}
