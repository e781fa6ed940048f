//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into services. Nothing here reads the environment: the binary looks variables up and
//! hands the raw values to the `*_from_env_value` helpers, which keeps parsing testable.

use crate::constants::{DEFAULT_API_TOKEN, DEFAULT_HOST, DEFAULT_PORT};
use crate::{CaseError, CaseResult};
use std::fmt;
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone)]
pub struct CoreConfig {
    api_token: String,
    host: String,
    port: u16,
    poll_interval: Option<Duration>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::InvalidConfig`] if `api_token` or `host` is blank.
    pub fn new(
        api_token: String,
        host: String,
        port: u16,
        poll_interval: Option<Duration>,
    ) -> CaseResult<Self> {
        if api_token.trim().is_empty() {
            return Err(CaseError::InvalidConfig(
                "API_TOKEN cannot be empty".into(),
            ));
        }
        if host.trim().is_empty() {
            return Err(CaseError::InvalidConfig("HOST cannot be empty".into()));
        }

        Ok(Self {
            api_token,
            host,
            port,
            poll_interval,
        })
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Interval for background ingestion, if enabled.
    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval
    }
}

impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api_token", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

/// Resolve the shared API token from an optional `API_TOKEN` value.
pub fn api_token_from_env_value(value: Option<String>) -> String {
    value.unwrap_or_else(|| DEFAULT_API_TOKEN.into())
}

/// Resolve the bind host from an optional `HOST` value.
pub fn host_from_env_value(value: Option<String>) -> String {
    value.unwrap_or_else(|| DEFAULT_HOST.into())
}

/// Parse an optional `PORT` value, defaulting to 5000.
///
/// # Errors
///
/// Returns [`CaseError::InvalidConfig`] if the value is not a valid port number.
pub fn port_from_env_value(value: Option<String>) -> CaseResult<u16> {
    match value {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| CaseError::InvalidConfig(format!("PORT is not a valid port: {raw:?}"))),
    }
}

/// Parse an optional `CASE_POLL_INTERVAL_SECS` value.
///
/// Unset, empty or `0` disables background polling.
///
/// # Errors
///
/// Returns [`CaseError::InvalidConfig`] if the value is not a whole number of seconds.
pub fn poll_interval_from_env_value(value: Option<String>) -> CaseResult<Option<Duration>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let secs = trimmed.parse::<u64>().map_err(|_| {
        CaseError::InvalidConfig(format!(
            "CASE_POLL_INTERVAL_SECS is not a whole number of seconds: {raw:?}"
        ))
    })?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}
