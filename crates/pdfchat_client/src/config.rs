use std::time::Duration;

use url::Url;

use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "PDFCHAT_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Backend root without a trailing slash.
    pub base_url: String,
    /// `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
    /// `None` means a hung request waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl ClientSettings {
    /// Settings with the base URL taken from `PDFCHAT_API_BASE_URL`, or the
    /// local default when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = base_url_from_env_value(std::env::var(BASE_URL_ENV).ok())?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(raw)?;
        Ok(self)
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Resolves the configured value of the base URL variable. Unset or blank
/// falls back to [`DEFAULT_BASE_URL`].
pub fn base_url_from_env_value(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => normalize_base_url(&raw),
        _ => Ok(DEFAULT_BASE_URL.to_string()),
    }
}

/// Strips one trailing slash and checks the result is an absolute http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(stripped).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other}"))),
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(stripped.to_string())
}
