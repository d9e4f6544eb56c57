use std::io;

use thiserror::Error;

/// Failure of a backend call, normalized to a single displayable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(String),
    /// Non-2xx response. `message` is the body's `detail` or the status fallback.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    /// 2xx response whose body does not match the expected schema.
    #[error("invalid response from backend: {0}")]
    InvalidResponse(String),
    #[error("could not read upload file: {0}")]
    Io(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Generic message for a failed request without a usable `detail`.
pub fn status_message(status: u16) -> String {
    format!("Request failed ({status})")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store file is not a JSON object of strings: {0}")]
    Corrupt(String),
    #[error("could not encode store: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
