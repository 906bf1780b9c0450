//! # Provider Error Types
//!
//! Errors from VMC and CSP calls, classified into transient and permanent failures.

use super::vmc::status::status_description;
use thiserror::Error;

/// Failure of a VMC API call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect, TLS, timeout)
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// 4xx answer; never retried
    #[error("{operation} rejected with HTTP {status}: {}", .messages.join("; "))]
    Rejected {
        operation: &'static str,
        status: u16,
        messages: Vec<String>,
    },

    /// 5xx answer or an unexpected status code
    #[error("{operation} failed with HTTP {status}")]
    Server {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("could not decode {operation} response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} response is missing '{field}'")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    #[error("invalid request path: {0}")]
    Path(#[from] paths::PathBuilderError),
}

impl ApiError {
    /// Whether retrying later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport { .. } | ApiError::Server { .. })
    }

    /// HTTP status of the answer, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable meaning of the HTTP status, if one was received
    pub fn description(&self) -> Option<&'static str> {
        self.status().map(status_description)
    }

    /// Short label for metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "transport",
            ApiError::Rejected { .. } => "rejected",
            ApiError::Server { .. } => "server_error",
            ApiError::Decode { .. } => "decode",
            ApiError::MissingField { .. } => "missing_field",
            ApiError::Path(_) => "invalid_path",
        }
    }
}

/// Failure of the CSP token exchange
#[derive(Debug, Error)]
pub enum AuthError {
    /// The caller supplied no usable credential material
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// CSP refused the API token
    #[error("CSP rejected the API token (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// CSP could not be reached or answered with a server error
    #[error("CSP token exchange unavailable: {message}")]
    Unavailable { message: String },

    #[error("CSP token response was malformed: {message}")]
    Malformed { message: String },
}

impl AuthError {
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::Unavailable { .. })
    }
}
