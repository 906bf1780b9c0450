//! # Handler Error Types
//!
//! Terminal failures reported to the orchestrator.

use crate::model::HandlerErrorCode;
use crate::provider::{ApiError, AuthError};
use thiserror::Error;

/// Terminal failure of an invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalFailure(String),
}

impl HandlerError {
    pub fn error_code(&self) -> HandlerErrorCode {
        match self {
            HandlerError::InvalidCredentials(_) => HandlerErrorCode::InvalidCredentials,
            HandlerError::InvalidRequest(_) => HandlerErrorCode::InvalidRequest,
            HandlerError::NotFound(_) => HandlerErrorCode::NotFound,
            HandlerError::InternalFailure(_) => HandlerErrorCode::InternalFailure,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            HandlerError::InvalidCredentials(message)
            | HandlerError::InvalidRequest(message)
            | HandlerError::NotFound(message)
            | HandlerError::InternalFailure(message) => message,
        }
    }

    /// Failure of a one-shot VMC call that has no better classification
    pub(crate) fn internal(context: &str, err: &ApiError) -> Self {
        HandlerError::InternalFailure(describe(context, err))
    }
}

impl From<AuthError> for HandlerError {
    fn from(err: AuthError) -> Self {
        HandlerError::InvalidCredentials(format!("Authentication failed: {err}"))
    }
}

/// Human-readable message for an API failure, with the status meaning when known
pub(crate) fn describe(context: &str, err: &ApiError) -> String {
    match err.description() {
        Some(description) => format!("{context}: {err} ({description})"),
        None => format!("{context}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            HandlerError::NotFound("gone".to_string()).error_code(),
            HandlerErrorCode::NotFound
        );
        assert_eq!(
            HandlerError::InternalFailure("x".to_string()).error_code(),
            HandlerErrorCode::InternalFailure
        );
    }

    #[test]
    fn test_auth_error_is_invalid_credentials() {
        let err: HandlerError = AuthError::Rejected {
            status: 400,
            message: "invalid_grant".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), HandlerErrorCode::InvalidCredentials);
        assert!(err.message().contains("invalid_grant"));
    }

    #[test]
    fn test_describe_includes_status_meaning() {
        let err = ApiError::Rejected {
            operation: "delete_sddc",
            status: 404,
            messages: vec!["no such sddc".to_string()],
        };
        let message = describe("Failed to delete SDDC", &err);
        assert!(message.starts_with("Failed to delete SDDC: delete_sddc rejected with HTTP 404"));
        assert!(message.ends_with("(Organization or SDDC with this identifier is not found)"));
    }
}
