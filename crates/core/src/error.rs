// Central Error Types for the Session Client

use crate::domain::{DomainError, IntegrationKind};
use crate::port::TransportError;
use thiserror::Error;

/// Why a single call to the server failed
#[derive(Error, Debug)]
pub enum CallError {
    #[error("Unexpected response from AskOmics (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("AskOmics error: {0}")]
    Server(String),

    #[error("Response is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("Response has no `{0}` field")]
    MissingField(&'static str),

    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client-level error, one variant per operation family
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Authentication failed: {0}")]
    Auth(CallError),

    #[error("File upload failed: {0}")]
    Upload(CallError),

    #[error("Column type guessing failed: {0}")]
    Guess(CallError),

    #[error("{kind} integration failed: {cause}")]
    Integration {
        kind: IntegrationKind,
        cause: CallError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] DomainError),
}

impl ClientError {
    /// Underlying call failure, if the error came from a request
    pub fn call_error(&self) -> Option<&CallError> {
        match self {
            ClientError::Auth(cause)
            | ClientError::Upload(cause)
            | ClientError::Guess(cause)
            | ClientError::Integration { cause, .. } => Some(cause),
            ClientError::Config(_) => None,
        }
    }

    /// HTTP status of a non-success response
    pub fn status(&self) -> Option<u16> {
        match self.call_error()? {
            CallError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message reported by the server in its `error` field
    pub fn server_message(&self) -> Option<&str> {
        match self.call_error()? {
            CallError::Server(message) => Some(message),
            _ => None,
        }
    }
}

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ClientError::Integration {
            kind: IntegrationKind::Ttl,
            cause: CallError::Status {
                status: 401,
                body: "unauthorized".to_string(),
            },
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.server_message(), None);
        assert!(err.to_string().starts_with("TTL integration failed"));
        assert!(err.to_string().contains("unauthorized"));
    }

    #[test]
    fn test_server_message_accessor() {
        let err = ClientError::Auth(CallError::Server("bad key".to_string()));
        assert_eq!(err.server_message(), Some("bad key"));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Authentication failed: AskOmics error: bad key");
    }

    #[test]
    fn test_config_error_has_no_call() {
        let err = ClientError::from(DomainError::NoFileSelected);
        assert!(err.call_error().is_none());
        assert_eq!(err.to_string(), "Invalid configuration: No file selected");
    }
}
