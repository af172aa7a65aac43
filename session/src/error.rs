//! Error types for the session core.
//!
//! ERROR HANDLING
//! ==============
//! Only `AuthError` is ever shown to an end user. Storage, record, and
//! gateway errors are caught at the manager boundary and turned into logged
//! state outcomes, so no transport detail reaches UI components.

use thiserror::Error;

/// Failure of a key/value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// A persisted user record that failed schema validation.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed user record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("user record has neither email nor name")]
    MissingIdentity,
}

/// Failure talking to the remote auth gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Login/registration failure, phrased for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend refused the request; carries its message.
    #[error("{0}")]
    Rejected(String),
    #[error("network unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected response from server: {0}")]
    InvalidResponse(String),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl From<GatewayError> for AuthError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Status { status, body } => Self::Rejected(rejection_message(status, &body)),
            GatewayError::Network(reason) => Self::Unavailable(reason),
            GatewayError::Timeout => Self::Unavailable("request timed out".to_owned()),
            GatewayError::Decode(reason) => Self::InvalidResponse(reason),
        }
    }
}

/// Body text when the server sent one, otherwise a generic status line.
pub(crate) fn rejection_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("Request failed: {status}")
    } else {
        body.to_owned()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
