use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure kinds an authentication collaborator can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    InvalidCredentials,
    CodeMismatch,
    CodeExpired,
    NetworkUnavailable,
    Unknown,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::InvalidCredentials, message)
    }

    pub fn code_mismatch(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::CodeMismatch, message)
    }

    pub fn code_expired(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::CodeExpired, message)
    }

    pub fn network_unavailable(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::NetworkUnavailable, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Unknown, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_serializes_snake_case() {
        let err = AuthError::new(AuthErrorKind::InvalidCredentials, "bad password");
        let json = serde_json::to_string(&err).expect("serialize");
        assert!(json.contains("\"invalid_credentials\""));

        let back: AuthError = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.kind, AuthErrorKind::InvalidCredentials);
        assert_eq!(back.message, "bad password");
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = AuthError::code_expired("code issued too long ago");
        assert_eq!(format!("{err}"), "CodeExpired: code issued too long ago");
    }
}
