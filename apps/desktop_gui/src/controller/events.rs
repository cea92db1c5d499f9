//! UI/backend events and error modeling for the desktop controller.

use shared::{
    domain::AuthOperation,
    error::{AuthError, AuthErrorKind},
};

pub enum UiEvent {
    AuthSucceeded(AuthOperation),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Auth(AuthOperation),
    General,
}

pub fn categorize_auth_error(kind: AuthErrorKind) -> UiErrorCategory {
    match kind {
        AuthErrorKind::InvalidCredentials => UiErrorCategory::Auth,
        AuthErrorKind::CodeMismatch | AuthErrorKind::CodeExpired => UiErrorCategory::Validation,
        AuthErrorKind::NetworkUnavailable => UiErrorCategory::Transport,
        AuthErrorKind::Unknown => UiErrorCategory::Unknown,
    }
}

/// User-facing copy for a collaborator failure.
pub fn describe_auth_failure(error: &AuthError) -> String {
    match error.kind {
        AuthErrorKind::InvalidCredentials => "Email or password is incorrect.".to_string(),
        AuthErrorKind::CodeMismatch => "That code does not match the one we sent.".to_string(),
        AuthErrorKind::CodeExpired => {
            "That code has expired; request a new one.".to_string()
        }
        AuthErrorKind::NetworkUnavailable => {
            "Authentication service unreachable; check your connection and retry.".to_string()
        }
        AuthErrorKind::Unknown => format!("Unexpected authentication error: {}", error.message),
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_auth_error(context: UiErrorContext, error: &AuthError) -> Self {
        Self {
            category: categorize_auth_error(error.kind),
            context,
            message: describe_auth_failure(error),
        }
    }

    /// For infrastructure failures that never produced a typed error.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("disconnected")
            || message_lower.contains("unavailable")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_error_kinds_map_to_ui_categories() {
        assert_eq!(
            categorize_auth_error(AuthErrorKind::InvalidCredentials),
            UiErrorCategory::Auth
        );
        assert_eq!(
            categorize_auth_error(AuthErrorKind::CodeMismatch),
            UiErrorCategory::Validation
        );
        assert_eq!(
            categorize_auth_error(AuthErrorKind::CodeExpired),
            UiErrorCategory::Validation
        );
        assert_eq!(
            categorize_auth_error(AuthErrorKind::NetworkUnavailable),
            UiErrorCategory::Transport
        );
        assert_eq!(
            categorize_auth_error(AuthErrorKind::Unknown),
            UiErrorCategory::Unknown
        );
    }

    #[test]
    fn auth_errors_keep_their_operation_context() {
        let err = UiError::from_auth_error(
            UiErrorContext::Auth(AuthOperation::Login),
            &AuthError::invalid_credentials("rejected"),
        );
        assert_eq!(err.category(), UiErrorCategory::Auth);
        assert_eq!(err.context(), UiErrorContext::Auth(AuthOperation::Login));
        assert_eq!(err.message(), "Email or password is incorrect.");
    }

    #[test]
    fn classifies_worker_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Auth command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }
}
