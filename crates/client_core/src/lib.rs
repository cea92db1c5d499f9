use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::AuthOperation,
    error::AuthError,
};
use tracing::{info, warn};

pub mod flow;
pub use flow::{next_step_on_success, Field, FlowAction, FlowState, PasswordVisibility};

/// Authentication collaborator contract.
///
/// The flow controller depends on this seam, never on a concrete transport;
/// production wiring injects a real backend, tests substitute fakes. Every
/// operation resolves to plain success or a typed [`AuthError`].
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError>;
    async fn request_reset_code(&self, email: &str) -> Result<(), AuthError>;
    async fn verify_code(&self, email: &str, code: &str) -> Result<(), AuthError>;
    async fn resend_code(&self, email: &str) -> Result<(), AuthError>;
    async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), AuthError>;
}

/// Stand-in collaborator used when no backend is wired up.
///
/// Accepts every request and leaves a diagnostic log entry, which is the
/// shipped behavior of the flow today.
pub struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn login(&self, email: &str, _password: &str) -> Result<(), AuthError> {
        info!(email, "stub auth service accepted login");
        Ok(())
    }

    async fn request_reset_code(&self, email: &str) -> Result<(), AuthError> {
        info!(email, "stub auth service accepted reset code request");
        Ok(())
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<(), AuthError> {
        info!(email, code, "stub auth service accepted verification code");
        Ok(())
    }

    async fn resend_code(&self, email: &str) -> Result<(), AuthError> {
        info!(email, "stub auth service accepted code resend");
        Ok(())
    }

    async fn reset_password(&self, email: &str, _new_password: &str) -> Result<(), AuthError> {
        info!(email, "stub auth service accepted password reset");
        Ok(())
    }
}

/// Client-side session over an injected [`AuthService`].
///
/// Awaits each collaborator call, logs the outcome, and hands the branched
/// result back to the caller. The session itself keeps no flow state; that
/// lives in [`flow::FlowState`] on the UI side.
pub struct AuthSession {
    service: Arc<dyn AuthService>,
}

impl AuthSession {
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.settle(
            AuthOperation::Login,
            email,
            self.service.login(email, password).await,
        )
    }

    pub async fn request_reset_code(&self, email: &str) -> Result<(), AuthError> {
        self.settle(
            AuthOperation::RequestResetCode,
            email,
            self.service.request_reset_code(email).await,
        )
    }

    pub async fn verify_code(&self, email: &str, code: &str) -> Result<(), AuthError> {
        self.settle(
            AuthOperation::VerifyCode,
            email,
            self.service.verify_code(email, code).await,
        )
    }

    pub async fn resend_code(&self, email: &str) -> Result<(), AuthError> {
        self.settle(
            AuthOperation::ResendCode,
            email,
            self.service.resend_code(email).await,
        )
    }

    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), AuthError> {
        self.settle(
            AuthOperation::ResetPassword,
            email,
            self.service.reset_password(email, new_password).await,
        )
    }

    fn settle(
        &self,
        operation: AuthOperation,
        email: &str,
        result: Result<(), AuthError>,
    ) -> Result<(), AuthError> {
        match &result {
            Ok(()) => info!(?operation, email, "auth operation succeeded"),
            Err(err) => warn!(?operation, email, kind = ?err.kind, "auth operation failed: {err}"),
        }
        result
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
