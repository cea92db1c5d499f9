use super::*;
use std::sync::Mutex;

use shared::error::AuthErrorKind;

#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordedCall {
    Login { email: String, password: String },
    RequestResetCode { email: String },
    VerifyCode { email: String, code: String },
    ResendCode { email: String },
    ResetPassword { email: String, new_password: String },
}

struct RecordingAuthService {
    fail_with: Option<AuthError>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingAuthService {
    fn ok() -> Self {
        Self {
            fail_with: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing(error: AuthError) -> Self {
        Self {
            fail_with: Some(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn record(&self, call: RecordedCall) -> Result<(), AuthError> {
        self.calls.lock().expect("calls lock").push(call);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl AuthService for RecordingAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.record(RecordedCall::Login {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    async fn request_reset_code(&self, email: &str) -> Result<(), AuthError> {
        self.record(RecordedCall::RequestResetCode {
            email: email.to_string(),
        })
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<(), AuthError> {
        self.record(RecordedCall::VerifyCode {
            email: email.to_string(),
            code: code.to_string(),
        })
    }

    async fn resend_code(&self, email: &str) -> Result<(), AuthError> {
        self.record(RecordedCall::ResendCode {
            email: email.to_string(),
        })
    }

    async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), AuthError> {
        self.record(RecordedCall::ResetPassword {
            email: email.to_string(),
            new_password: new_password.to_string(),
        })
    }
}

fn session_over(service: RecordingAuthService) -> (AuthSession, Arc<Mutex<Vec<RecordedCall>>>) {
    let calls = Arc::clone(&service.calls);
    (AuthSession::new(Arc::new(service)), calls)
}

#[tokio::test]
async fn login_success_reaches_the_collaborator() {
    let (session, calls) = session_over(RecordingAuthService::ok());

    session.login("a@b.com", "hunter2").await.expect("login");

    assert_eq!(
        calls.lock().expect("calls lock").as_slice(),
        [RecordedCall::Login {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        }]
    );
}

#[tokio::test]
async fn login_failure_surfaces_the_collaborator_error() {
    let (session, _) = session_over(RecordingAuthService::failing(
        AuthError::invalid_credentials("password rejected"),
    ));

    let err = session
        .login("a@b.com", "wrong")
        .await
        .expect_err("login must fail");
    assert_eq!(err.kind, AuthErrorKind::InvalidCredentials);
    assert_eq!(err.message, "password rejected");
}

#[tokio::test]
async fn verify_code_forwards_the_joined_code() {
    let (session, calls) = session_over(RecordingAuthService::ok());

    // The code travels as a single six-character string, joined in slot order.
    let mut flow = FlowState::new();
    for (index, digit) in ["9", "8", "7", "6", "5", "4"].iter().enumerate() {
        flow = flow.apply(FlowAction::SetCodeSlot(index, digit.to_string()));
    }
    session
        .verify_code("a@b.com", &flow.code_string())
        .await
        .expect("verify");

    assert_eq!(
        calls.lock().expect("calls lock").as_slice(),
        [RecordedCall::VerifyCode {
            email: "a@b.com".to_string(),
            code: "987654".to_string(),
        }]
    );
}

#[tokio::test]
async fn reset_journey_calls_operations_in_dispatch_order() {
    let (session, calls) = session_over(RecordingAuthService::ok());

    session
        .request_reset_code("a@b.com")
        .await
        .expect("send code");
    session.resend_code("a@b.com").await.expect("resend");
    session
        .verify_code("a@b.com", "123456")
        .await
        .expect("verify");
    session
        .reset_password("a@b.com", "new-secret")
        .await
        .expect("reset");

    assert_eq!(
        calls.lock().expect("calls lock").as_slice(),
        [
            RecordedCall::RequestResetCode {
                email: "a@b.com".to_string(),
            },
            RecordedCall::ResendCode {
                email: "a@b.com".to_string(),
            },
            RecordedCall::VerifyCode {
                email: "a@b.com".to_string(),
                code: "123456".to_string(),
            },
            RecordedCall::ResetPassword {
                email: "a@b.com".to_string(),
                new_password: "new-secret".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn failed_operations_still_record_the_attempt() {
    let service = RecordingAuthService::failing(AuthError::network_unavailable("no route"));
    let calls = Arc::clone(&service.calls);
    let session = AuthSession::new(Arc::new(service));

    let err = session
        .request_reset_code("a@b.com")
        .await
        .expect_err("send code must fail");
    assert_eq!(err.kind, AuthErrorKind::NetworkUnavailable);
    assert_eq!(calls.lock().expect("calls lock").len(), 1);
}

#[tokio::test]
async fn stub_service_accepts_every_operation() {
    let session = AuthSession::new(Arc::new(StubAuthService));

    session.login("a@b.com", "pw").await.expect("login");
    session.request_reset_code("a@b.com").await.expect("send");
    session
        .verify_code("a@b.com", "123456")
        .await
        .expect("verify");
    session.resend_code("a@b.com").await.expect("resend");
    session
        .reset_password("a@b.com", "pw2")
        .await
        .expect("reset");
}
