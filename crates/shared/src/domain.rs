use serde::{Deserialize, Serialize};

/// Number of single-character slots in a verification code.
pub const CODE_LEN: usize = 6;

/// Discrete stage of the account access flow currently displayed.
///
/// Exactly one step is active at a time; the flow starts at `Login` and the
/// value lives for the whole client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Login,
    ForgotPassword,
    VerifyCode,
    ResetPassword,
}

/// Operations the authentication collaborator exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthOperation {
    Login,
    RequestResetCode,
    VerifyCode,
    ResendCode,
    ResetPassword,
}
