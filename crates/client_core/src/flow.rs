//! Pure state machine for the account access flow.
//!
//! Holds the current [`Step`] and every field draft, and applies one user
//! action at a time. Nothing here touches a rendering environment or the
//! authentication collaborator, so the whole machine is unit-testable.

use shared::domain::{AuthOperation, Step, CODE_LEN};

/// Scalar text fields addressable by edit actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    NewPassword,
    ConfirmPassword,
}

/// Password-type fields whose masking can be toggled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVisibility {
    Password,
    NewPassword,
    ConfirmPassword,
}

/// One discrete user action against the flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowAction {
    /// Unconditional step overwrite. Legality of a path is a property of the
    /// UI wiring, not of this setter.
    SetStep(Step),
    SetField(Field, String),
    SetCodeSlot(usize, String),
    ToggleVisibility(PasswordVisibility),
}

/// All transient state owned by the flow controller.
///
/// Drafts live only in memory and are discarded with the value; nothing is
/// persisted across restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowState {
    pub step: Step,
    pub email: String,
    pub password: String,
    pub code: [String; CODE_LEN],
    pub new_password: String,
    pub confirm_password: String,
    pub show_password: bool,
    pub show_new_password: bool,
    pub show_confirm_password: bool,
}

impl Default for FlowState {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowState {
    pub fn new() -> Self {
        Self {
            step: Step::Login,
            email: String::new(),
            password: String::new(),
            code: Default::default(),
            new_password: String::new(),
            confirm_password: String::new(),
            show_password: false,
            show_new_password: false,
            show_confirm_password: false,
        }
    }

    /// Applies one action and returns the next state.
    #[must_use]
    pub fn apply(mut self, action: FlowAction) -> Self {
        match action {
            FlowAction::SetStep(next) => self.step = next,
            FlowAction::SetField(field, value) => match field {
                Field::Email => self.email = value,
                Field::Password => self.password = value,
                Field::NewPassword => self.new_password = value,
                Field::ConfirmPassword => self.confirm_password = value,
            },
            FlowAction::SetCodeSlot(index, value) => {
                // The rendering loop only ever addresses the six slots it
                // draws, so an out-of-range index is a caller bug.
                debug_assert!(index < CODE_LEN, "code slot index out of range");
                if let Some(slot) = self.code.get_mut(index) {
                    // Each slot holds at most one character (one box, one key).
                    *slot = value.chars().take(1).collect();
                }
            }
            FlowAction::ToggleVisibility(field) => match field {
                PasswordVisibility::Password => self.show_password = !self.show_password,
                PasswordVisibility::NewPassword => {
                    self.show_new_password = !self.show_new_password;
                }
                PasswordVisibility::ConfirmPassword => {
                    self.show_confirm_password = !self.show_confirm_password;
                }
            },
        }
        self
    }

    pub fn can_submit_login(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }

    /// The observed flow enables "Send Code" regardless of the email draft.
    pub fn can_send_code(&self) -> bool {
        true
    }

    pub fn can_confirm_code(&self) -> bool {
        self.code.iter().all(|slot| !slot.is_empty())
    }

    pub fn can_reset_password(&self) -> bool {
        !self.new_password.is_empty() && !self.confirm_password.is_empty()
    }

    /// Verification code joined in slot order.
    pub fn code_string(&self) -> String {
        self.code.concat()
    }

    /// Step reached by the back affordance, where one exists.
    pub fn back_target(&self) -> Option<Step> {
        match self.step {
            Step::ForgotPassword => Some(Step::Login),
            Step::VerifyCode => Some(Step::ForgotPassword),
            Step::Login | Step::ResetPassword => None,
        }
    }
}

/// Step shown once a collaborator operation reports success.
///
/// Login and password reset are terminal submissions and stay in place;
/// resending a code never navigates.
pub fn next_step_on_success(operation: AuthOperation, current: Step) -> Step {
    match operation {
        AuthOperation::RequestResetCode => Step::VerifyCode,
        AuthOperation::VerifyCode => Step::ResetPassword,
        AuthOperation::Login | AuthOperation::ResendCode | AuthOperation::ResetPassword => current,
    }
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod tests;
