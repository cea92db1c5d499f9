//! Command orchestration helpers from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues one command for the auth worker. Returns whether the command was
/// accepted; on failure the status line explains what went wrong.
#[must_use]
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = match &cmd {
        BackendCommand::Login { .. } => "login",
        BackendCommand::SendCode { .. } => "send_code",
        BackendCommand::ConfirmCode { .. } => "confirm_code",
        BackendCommand::ResendCode { .. } => "resend_code",
        BackendCommand::ResetPassword { .. } => "reset_password",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Auth command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}
