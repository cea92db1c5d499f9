//! Auth worker: drains the UI command queue on a dedicated tokio runtime and
//! answers with UI events.

use std::{sync::Arc, thread};

use client_core::{AuthSession, AuthService, StubAuthService};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::AuthOperation;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Default wiring: no backend is configured, so the stub collaborator accepts
/// everything and only logs.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    launch_with_service(Arc::new(StubAuthService), cmd_rx, ui_tx)
}

pub fn launch_with_service(
    service: Arc<dyn AuthService>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Auth worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("auth worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build auth worker runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let session = AuthSession::new(service);
            let _ = ui_tx.try_send(UiEvent::Info("Auth worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                let (operation, result) = match cmd {
                    BackendCommand::Login { email, password } => (
                        AuthOperation::Login,
                        session.login(&email, &password).await,
                    ),
                    BackendCommand::SendCode { email } => (
                        AuthOperation::RequestResetCode,
                        session.request_reset_code(&email).await,
                    ),
                    BackendCommand::ConfirmCode { email, code } => (
                        AuthOperation::VerifyCode,
                        session.verify_code(&email, &code).await,
                    ),
                    BackendCommand::ResendCode { email } => (
                        AuthOperation::ResendCode,
                        session.resend_code(&email).await,
                    ),
                    BackendCommand::ResetPassword {
                        email,
                        new_password,
                    } => (
                        AuthOperation::ResetPassword,
                        session.reset_password(&email, &new_password).await,
                    ),
                };

                let event = match result {
                    Ok(()) => UiEvent::AuthSucceeded(operation),
                    Err(err) => UiEvent::Error(UiError::from_auth_error(
                        UiErrorContext::Auth(operation),
                        &err,
                    )),
                };
                let _ = ui_tx.try_send(event);
            }
        });
    });
}
