use client_core::{
    flow::{Field, FlowAction, FlowState, PasswordVisibility},
    next_step_on_success,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{AuthOperation, Step, CODE_LEN};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const BRAND_WORDMARK: &str = "CWCNFP";
const BRAND_FILL: egui::Color32 = egui::Color32::from_rgb(0x36, 0x79, 0xF2);

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub email: String,
    pub window_title: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            window_title: format!("{BRAND_WORDMARK} Account Access"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round() as u8
    };
    egui::Color32::from_rgb(mix(c.r()), mix(c.g()), mix(c.b()))
}

fn primary_button(label: &str, width: f32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(label).strong().size(16.0))
        .min_size(egui::vec2(width, 40.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusField {
    Email,
    NewPassword,
}

// Stable per-view focus state so text boxes keep focus reliably.
#[derive(Debug, Clone)]
struct AuthUiState {
    focus: Option<FocusField>,
    attempted_auto_focus: bool,
}

impl Default for AuthUiState {
    fn default() -> Self {
        Self {
            focus: Some(FocusField::Email),
            attempted_auto_focus: false,
        }
    }
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    flow: FlowState,
    // Operation awaiting a collaborator answer; submits are disabled meanwhile.
    pending: Option<AuthOperation>,

    status: String,
    status_banner: Option<StatusBanner>,
    auth_ui: AuthUiState,
}

impl DesktopGuiApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut flow = FlowState::new();
        if !startup.email.is_empty() {
            flow = flow.apply(FlowAction::SetField(Field::Email, startup.email));
        }
        Self {
            cmd_tx,
            ui_rx,
            flow,
            pending: None,
            status: "Not signed in".to_string(),
            status_banner: None,
            auth_ui: AuthUiState::default(),
        }
    }

    fn apply(&mut self, action: FlowAction) {
        self.flow = std::mem::take(&mut self.flow).apply(action);
    }

    fn go_to(&mut self, step: Step) {
        self.apply(FlowAction::SetStep(step));
        self.status_banner = None;
        self.auth_ui.focus = match step {
            Step::Login | Step::ForgotPassword => Some(FocusField::Email),
            Step::ResetPassword => Some(FocusField::NewPassword),
            Step::VerifyCode => None,
        };
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::AuthSucceeded(operation) => {
                    self.pending = None;
                    self.status_banner = None;
                    let next = next_step_on_success(operation, self.flow.step);
                    if next != self.flow.step {
                        self.go_to(next);
                    }
                    self.status = match operation {
                        AuthOperation::Login => "Signed in".to_string(),
                        AuthOperation::RequestResetCode => "Verification code sent".to_string(),
                        AuthOperation::VerifyCode => {
                            "Code confirmed - choose a new password".to_string()
                        }
                        AuthOperation::ResendCode => "Verification code resent".to_string(),
                        AuthOperation::ResetPassword => "Password reset complete".to_string(),
                    };
                }
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    self.pending = None;
                    self.status = err.message().to_string();
                    self.status_banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message: format!("{}: {}", err_label(err.category()), err.message()),
                    });
                    if err.context() == UiErrorContext::Auth(AuthOperation::Login) {
                        self.auth_ui.focus = Some(FocusField::Email);
                    }
                }
            }
        }
    }

    // ---------- submit paths (each one re-checks its guard, so keyboard
    // submission is blocked exactly like the disabled button) ----------

    fn try_login(&mut self) {
        if self.pending.is_some() || !self.flow.can_submit_login() {
            return;
        }
        self.status_banner = None;
        let cmd = BackendCommand::Login {
            email: self.flow.email.clone(),
            password: self.flow.password.clone(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.pending = Some(AuthOperation::Login);
        }
    }

    fn try_send_code(&mut self) {
        if self.pending.is_some() || !self.flow.can_send_code() {
            return;
        }
        self.status_banner = None;
        let cmd = BackendCommand::SendCode {
            email: self.flow.email.clone(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.pending = Some(AuthOperation::RequestResetCode);
        }
    }

    fn try_confirm_code(&mut self) {
        if self.pending.is_some() || !self.flow.can_confirm_code() {
            return;
        }
        self.status_banner = None;
        let cmd = BackendCommand::ConfirmCode {
            email: self.flow.email.clone(),
            code: self.flow.code_string(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.pending = Some(AuthOperation::VerifyCode);
        }
    }

    fn try_resend_code(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let cmd = BackendCommand::ResendCode {
            email: self.flow.email.clone(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.pending = Some(AuthOperation::ResendCode);
        }
    }

    fn try_reset_password(&mut self) {
        if self.pending.is_some() || !self.flow.can_reset_password() {
            return;
        }
        self.status_banner = None;
        let cmd = BackendCommand::ResetPassword {
            email: self.flow.email.clone(),
            new_password: self.flow.new_password.clone(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.pending = Some(AuthOperation::ResetPassword);
        }
    }

    // ---------- shared widgets ----------

    fn take_focus_request(&mut self) -> Option<FocusField> {
        if !self.auth_ui.attempted_auto_focus {
            self.auth_ui.attempted_auto_focus = true;
            self.auth_ui.focus
        } else if self.auth_ui.focus.is_some() {
            self.auth_ui.focus.take()
        } else {
            None
        }
    }

    fn auth_text_field(
        &mut self,
        ui: &mut egui::Ui,
        id: &'static str,
        label: &str,
        hint: &str,
        value: &mut String,
        should_focus: bool,
    ) -> egui::Response {
        ui.label(egui::RichText::new(label).strong());
        let edit = egui::TextEdit::singleline(value)
            .id_salt(id)
            .hint_text(
                egui::RichText::new(hint)
                    .color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
            )
            .desired_width(f32::INFINITY);
        let response = ui.add_sized([ui.available_width(), 34.0], edit);
        if should_focus {
            response.request_focus();
        }
        response
    }

    fn password_text_field(
        &mut self,
        ui: &mut egui::Ui,
        id: &'static str,
        label: &str,
        value: &mut String,
        show: bool,
        should_focus: bool,
    ) -> (egui::Response, bool) {
        ui.label(egui::RichText::new(label).strong());
        let mut toggled = false;
        let response = ui
            .horizontal(|ui| {
                let edit = egui::TextEdit::singleline(value)
                    .id_salt(id)
                    .password(!show)
                    .hint_text(
                        egui::RichText::new("Enter password")
                            .color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
                    )
                    .desired_width(f32::INFINITY);
                let response =
                    ui.add_sized([(ui.available_width() - 52.0).max(60.0), 34.0], edit);
                if should_focus {
                    response.request_focus();
                }
                let toggle_label = if show { "Hide" } else { "Show" };
                if ui
                    .add_sized([44.0, 34.0], egui::Button::new(toggle_label).small())
                    .clicked()
                {
                    toggled = true;
                }
                response
            })
            .inner;
        (response, toggled)
    }

    fn card_shell(ctx: &egui::Context, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(420.0, 540.0);
            ui.add_space((avail.y * 0.12).clamp(18.0, 90.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                egui::Frame::NONE
                    .fill(lighten_color(ui.visuals().panel_fill, 0.02))
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                        add_contents(ui);
                    });
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let color = match banner.severity {
                StatusBannerSeverity::Error => ui.visuals().error_fg_color,
            };
            egui::Frame::NONE
                .fill(color.gamma_multiply(0.12))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.colored_label(color, banner.message);
                });
            ui.add_space(4.0);
        }
    }

    fn show_footer(&self, ui: &mut egui::Ui) {
        if self.pending.is_some() {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.weak("Contacting authentication service...");
            });
        }
        ui.add_space(6.0);
        ui.separator();
        ui.horizontal_wrapped(|ui| {
            ui.small("Status:");
            ui.small(egui::RichText::new(&self.status).weak());
        });
    }

    fn show_brand_panel(&self, ctx: &egui::Context) {
        egui::SidePanel::left("brand_panel")
            .resizable(false)
            .exact_width(300.0)
            .frame(egui::Frame::NONE.fill(BRAND_FILL))
            .show(ctx, |ui| {
                ui.add_space(ui.available_height() * 0.45);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(BRAND_WORDMARK)
                            .color(egui::Color32::WHITE)
                            .size(30.0)
                            .strong(),
                    );
                    ui.label(
                        egui::RichText::new("Account access")
                            .color(egui::Color32::from_white_alpha(180))
                            .size(14.0),
                    );
                });
            });
    }

    // ---------- step screens ----------

    fn show_login_screen(&mut self, ctx: &egui::Context) {
        Self::card_shell(ctx, |ui| {
            ui.heading("Welcome Back!");
            ui.weak("Please sign in to continue");
            ui.add_space(8.0);
            self.show_status_banner(ui);

            let focus_to_set = self.take_focus_request();

            let mut email_buf = self.flow.email.clone();
            let email_resp = self.auth_text_field(
                ui,
                "login_email",
                "Email/Phone Number",
                "Enter email",
                &mut email_buf,
                focus_to_set == Some(FocusField::Email),
            );
            if email_buf != self.flow.email {
                self.apply(FlowAction::SetField(Field::Email, email_buf));
            }

            ui.add_space(6.0);

            let mut password_buf = self.flow.password.clone();
            let (password_resp, toggled) = self.password_text_field(
                ui,
                "login_password",
                "Password",
                &mut password_buf,
                self.flow.show_password,
                false,
            );
            if password_buf != self.flow.password {
                self.apply(FlowAction::SetField(Field::Password, password_buf));
            }
            if toggled {
                self.apply(FlowAction::ToggleVisibility(PasswordVisibility::Password));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                if ui.link("Forgot Password?").clicked() {
                    self.go_to(Step::ForgotPassword);
                }
            });

            let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
            if enter_pressed && (email_resp.has_focus() || password_resp.has_focus()) {
                self.try_login();
            }

            ui.add_space(10.0);
            let can_submit = self.flow.can_submit_login() && self.pending.is_none();
            if ui
                .add_enabled(can_submit, primary_button("Log In", ui.available_width()))
                .clicked()
            {
                self.try_login();
            }

            self.show_footer(ui);
        });
    }

    fn go_back(&mut self) {
        if let Some(target) = self.flow.back_target() {
            self.go_to(target);
        }
    }

    fn show_forgot_password_screen(&mut self, ctx: &egui::Context) {
        Self::card_shell(ctx, |ui| {
            if ui.link("⬅ Back to Login").clicked() {
                self.go_back();
            }
            ui.add_space(4.0);
            ui.heading("Forgot Password");
            ui.weak("We'll send you a code to verify your account access.");
            ui.add_space(8.0);
            self.show_status_banner(ui);

            let focus_to_set = self.take_focus_request();

            let mut email_buf = self.flow.email.clone();
            let email_resp = self.auth_text_field(
                ui,
                "forgot_email",
                "Email/Phone Number",
                "Enter email",
                &mut email_buf,
                focus_to_set == Some(FocusField::Email),
            );
            if email_buf != self.flow.email {
                self.apply(FlowAction::SetField(Field::Email, email_buf));
            }

            let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
            if enter_pressed && email_resp.has_focus() {
                self.try_send_code();
            }

            ui.add_space(10.0);
            let enabled = self.flow.can_send_code() && self.pending.is_none();
            if ui
                .add_enabled(enabled, primary_button("Send Code", ui.available_width()))
                .clicked()
            {
                self.try_send_code();
            }

            self.show_footer(ui);
        });
    }

    fn show_verify_code_screen(&mut self, ctx: &egui::Context) {
        Self::card_shell(ctx, |ui| {
            if ui.link("⬅ Back").clicked() {
                self.go_back();
            }
            ui.add_space(4.0);
            ui.heading("Verify Account Access");
            ui.weak("Please enter the code sent to your email in order to verify your account.");
            ui.add_space(8.0);
            self.show_status_banner(ui);

            let mut any_slot_focused = false;
            ui.horizontal(|ui| {
                let boxes_width = CODE_LEN as f32 * 44.0;
                ui.add_space(((ui.available_width() - boxes_width) / 2.0).max(0.0));
                for index in 0..CODE_LEN {
                    let mut slot_buf = self.flow.code[index].clone();
                    let edit = egui::TextEdit::singleline(&mut slot_buf)
                        .id_salt(("verify_code_slot", index))
                        .char_limit(1)
                        .horizontal_align(egui::Align::Center)
                        .desired_width(34.0);
                    let response = ui.add_sized([34.0, 38.0], edit);
                    if response.has_focus() {
                        any_slot_focused = true;
                    }
                    if slot_buf != self.flow.code[index] {
                        self.apply(FlowAction::SetCodeSlot(index, slot_buf));
                    }
                }
            });

            let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
            if enter_pressed && any_slot_focused {
                self.try_confirm_code();
            }

            ui.add_space(10.0);
            let enabled = self.flow.can_confirm_code() && self.pending.is_none();
            if ui
                .add_enabled(
                    enabled,
                    primary_button("Confirm Code", ui.available_width()),
                )
                .clicked()
            {
                self.try_confirm_code();
            }

            ui.horizontal(|ui| {
                ui.small("Didn't get a code?");
                if ui.link("Resend Code").clicked() {
                    self.try_resend_code();
                }
            });

            self.show_footer(ui);
        });
    }

    fn show_reset_password_screen(&mut self, ctx: &egui::Context) {
        Self::card_shell(ctx, |ui| {
            ui.heading("Reset Your Password");
            ui.weak("You are all set! Enter a new password.");
            ui.add_space(8.0);
            self.show_status_banner(ui);

            let focus_to_set = self.take_focus_request();

            let mut new_password_buf = self.flow.new_password.clone();
            let (new_resp, new_toggled) = self.password_text_field(
                ui,
                "reset_new_password",
                "Password",
                &mut new_password_buf,
                self.flow.show_new_password,
                focus_to_set == Some(FocusField::NewPassword),
            );
            if new_password_buf != self.flow.new_password {
                self.apply(FlowAction::SetField(Field::NewPassword, new_password_buf));
            }
            if new_toggled {
                self.apply(FlowAction::ToggleVisibility(PasswordVisibility::NewPassword));
            }

            ui.add_space(6.0);

            let mut confirm_buf = self.flow.confirm_password.clone();
            let (confirm_resp, confirm_toggled) = self.password_text_field(
                ui,
                "reset_confirm_password",
                "Confirm Password",
                &mut confirm_buf,
                self.flow.show_confirm_password,
                false,
            );
            if confirm_buf != self.flow.confirm_password {
                self.apply(FlowAction::SetField(Field::ConfirmPassword, confirm_buf));
            }
            if confirm_toggled {
                self.apply(FlowAction::ToggleVisibility(
                    PasswordVisibility::ConfirmPassword,
                ));
            }

            let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
            if enter_pressed && (new_resp.has_focus() || confirm_resp.has_focus()) {
                self.try_reset_password();
            }

            ui.add_space(10.0);
            let enabled = self.flow.can_reset_password() && self.pending.is_none();
            if ui
                .add_enabled(
                    enabled,
                    primary_button("Reset Password", ui.available_width()),
                )
                .clicked()
            {
                self.try_reset_password();
            }

            self.show_footer(ui);
        });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_brand_panel(ctx);

        // Exactly one screen per frame, selected by the current step.
        match self.flow.step {
            Step::Login => self.show_login_screen(ctx),
            Step::ForgotPassword => self.show_forgot_password_screen(ctx),
            Step::VerifyCode => self.show_verify_code_screen(ctx),
            Step::ResetPassword => self.show_reset_password_screen(ctx),
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiError;
    use crossbeam_channel::bounded;
    use shared::error::AuthError;

    fn test_app() -> (
        DesktopGuiApp,
        crossbeam_channel::Receiver<BackendCommand>,
        crossbeam_channel::Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = DesktopGuiApp::bootstrap(cmd_tx, ui_rx, StartupConfig::default());
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn starts_on_the_login_screen() {
        let (app, _cmd_rx, _ui_tx) = test_app();
        assert_eq!(app.flow.step, Step::Login);
    }

    #[test]
    fn success_events_advance_the_step() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.go_to(Step::ForgotPassword);

        ui_tx
            .try_send(UiEvent::AuthSucceeded(AuthOperation::RequestResetCode))
            .expect("queue event");
        app.process_ui_events();
        assert_eq!(app.flow.step, Step::VerifyCode);

        ui_tx
            .try_send(UiEvent::AuthSucceeded(AuthOperation::VerifyCode))
            .expect("queue event");
        app.process_ui_events();
        assert_eq!(app.flow.step, Step::ResetPassword);
    }

    #[test]
    fn auth_failure_keeps_the_step_and_raises_a_banner() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.pending = Some(AuthOperation::Login);

        ui_tx
            .try_send(UiEvent::Error(UiError::from_auth_error(
                UiErrorContext::Auth(AuthOperation::Login),
                &AuthError::invalid_credentials("rejected"),
            )))
            .expect("queue event");
        app.process_ui_events();

        assert_eq!(app.flow.step, Step::Login);
        assert!(app.pending.is_none());
        assert!(app.status_banner.is_some());
    }

    #[test]
    fn back_navigation_follows_the_observed_flow() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.go_to(Step::VerifyCode);

        app.go_back();
        assert_eq!(app.flow.step, Step::ForgotPassword);
        app.go_back();
        assert_eq!(app.flow.step, Step::Login);
        // Login has no back affordance; a stray call is a no-op.
        app.go_back();
        assert_eq!(app.flow.step, Step::Login);
    }

    #[test]
    fn login_submit_is_blocked_while_the_guard_fails() {
        let (mut app, cmd_rx, _ui_tx) = test_app();

        app.try_login();
        assert!(cmd_rx.try_recv().is_err());
        assert!(app.pending.is_none());

        app.apply(FlowAction::SetField(Field::Email, "a@b.com".to_string()));
        app.apply(FlowAction::SetField(Field::Password, "hunter2".to_string()));
        app.try_login();
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::Login { .. })
        ));
        assert_eq!(app.pending, Some(AuthOperation::Login));
    }

    #[test]
    fn confirm_code_submit_requires_every_slot() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        app.go_to(Step::VerifyCode);

        for (index, digit) in ["1", "2", "", "4", "5", "6"].iter().enumerate() {
            app.apply(FlowAction::SetCodeSlot(index, digit.to_string()));
        }
        app.try_confirm_code();
        assert!(cmd_rx.try_recv().is_err());

        app.apply(FlowAction::SetCodeSlot(2, "3".to_string()));
        app.try_confirm_code();
        match cmd_rx.try_recv() {
            Ok(BackendCommand::ConfirmCode { code, .. }) => assert_eq!(code, "123456"),
            other => panic!("expected ConfirmCode, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn duplicate_submits_are_ignored_while_pending() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        app.apply(FlowAction::SetField(Field::Email, "a@b.com".to_string()));
        app.apply(FlowAction::SetField(Field::Password, "hunter2".to_string()));

        app.try_login();
        app.try_login();
        assert!(cmd_rx.try_recv().is_ok());
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn error_labels_cover_every_category() {
        assert_eq!(err_label(UiErrorCategory::Auth), "Authentication");
        assert_eq!(err_label(UiErrorCategory::Transport), "Transport");
        assert_eq!(err_label(UiErrorCategory::Validation), "Validation");
        assert_eq!(err_label(UiErrorCategory::Unknown), "Unexpected");
    }
}
