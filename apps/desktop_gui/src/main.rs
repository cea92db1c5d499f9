mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

/// Desktop client for the multi-step account access flow.
#[derive(Debug, Parser)]
#[command(name = "desktop_gui")]
struct Args {
    /// Prefill the email field on the login screen.
    #[arg(long)]
    email: Option<String>,

    /// Override the window title.
    #[arg(long)]
    window_title: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let defaults = StartupConfig::default();
    let startup = StartupConfig {
        email: args.email.unwrap_or(defaults.email),
        window_title: args.window_title.unwrap_or(defaults.window_title),
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let window_title = startup.window_title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&window_title)
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        &window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
}
