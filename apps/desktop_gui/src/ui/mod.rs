//! UI layer for the desktop client: app shell and the four step screens.

pub mod app;

pub use app::{DesktopGuiApp, StartupConfig};
