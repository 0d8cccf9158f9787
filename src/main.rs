#![forbid(unsafe_code)]
#![cfg_attr(not(debug_assertions), deny(warnings))] // Forbid warnings in release builds
#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context as _;
use eframe::egui;

use simple_clock::{ClockApp, ClockWindow, SettingsStore, WINDOW_SIZE};

/// Settings file in the working directory; the widget takes no CLI flags.
const SETTINGS_FILE: &str = "settings.txt";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("simple_clock=debug".parse().unwrap())
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // The stored position seeds the viewport, so a missing or malformed
    // store must fail here, before any window is shown.
    let store = SettingsStore::new(SETTINGS_FILE);
    let window =
        ClockWindow::new(store).with_context(|| format!("failed to load {SETTINGS_FILE}"))?;
    let position = window.position();
    tracing::info!(x = position.x, y = position.y, "starting simple_clock");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Simple Clock")
            .with_inner_size(WINDOW_SIZE)
            .with_position(position)
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_window_level(egui::viewport::WindowLevel::AlwaysOnTop),
        ..Default::default()
    };
    eframe::run_native(
        "Simple Clock",
        native_options,
        Box::new(|cc| Box::new(ClockApp::new(cc, window))),
    )
    .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))?;

    Ok(())
}
