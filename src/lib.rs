//! Always-on-top frameless desktop clock widget.
//!
//! The widget is a single translucent window showing the current time,
//! draggable by its surface, with a close button and a 12h/24h toggle.
//! Position and display mode persist in a 3-line `settings.txt`.

#![forbid(unsafe_code)]
#![cfg_attr(not(debug_assertions), deny(warnings))] // Forbid warnings in release builds
#![warn(clippy::all, rust_2018_idioms)]

mod app;
mod settings;
mod window;

pub use app::{ClockApp, WINDOW_SIZE};
pub use settings::{DisplayMode, DisplaySettings, SettingsError, SettingsStore};
pub use window::ClockWindow;
