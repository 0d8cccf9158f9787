//! Clock window state, independent of the toolkit event loop.
//!
//! [`ClockWindow`] owns the in-memory settings, the drag state machine and
//! the rendered time text. The eframe adapter in `app.rs` translates native
//! input into these methods and applies the positions they produce.

use chrono::{DateTime, Local};
use eframe::egui::{pos2, PointerButton, Pos2, Vec2};

use crate::settings::{DisplaySettings, SettingsError, SettingsStore};

/// Transient pointer-drag state. `anchor` is the offset from the window
/// top-left to the press position, fixed for the duration of the drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DragState {
    active: bool,
    anchor: Vec2,
}

pub struct ClockWindow {
    store: SettingsStore,
    settings: DisplaySettings,
    /// Live top-left position. Drag moves this; it reaches disk only when
    /// the window closes.
    pos: Pos2,
    drag: DragState,
    time_text: String,
}

impl ClockWindow {
    /// Load settings and seed the window geometry from them.
    ///
    /// Fails if the store is missing or malformed; no window should be
    /// shown in that case.
    pub fn new(store: SettingsStore) -> Result<Self, SettingsError> {
        let settings = store.load()?;
        let mut window = Self {
            store,
            pos: pos2(settings.x as f32, settings.y as f32),
            settings,
            drag: DragState::default(),
            time_text: String::new(),
        };
        window.on_tick(Local::now());
        Ok(window)
    }

    pub fn position(&self) -> Pos2 {
        self.pos
    }

    /// Sync the live position from the toolkit, e.g. after the window
    /// manager moved the window. Ignored mid-drag, where the drag math is
    /// the authority.
    pub fn set_position(&mut self, pos: Pos2) {
        if !self.drag.active {
            self.pos = pos;
        }
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn drag_active(&self) -> bool {
        self.drag.active
    }

    /// Re-render the time label. Runs once a second and after a mode
    /// toggle; touches nothing but the label text.
    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.time_text = self.settings.mode.format(now);
    }

    /// Begin a drag on left press. Returns whether the event was consumed.
    pub fn on_mouse_down(&mut self, button: PointerButton, global: Pos2) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.drag = DragState {
            active: true,
            anchor: global - self.pos,
        };
        true
    }

    /// Move the window so its top-left tracks the pointer. Returns the new
    /// position while a drag is active, `None` otherwise.
    pub fn on_mouse_move(&mut self, global: Pos2) -> Option<Pos2> {
        if !self.drag.active {
            return None;
        }
        self.pos = global - self.drag.anchor;
        Some(self.pos)
    }

    /// End the drag on left release. Returns whether the event was consumed.
    pub fn on_mouse_up(&mut self, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.drag = DragState::default();
        true
    }

    /// Flip 12h/24h, persist the full record, then re-render the label so
    /// the change shows before the next tick.
    pub fn on_toggle_clock_type(&mut self, now: DateTime<Local>) -> Result<(), SettingsError> {
        self.settings.mode = self.settings.mode.toggled();
        self.store.save(&self.settings)?;
        self.on_tick(now);
        Ok(())
    }

    /// Persist the final on-screen position, mode untouched. The caller
    /// tears the window down afterwards; no further events fire.
    pub fn on_close(&mut self) -> Result<(), SettingsError> {
        self.settings.x = self.pos.x.round() as i32;
        self.settings.y = self.pos.y.round() as i32;
        self.store.save(&self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DisplayMode;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn window_with(contents: &str) -> (TempDir, ClockWindow) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.txt");
        fs::write(&path, contents).unwrap();
        let window = ClockWindow::new(SettingsStore::new(path)).unwrap();
        (dir, window)
    }

    fn read_settings(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join("settings.txt")).unwrap()
    }

    #[test]
    fn initialize_places_window_at_stored_position() {
        let (_dir, window) = window_with("12\n100\n200");
        assert_eq!(window.position(), pos2(100.0, 200.0));
    }

    #[test]
    fn initialize_fails_on_malformed_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.txt");

        fs::write(&path, "12\n100").unwrap();
        assert!(ClockWindow::new(SettingsStore::new(path.clone())).is_err());

        fs::write(&path, "12\nabc\n200").unwrap();
        assert!(ClockWindow::new(SettingsStore::new(path)).is_err());
    }

    #[test]
    fn drag_moves_window_by_pointer_delta() {
        let (_dir, mut window) = window_with("12\n100\n200");

        assert!(window.on_mouse_down(PointerButton::Primary, pos2(130.0, 220.0)));
        let moved = window.on_mouse_move(pos2(180.0, 190.0)).unwrap();
        assert_eq!(moved, pos2(150.0, 170.0));
        assert!(window.on_mouse_up(PointerButton::Primary));

        assert_eq!(window.position(), pos2(150.0, 170.0));
        assert!(!window.drag_active());
    }

    #[test]
    fn mouse_move_without_drag_is_noop() {
        let (_dir, mut window) = window_with("12\n100\n200");
        assert_eq!(window.on_mouse_move(pos2(500.0, 500.0)), None);
        assert_eq!(window.position(), pos2(100.0, 200.0));
    }

    #[test]
    fn non_primary_press_does_not_start_drag() {
        let (_dir, mut window) = window_with("12\n100\n200");
        assert!(!window.on_mouse_down(PointerButton::Secondary, pos2(110.0, 210.0)));
        assert_eq!(window.on_mouse_move(pos2(300.0, 300.0)), None);
    }

    #[test]
    fn release_resets_drag_until_next_press() {
        let (_dir, mut window) = window_with("12\n100\n200");
        window.on_mouse_down(PointerButton::Primary, pos2(100.0, 200.0));
        window.on_mouse_up(PointerButton::Primary);
        assert_eq!(window.on_mouse_move(pos2(400.0, 400.0)), None);

        // A fresh press re-anchors at the new pointer position.
        window.on_mouse_down(PointerButton::Primary, pos2(110.0, 210.0));
        assert_eq!(window.on_mouse_move(pos2(120.0, 220.0)), Some(pos2(110.0, 210.0)));
    }

    #[test]
    fn toggle_persists_before_rerender_and_twice_restores() {
        let (dir, mut window) = window_with("12\n100\n200");
        let now = Local.with_ymd_and_hms(2024, 3, 1, 15, 4, 5).unwrap();

        window.on_toggle_clock_type(now).unwrap();
        assert_eq!(read_settings(&dir), "24\n100\n200");
        assert_eq!(window.time_text(), "15:04:05");

        window.on_toggle_clock_type(now).unwrap();
        assert_eq!(read_settings(&dir), "12\n100\n200");
        assert_eq!(window.time_text(), "03:04:05 PM");
    }

    #[test]
    fn tick_renders_current_mode() {
        let (_dir, mut window) = window_with("24\n0\n0");
        let now = Local.with_ymd_and_hms(2024, 3, 1, 7, 30, 0).unwrap();
        window.on_tick(now);
        assert_eq!(window.time_text(), "07:30:00");
    }

    #[test]
    fn close_persists_final_position_and_keeps_mode() {
        let (dir, mut window) = window_with("24\n100\n200");
        window.on_mouse_down(PointerButton::Primary, pos2(100.0, 200.0));
        window.on_mouse_move(pos2(150.0, 250.0));
        window.on_mouse_up(PointerButton::Primary);

        window.on_close().unwrap();
        assert_eq!(read_settings(&dir), "24\n150\n250");
    }

    #[test]
    fn toggle_then_drag_then_close_end_to_end() {
        let (dir, mut window) = window_with("12\n100\n200");
        let now = Local.with_ymd_and_hms(2024, 3, 1, 15, 4, 5).unwrap();
        assert_eq!(window.position(), pos2(100.0, 200.0));

        window.on_toggle_clock_type(now).unwrap();
        assert_eq!(read_settings(&dir), "24\n100\n200");
        assert_eq!(window.time_text(), "15:04:05");

        window.on_mouse_down(PointerButton::Primary, pos2(120.0, 230.0));
        window.on_mouse_move(pos2(170.0, 280.0));
        window.on_mouse_up(PointerButton::Primary);
        window.on_close().unwrap();
        assert_eq!(read_settings(&dir), "24\n150\n250");
    }

    #[test]
    fn garbage_mode_loads_and_never_panics_on_tick() {
        let (_dir, mut window) = window_with("xx\n0\n0");
        let now = Local.with_ymd_and_hms(2024, 3, 1, 15, 4, 5).unwrap();
        window.on_tick(now);
        assert_eq!(window.time_text(), "03:04:05 PM");
    }

    #[test]
    fn garbage_mode_is_normalized_so_first_toggle_stores_24() {
        // The explicit in-memory enum normalizes unknown modes to 12-hour
        // before the first toggle.
        let (dir, mut window) = window_with("xx\n0\n0");
        let now = Local.with_ymd_and_hms(2024, 3, 1, 15, 4, 5).unwrap();
        window.on_toggle_clock_type(now).unwrap();
        assert_eq!(read_settings(&dir), "24\n0\n0");
        assert_eq!(window.settings.mode, DisplayMode::TwentyFourHour);
    }
}
