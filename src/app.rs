//! eframe adapter: translates egui input and viewport events into
//! [`ClockWindow`] operations and applies the results.

use std::time::Duration;

use chrono::Local;
use eframe::egui;
use eframe::egui::{
    pos2, vec2, Button, Color32, Id, Label, PointerButton, Rect, RichText, Rounding, Sense,
    Stroke, ViewportCommand, Visuals,
};
use tokio::{task, time};

use crate::window::ClockWindow;

/// Fixed outer size of the widget, matching the label and button layout.
pub const WINDOW_SIZE: [f32; 2] = [600.0, 125.0];

const BUTTON_SIZE: f32 = 20.0;
const BUTTON_MARGIN: f32 = 5.0;
const HOVER_ACCENT: Color32 = Color32::from_rgb(0x00, 0x99, 0xff);

pub struct ClockApp {
    window: ClockWindow,
    /// Set once the final position has been written, so a close request
    /// arriving after the close button does not save twice.
    position_saved: bool,
}

impl ClockApp {
    pub fn new(cc: &eframe::CreationContext<'_>, window: ClockWindow) -> Self {
        configure_visuals(&cc.egui_ctx);

        // The clock shows seconds, so one repaint per second is enough.
        let ctx = cc.egui_ctx.to_owned();
        task::spawn(async move {
            let mut interval = time::interval(Duration::from_millis(1000));

            loop {
                interval.tick().await;
                ctx.request_repaint();
            }
        });

        Self {
            window,
            position_saved: false,
        }
    }

    fn persist_position(&mut self) {
        if self.position_saved {
            return;
        }
        self.position_saved = true;
        if let Err(e) = self.window.on_close() {
            tracing::error!(error = %e, "failed to persist window position");
        }
    }
}

impl eframe::App for ClockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Alt+F4 and friends: save the position before the window goes away.
        if ctx.input(|i| i.viewport().close_requested()) {
            self.persist_position();
        }

        // The window manager's idea of our origin; pointer positions are
        // window-relative and need it to become global.
        let origin = ctx
            .input(|i| i.viewport().outer_rect)
            .map(|rect| rect.min)
            .unwrap_or_else(|| self.window.position());
        self.window.set_position(origin);

        self.window.on_tick(Local::now());

        let frame = egui::containers::Frame::none()
            .fill(Color32::BLACK)
            .stroke(Stroke::new(2.0, Color32::WHITE))
            .rounding(Rounding::same(5.0));

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let app_rect = ui.max_rect();

            // Registered before the widgets so the buttons win the pointer.
            let response = ui.interact(app_rect, Id::new("clock-window"), Sense::drag());
            if response.drag_started_by(PointerButton::Primary) {
                if let Some(p) = response.interact_pointer_pos() {
                    self.window
                        .on_mouse_down(PointerButton::Primary, origin + p.to_vec2());
                }
            }
            if response.dragged_by(PointerButton::Primary) {
                if let Some(p) = response.interact_pointer_pos() {
                    if let Some(moved) = self.window.on_mouse_move(origin + p.to_vec2()) {
                        ui.ctx()
                            .send_viewport_cmd(ViewportCommand::OuterPosition(moved));
                    }
                }
            }
            if response.drag_stopped_by(PointerButton::Primary) {
                self.window.on_mouse_up(PointerButton::Primary);
            }

            ui.put(
                app_rect,
                Label::new(
                    RichText::new(self.window.time_text())
                        .size(64.0)
                        .monospace()
                        .color(Color32::WHITE),
                ),
            );

            let close_rect = Rect::from_min_size(
                pos2(
                    app_rect.max.x - BUTTON_SIZE - BUTTON_MARGIN,
                    app_rect.min.y + BUTTON_MARGIN,
                ),
                vec2(BUTTON_SIZE, BUTTON_SIZE),
            );
            let toggle_rect = Rect::from_min_size(
                pos2(
                    app_rect.max.x - BUTTON_SIZE - BUTTON_MARGIN,
                    app_rect.max.y - BUTTON_SIZE - BUTTON_MARGIN,
                ),
                vec2(BUTTON_SIZE, BUTTON_SIZE),
            );

            let close = Button::new(RichText::new("X").strong()).rounding(Rounding::same(10.0));
            if ui.put(close_rect, close).clicked() {
                self.persist_position();
                ui.ctx().send_viewport_cmd(ViewportCommand::Close);
            }

            let toggle = Button::new("↔").rounding(Rounding::same(10.0));
            if ui.put(toggle_rect, toggle).clicked() {
                if let Err(e) = self.window.on_toggle_clock_type(Local::now()) {
                    tracing::error!(error = %e, "failed to persist display mode");
                }
            }
        });
    }

    fn clear_color(&self, _visuals: &Visuals) -> [f32; 4] {
        // Fully transparent: only the rounded panel frame is visible.
        Color32::TRANSPARENT.to_normalized_gamma_f32()
    }
}

fn configure_visuals(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    // Text selection on the label would swallow drags on the clock face.
    style.interaction.selectable_labels = false;
    ctx.set_style(style);

    let mut visuals = Visuals::dark();
    visuals.widgets.inactive.weak_bg_fill = Color32::BLACK;
    visuals.widgets.inactive.bg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.hovered.weak_bg_fill = Color32::BLACK;
    visuals.widgets.hovered.bg_stroke = Stroke::new(2.0, HOVER_ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, HOVER_ACCENT);
    visuals.widgets.active.weak_bg_fill = Color32::BLACK;
    visuals.widgets.active.bg_stroke = Stroke::new(2.0, HOVER_ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, HOVER_ACCENT);
    ctx.set_visuals(visuals);
}
