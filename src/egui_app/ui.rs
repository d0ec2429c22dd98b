//! egui renderer for the demo window.
use std::time::Duration;

use crate::config::AppSettings;
use crate::egui_app::controller::DemoController;
use eframe::egui::{self, Frame, Layout, RichText, Vec2};

/// Painter and pointer forwarding for the control.
pub mod download_button;
/// Palette and visuals.
pub mod style;

/// Minimum window size that keeps every element visible.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(420.0, 320.0);
const BUTTON_SIZE: Vec2 = Vec2::new(96.0, 32.0);
/// Upper bound for a single animation step after a stall.
const MAX_FRAME_DT: f32 = 0.1;

/// Renders the demo window using the shared controller state.
pub struct EguiApp {
    controller: DemoController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            controller: DemoController::new(settings),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut enabled = self.controller.button().is_enabled();
                if ui.checkbox(&mut enabled, "Enabled").changed() {
                    self.controller.toggle_enabled();
                }
                ui.separator();
                if ui.button("Start").clicked() {
                    self.controller.start();
                }
                if ui.button("Set downloaded").clicked() {
                    self.controller.set_downloaded();
                }
                if ui.button("Reset").clicked() {
                    self.controller.reset();
                }
                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(palette.bg_primary))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(24.0);
                    ui.label(RichText::new(&status.badge_label).strong());
                    ui.separator();
                    ui.label(&status.text);
                });
            });
    }

    fn render_stage(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            Frame::new()
                .fill(style::stage_fill())
                .inner_margin(24.0)
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        download_button::download_button(
                            ui,
                            self.controller.button_mut(),
                            BUTTON_SIZE,
                        );
                    });
                });
            self.controller.after_input();
            ui.add_space(12.0);
            ui.label(RichText::new("Activity").strong());
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for entry in self.controller.ui.activity.iter() {
                        ui.label(RichText::new(entry).color(style::palette().text_muted));
                    }
                });
        });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let dt = ctx.input(|input| input.stable_dt).clamp(0.0, MAX_FRAME_DT);
        self.controller.update(Duration::from_secs_f32(dt));
        self.render_top_bar(ctx);
        self.render_status(ctx);
        self.render_stage(ctx);
        if self.controller.needs_repaint() {
            ctx.request_repaint();
        }
    }
}
