//! egui renderer for the application UI.

mod landing;
mod overlay_layers;
mod predict_popup;
mod retrain_popup;
pub mod style;

use crate::churn_api::PlotPixels;
use crate::egui_app::controller::EguiController;
use crate::egui_app::state::{RequestStatus, RetrainView};
use eframe::egui::{
    self, ColorImage, Frame, Margin, RichText, StrokeKind, TextureHandle, TextureOptions,
};
use std::time::Duration;

const PENDING_REPAINT: Duration = Duration::from_millis(100);

/// Renders the landing view and popups from the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    plot_texture: Option<TextureHandle>,
}

impl EguiApp {
    pub fn new(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
            plot_texture: None,
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

    /// Upload decoded plot pixels once per retrain result; drop them when the result goes away.
    fn sync_plot_texture(&mut self, ctx: &egui::Context) {
        let status = &self.controller.ui.retrain.status;
        match plot_texture_action(status, self.plot_texture.is_some()) {
            PlotTextureAction::Keep => {}
            PlotTextureAction::Drop => self.plot_texture = None,
            PlotTextureAction::Upload(pixels) => {
                let image = ColorImage::from_rgba_unmultiplied(
                    [pixels.width as usize, pixels.height as usize],
                    &pixels.rgba,
                );
                self.plot_texture =
                    Some(ctx.load_texture("training_plot", image, TextureOptions::LINEAR));
                ctx.request_repaint();
            }
        }
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 2.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        2.0,
                        style::inner_border(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| self.render_landing(ui));
        self.render_predict_popup(ctx);
        self.render_retrain_popup(ctx);
        self.sync_plot_texture(ctx);
        if self.controller.any_request_pending() {
            ctx.request_repaint_after(PENDING_REPAINT);
        }
    }
}

#[derive(Debug, PartialEq)]
enum PlotTextureAction<'a> {
    Keep,
    Drop,
    Upload(&'a PlotPixels),
}

fn plot_texture_action(
    status: &RequestStatus<RetrainView>,
    has_texture: bool,
) -> PlotTextureAction<'_> {
    let pixels = match status {
        RequestStatus::Succeeded(view) => view.plot_pixels.as_ref(),
        _ => None,
    };
    match (pixels, has_texture) {
        (Some(pixels), false) => PlotTextureAction::Upload(pixels),
        (Some(_), true) => PlotTextureAction::Keep,
        (None, true) => PlotTextureAction::Drop,
        (None, false) => PlotTextureAction::Keep,
    }
}
