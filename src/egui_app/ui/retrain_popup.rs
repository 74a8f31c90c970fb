use super::EguiApp;
use super::overlay_layers::{self, OverlayLayer};
use super::style;
use crate::churn_api::PlotImage;
use crate::egui_app::state::RequestStatus;
use crate::egui_app::view_model;
use eframe::egui::{self, Align2, RichText};

const PLOT_MAX_WIDTH: f32 = 480.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RetrainAction {
    None,
    PickFile,
    Submit,
    OpenPlot,
    Cancel,
}

impl EguiApp {
    /// Render the modal retrain form, its metrics and the training plot.
    pub(super) fn render_retrain_popup(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.retrain.open {
            return;
        }
        overlay_layers::modal_backdrop(ctx, "retrain_popup", style::modal_backdrop());

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.close_retrain_popup();
            return;
        }

        let mut open = true;
        let mut action = RetrainAction::None;
        egui::Window::new("Retrain Model")
            .id(egui::Id::new("retrain_popup_window"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(OverlayLayer::Modal.order())
            .collapsible(false)
            .resizable(false)
            .default_width(520.0)
            .open(&mut open)
            .show(ctx, |ui| {
                action = self.render_retrain_body(ui);
            });

        match action {
            _ if !open => self.controller.close_retrain_popup(),
            RetrainAction::None => {}
            RetrainAction::Cancel => self.controller.close_retrain_popup(),
            RetrainAction::PickFile => self.controller.pick_retrain_file(),
            RetrainAction::Submit => self.controller.submit_retrain(),
            RetrainAction::OpenPlot => self.controller.open_remote_plot(),
        }
    }

    fn render_retrain_body(&mut self, ui: &mut egui::Ui) -> RetrainAction {
        let palette = style::palette();
        let state = &self.controller.ui.retrain;
        let mut action = RetrainAction::None;
        ui.set_min_width(520.0);
        ui.label(
            RichText::new("Upload a CSV of labelled customer records to retrain the model.")
                .color(palette.text_muted),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!state.status.is_pending(), egui::Button::new("Choose CSV..."))
                .clicked()
            {
                action = RetrainAction::PickFile;
            }
            let file_label = state
                .selected_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "No file selected".to_string());
            ui.label(RichText::new(file_label).color(palette.text_primary));
        });

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Cancel").clicked() {
                action = RetrainAction::Cancel;
            }
            let label = if state.status.is_pending() {
                "Retraining..."
            } else {
                "Retrain"
            };
            let enabled = state.selected_file.is_some() && state.status.can_submit();
            if ui
                .add_enabled(enabled, egui::Button::new(label))
                .clicked()
            {
                action = RetrainAction::Submit;
            }
        });

        match &state.status {
            RequestStatus::Idle | RequestStatus::Pending => {}
            RequestStatus::Succeeded(view) => {
                ui.add_space(10.0);
                ui.separator();
                ui.label(RichText::new("Model Metrics").strong());
                for line in view_model::metrics_lines(&view.report.metrics) {
                    ui.label(RichText::new(line).color(palette.text_primary));
                }
                if let Some(texture) = &self.plot_texture {
                    ui.add_space(8.0);
                    let size = texture.size_vec2();
                    let scale = (PLOT_MAX_WIDTH / size.x).min(1.0);
                    ui.image((texture.id(), size * scale));
                } else if matches!(view.report.plot, Some(PlotImage::Remote(_))) {
                    ui.add_space(8.0);
                    if ui.button("Open plot in browser").clicked() {
                        action = RetrainAction::OpenPlot;
                    }
                }
            }
            RequestStatus::Failed(message) => {
                ui.add_space(10.0);
                ui.label(RichText::new(message).color(style::error_text()));
            }
        }
        action
    }
}
