use super::EguiApp;
use super::style;
use eframe::egui::{self, Frame, Margin, RichText, Ui};

const FEATURES: [(&str, &str); 3] = [
    (
        "Churn prediction",
        "Score a single customer and see how likely they are to leave.",
    ),
    (
        "Model retraining",
        "Upload fresh usage data to retrain the model and review its metrics.",
    ),
    (
        "Actionable insight",
        "Spot at-risk customers early and focus retention where it counts.",
    ),
];

impl EguiApp {
    pub(super) fn render_landing(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(
                    RichText::new("Predict & Prevent Customer Churn with AI")
                        .size(30.0)
                        .strong()
                        .color(palette.text_primary),
                );
                ui.add_space(10.0);
                ui.label(
                    RichText::new(
                        "Estimate churn risk for telecom customers and keep the model current.",
                    )
                    .color(palette.text_muted),
                );
                ui.add_space(24.0);
                ui.horizontal(|ui| {
                    let buttons_width = 2.0 * 140.0 + ui.spacing().item_spacing.x;
                    ui.add_space(((ui.available_width() - buttons_width) / 2.0).max(0.0));
                    let predict = egui::Button::new(RichText::new("Predict Now").size(16.0))
                        .min_size(egui::vec2(140.0, 36.0));
                    if ui.add(predict).clicked() {
                        self.controller.open_predict_popup();
                    }
                    let retrain = egui::Button::new(RichText::new("Retrain Now").size(16.0))
                        .min_size(egui::vec2(140.0, 36.0));
                    if ui.add(retrain).clicked() {
                        self.controller.open_retrain_popup();
                    }
                });
                ui.add_space(40.0);
            });
            ui.columns(FEATURES.len(), |columns| {
                for (column, (title, body)) in columns.iter_mut().zip(FEATURES) {
                    feature_card(column, title, body);
                }
            });
        });
    }
}

fn feature_card(ui: &mut Ui, title: &str, body: &str) {
    let palette = style::palette();
    Frame::new()
        .fill(style::card_fill())
        .stroke(style::section_stroke())
        .corner_radius(6)
        .inner_margin(Margin::same(14))
        .show(ui, |ui| {
            ui.set_min_height(90.0);
            ui.label(RichText::new(title).strong().color(palette.accent_mint));
            ui.add_space(6.0);
            ui.label(RichText::new(body).color(palette.text_muted));
        });
}
