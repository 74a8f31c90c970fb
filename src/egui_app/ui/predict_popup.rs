use super::EguiApp;
use super::overlay_layers::{self, OverlayLayer};
use super::style;
use crate::churn_api::{PlanChoice, PredictField};
use crate::egui_app::state::RequestStatus;
use crate::egui_app::view_model;
use eframe::egui::{self, Align2, RichText};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PredictAction {
    None,
    Submit,
    Cancel,
}

impl EguiApp {
    /// Render the modal predict form and its last result.
    pub(super) fn render_predict_popup(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.predict.open {
            return;
        }
        overlay_layers::modal_backdrop(ctx, "predict_popup", style::modal_backdrop());

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.close_predict_popup();
            return;
        }

        let mut open = true;
        let mut action = PredictAction::None;
        egui::Window::new("Predict Customer Churn")
            .id(egui::Id::new("predict_popup_window"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(OverlayLayer::Modal.order())
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .open(&mut open)
            .show(ctx, |ui| {
                action = self.render_predict_body(ui);
            });

        if !open || action == PredictAction::Cancel {
            self.controller.close_predict_popup();
            return;
        }
        if action == PredictAction::Submit {
            self.controller.submit_predict();
        }
    }

    fn render_predict_body(&mut self, ui: &mut egui::Ui) -> PredictAction {
        let palette = style::palette();
        ui.set_min_width(420.0);
        let mut updates = Vec::new();
        let form = &self.controller.ui.predict.form;
        egui::Grid::new("predict_form_grid")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                let mut account_length = form.account_length;
                ui.label("Account Length");
                if ui
                    .add(egui::DragValue::new(&mut account_length).range(0..=u32::MAX))
                    .changed()
                {
                    updates.push(PredictField::AccountLength(account_length));
                }
                ui.end_row();

                ui.label("International Plan");
                if let Some(choice) =
                    plan_combo(ui, "international_plan", form.international_plan)
                {
                    updates.push(PredictField::InternationalPlan(choice));
                }
                ui.end_row();

                ui.label("Voice Mail Plan");
                if let Some(choice) = plan_combo(ui, "voice_mail_plan", form.voice_mail_plan) {
                    updates.push(PredictField::VoiceMailPlan(choice));
                }
                ui.end_row();

                let minutes: [(&str, f64, fn(f64) -> PredictField); 4] = [
                    ("Total Day Minutes", form.total_day_minutes, PredictField::DayMinutes),
                    ("Total Eve Minutes", form.total_eve_minutes, PredictField::EveMinutes),
                    (
                        "Total Night Minutes",
                        form.total_night_minutes,
                        PredictField::NightMinutes,
                    ),
                    ("Total Intl Minutes", form.total_intl_minutes, PredictField::IntlMinutes),
                ];
                for (label, mut value, field) in minutes {
                    ui.label(label);
                    if ui
                        .add(
                            egui::DragValue::new(&mut value)
                                .range(0.0..=f64::MAX)
                                .speed(0.5)
                                .max_decimals(2),
                        )
                        .changed()
                    {
                        updates.push(field(value));
                    }
                    ui.end_row();
                }
            });
        for update in updates {
            self.controller.update_predict_field(update);
        }

        ui.add_space(12.0);
        let status = &self.controller.ui.predict.status;
        let mut action = PredictAction::None;
        ui.horizontal(|ui| {
            if ui.button("Cancel").clicked() {
                action = PredictAction::Cancel;
            }
            let label = if status.is_pending() {
                "Predicting..."
            } else {
                "Predict"
            };
            if ui
                .add_enabled(status.can_submit(), egui::Button::new(label))
                .clicked()
            {
                action = PredictAction::Submit;
            }
        });

        match status {
            RequestStatus::Idle | RequestStatus::Pending => {}
            RequestStatus::Succeeded(prediction) => {
                ui.add_space(10.0);
                ui.separator();
                ui.label(RichText::new("Prediction Result").strong());
                for line in view_model::prediction_lines(prediction) {
                    ui.label(RichText::new(line).color(palette.text_primary));
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

fn plan_combo(ui: &mut egui::Ui, id: &str, current: PlanChoice) -> Option<PlanChoice> {
    let mut selected = current;
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.as_str())
        .show_ui(ui, |ui| {
            for choice in PlanChoice::ALL {
                ui.selectable_value(&mut selected, choice, choice.as_str());
            }
        });
    (selected != current).then_some(selected)
}
