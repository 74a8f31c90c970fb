use super::EguiController;
use super::jobs::PredictJob;
use crate::churn_api::PredictField;
use crate::egui_app::state::RequestStatus;
use crate::egui_app::ui::style::StatusTone;

impl EguiController {
    pub fn open_predict_popup(&mut self) {
        self.ui.predict.open = true;
    }

    /// Hide the popup; the form and any stored result stay as they are.
    pub fn close_predict_popup(&mut self) {
        self.ui.predict.open = false;
    }

    pub fn update_predict_field(&mut self, update: PredictField) {
        self.ui.predict.form = self.ui.predict.form.with(update);
    }

    /// Send the current form; ignored while a prediction is already in flight.
    pub fn submit_predict(&mut self) {
        if !self.ui.predict.status.can_submit() || self.jobs.predict_in_progress() {
            return;
        }
        let input = self.ui.predict.form.clone();
        tracing::info!("Submitting prediction request");
        self.ui.predict.status = RequestStatus::Pending;
        self.set_status("Predicting…", StatusTone::Busy);
        self.jobs.begin_predict(PredictJob { input });
    }
}
