use super::EguiController;
use super::jobs::{JobMessage, PredictJobResult, RetrainJobResult};
use crate::churn_api::{PREDICT_FAILED_MESSAGE, RETRAIN_FAILED_MESSAGE};
use crate::egui_app::state::RequestStatus;
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;

impl EguiController {
    pub(super) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => break,
            };
            match message {
                JobMessage::PredictFinished(message) => handle_predict_finished(self, message),
                JobMessage::RetrainFinished(message) => handle_retrain_finished(self, message),
            }
        }
    }
}

fn handle_predict_finished(controller: &mut EguiController, message: PredictJobResult) {
    controller.jobs.clear_predict();
    match message.result {
        Ok(prediction) => {
            tracing::info!(
                "Prediction received: probability={} churn={}",
                prediction.churn_probability,
                prediction.churn_prediction
            );
            controller.set_status(
                format!(
                    "Churn probability {}",
                    view_model::format_percent(prediction.churn_probability)
                ),
                StatusTone::Info,
            );
            controller.ui.predict.status = RequestStatus::Succeeded(prediction);
        }
        Err(err) => {
            tracing::warn!("Prediction failed: {err}");
            let shown = err.user_message(PREDICT_FAILED_MESSAGE);
            controller.set_status(format!("Prediction failed: {shown}"), StatusTone::Error);
            controller.ui.predict.status = RequestStatus::Failed(shown);
        }
    }
}

fn handle_retrain_finished(controller: &mut EguiController, message: RetrainJobResult) {
    controller.jobs.clear_retrain();
    match message.result {
        Ok(view) => {
            tracing::info!(
                "Retrain finished: accuracy={} f1={}",
                view.report.metrics.accuracy,
                view.report.metrics.f1_score
            );
            controller.set_status(
                format!(
                    "Model retrained, accuracy {}",
                    view_model::format_percent(view.report.metrics.accuracy)
                ),
                StatusTone::Info,
            );
            controller.ui.retrain.status = RequestStatus::Succeeded(view);
        }
        Err(err) => {
            tracing::warn!("Retrain failed: {err}");
            let shown = err.user_message(RETRAIN_FAILED_MESSAGE);
            controller.set_status(format!("Retrain failed: {shown}"), StatusTone::Error);
            controller.ui.retrain.status = RequestStatus::Failed(shown);
        }
    }
}
