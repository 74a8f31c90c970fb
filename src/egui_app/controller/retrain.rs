use super::EguiController;
use super::jobs::RetrainJob;
use crate::churn_api::PlotImage;
use crate::egui_app::state::RequestStatus;
use crate::egui_app::ui::style::StatusTone;
use rfd::FileDialog;
use std::path::PathBuf;

impl EguiController {
    pub fn open_retrain_popup(&mut self) {
        self.ui.retrain.open = true;
    }

    /// Hide the popup; the selected file and any stored result stay as they are.
    pub fn close_retrain_popup(&mut self) {
        self.ui.retrain.open = false;
    }

    /// Ask the user for a CSV; cancelling the dialog keeps the previous choice.
    pub fn pick_retrain_file(&mut self) {
        let Some(path) = FileDialog::new()
            .set_title("Choose training data")
            .add_filter("CSV", &["csv"])
            .pick_file()
        else {
            return;
        };
        self.set_retrain_file(path);
    }

    pub fn set_retrain_file(&mut self, path: PathBuf) {
        tracing::debug!("Retrain file selected: {}", path.display());
        self.ui.retrain.selected_file = Some(path);
    }

    /// Upload the selected CSV; a no-op without a file or while a retrain is in flight.
    pub fn submit_retrain(&mut self) {
        let Some(path) = self.ui.retrain.selected_file.clone() else {
            return;
        };
        if !self.ui.retrain.status.can_submit() || self.jobs.retrain_in_progress() {
            return;
        }
        tracing::info!("Submitting retrain request with {}", path.display());
        self.ui.retrain.status = RequestStatus::Pending;
        self.set_status("Retraining…", StatusTone::Busy);
        self.jobs.begin_retrain(RetrainJob { path });
    }

    /// Open a remotely hosted training plot in the system browser.
    pub fn open_remote_plot(&mut self) {
        let Some(PlotImage::Remote(url)) = self
            .ui
            .retrain
            .status
            .succeeded()
            .and_then(|view| view.report.plot.clone())
        else {
            return;
        };
        if let Err(err) = open::that(url.as_str()) {
            tracing::warn!("Failed to open plot {url}: {err}");
            self.set_status(format!("Could not open plot: {err}"), StatusTone::Warning);
        }
    }
}
