//! Maintains app state and bridges the churn API to the egui UI.

mod background_jobs;
pub(crate) mod jobs;
mod predict;
mod retrain;

#[cfg(test)]
mod test_support;

use crate::churn_api::{ChurnBackend, HttpChurnApi};
use crate::config::{AppConfig, ConfigError};
use crate::egui_app::state::UiState;
use crate::egui_app::ui::style::{self, StatusTone};
use std::sync::Arc;

/// Owns the UI state and dispatches requests to the backend.
pub struct EguiController {
    pub ui: UiState,
    pub(crate) jobs: jobs::ControllerJobs,
}

impl EguiController {
    pub fn new(backend: Arc<dyn ChurnBackend>) -> Self {
        Self {
            ui: UiState::default(),
            jobs: jobs::ControllerJobs::new(backend),
        }
    }

    /// Build a controller talking HTTP to the configured API.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let api = HttpChurnApi::new(&config.api)?;
        tracing::info!(
            "Churn API endpoints: predict={} retrain={}",
            api.endpoints().predict,
            api.endpoints().retrain
        );
        Ok(Self::new(Arc::new(api)))
    }

    /// True while either popup waits on the network.
    pub fn any_request_pending(&self) -> bool {
        self.ui.predict.status.is_pending() || self.ui.retrain.status.is_pending()
    }

    /// Drain finished jobs; call once per frame.
    pub fn tick(&mut self) {
        self.poll_background_jobs();
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = style::status_badge_label(tone).into();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }
}
