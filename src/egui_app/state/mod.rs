//! Shared state types for the egui UI.

mod popups;
mod request;
mod status;

pub use popups::*;
pub use request::*;
pub use status::*;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub status: StatusBarState,
    pub predict: PredictPopupState,
    pub retrain: RetrainPopupState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            predict: PredictPopupState::default(),
            retrain: RetrainPopupState::default(),
        }
    }
}
