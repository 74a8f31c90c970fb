use std::path::PathBuf;

use crate::churn_api::{PlotPixels, Prediction, PredictionInput, RetrainReport};

use super::RequestStatus;

/// UI state for the predict popup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictPopupState {
    /// Whether the popup is visible.
    pub open: bool,
    /// Current form values.
    pub form: PredictionInput,
    pub status: RequestStatus<Prediction>,
}

/// UI state for the retrain popup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RetrainPopupState {
    /// Whether the popup is visible.
    pub open: bool,
    /// CSV picked by the user; kept after submission.
    pub selected_file: Option<PathBuf>,
    pub status: RequestStatus<RetrainView>,
}

/// A retrain report plus its plot decoded for display.
#[derive(Clone, Debug, PartialEq)]
pub struct RetrainView {
    pub report: RetrainReport,
    /// Present when the report carried an inline plot that decoded.
    pub plot_pixels: Option<PlotPixels>,
}
