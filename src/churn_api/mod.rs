//! Client for the remote churn prediction API.
//!
//! The API is an opaque collaborator: this module only shapes requests and
//! validates responses into typed results.

pub mod api;
mod multipart;
pub mod plot;
mod types;

use url::Url;

use crate::config::{ApiSettings, ConfigError};

pub use api::{ApiError, PREDICT_FAILED_MESSAGE, RETRAIN_FAILED_MESSAGE};
pub use plot::{PlotImage, PlotPixels};
pub use types::{
    CsvUpload, ModelMetrics, PlanChoice, PredictField, Prediction, PredictionInput, RetrainReport,
};

/// Resolved endpoint URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub predict: Url,
    pub retrain: Url,
}

/// The two operations the UI dispatches.
pub trait ChurnBackend: Send + Sync {
    fn predict(&self, input: &PredictionInput) -> Result<Prediction, ApiError>;
    fn retrain(&self, upload: &CsvUpload) -> Result<RetrainReport, ApiError>;
}

/// [`ChurnBackend`] over HTTP.
#[derive(Clone)]
pub struct HttpChurnApi {
    agent: ureq::Agent,
    endpoints: Endpoints,
    max_response_bytes: usize,
}

impl HttpChurnApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: crate::http_client::agent(settings),
            endpoints: settings.endpoints()?,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl ChurnBackend for HttpChurnApi {
    fn predict(&self, input: &PredictionInput) -> Result<Prediction, ApiError> {
        api::predict(
            &self.agent,
            &self.endpoints.predict,
            input,
            self.max_response_bytes,
        )
    }

    fn retrain(&self, upload: &CsvUpload) -> Result<RetrainReport, ApiError> {
        api::retrain(
            &self.agent,
            &self.endpoints.retrain,
            upload,
            self.max_response_bytes,
        )
    }
}
