//! Blocking HTTP calls to the churn API and response validation.

use serde::Deserialize;
use url::Url;

use crate::http_client;

use super::multipart::MultipartBody;
use super::plot::PlotImage;
use super::types::{CsvUpload, ModelMetrics, Prediction, PredictionInput, RetrainReport};

/// Message shown when a prediction fails for any reason other than a server-reported error.
pub const PREDICT_FAILED_MESSAGE: &str = "Failed to get prediction";
/// Message shown when a retrain fails for any reason other than a server-reported error.
pub const RETRAIN_FAILED_MESSAGE: &str = "Failed to retrain model";

const UPLOAD_FIELD: &str = "file";
const CSV_CONTENT_TYPE: &str = "text/csv";
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a body carrying an `error` message.
    #[error("{0}")]
    Remote(String),
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Failed to read response: {0}")]
    Read(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Unexpected response: {0}")]
    Invalid(String),
    #[error("Failed to read {path}: {source}")]
    File {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl ApiError {
    /// Text for the popup: server messages verbatim, everything else as `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Remote(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// POST the input as JSON and validate the prediction.
pub fn predict(
    agent: &ureq::Agent,
    url: &Url,
    input: &PredictionInput,
    max_response_bytes: usize,
) -> Result<Prediction, ApiError> {
    tracing::debug!("POST {url} (predict)");
    let request = agent
        .post(url.as_str())
        .set("Accept", "application/json")
        .set("Content-Type", "application/json");
    let body = read_body(request.send_json(input), max_response_bytes)?;
    parse_prediction_response(&body)
}

/// POST the CSV as multipart form data and validate the report.
pub fn retrain(
    agent: &ureq::Agent,
    url: &Url,
    upload: &CsvUpload,
    max_response_bytes: usize,
) -> Result<RetrainReport, ApiError> {
    tracing::debug!(
        "POST {url} (retrain, {} bytes from {})",
        upload.bytes.len(),
        upload.file_name
    );
    let multipart =
        MultipartBody::single_file(UPLOAD_FIELD, &upload.file_name, CSV_CONTENT_TYPE, &upload.bytes);
    let request = agent
        .post(url.as_str())
        .set("Accept", "application/json")
        .set("Content-Type", &multipart.content_type());
    let body = read_body(request.send_bytes(multipart.bytes()), max_response_bytes)?;
    parse_retrain_response(&body)
}

fn read_body(
    result: Result<ureq::Response, ureq::Error>,
    max_bytes: usize,
) -> Result<String, ApiError> {
    match result {
        Ok(response) => http_client::read_response_text(response, max_bytes)
            .map_err(|err| ApiError::Read(err.to_string())),
        Err(ureq::Error::Status(code, response)) => {
            let body = http_client::read_response_text(response, max_bytes)
                .unwrap_or_else(|err| err.to_string());
            Err(map_status_error(code, body))
        }
        Err(ureq::Error::Transport(err)) => Err(ApiError::Transport(err.to_string())),
    }
}

fn map_status_error(code: u16, body: String) -> ApiError {
    if let Some(message) = remote_error(&body) {
        return ApiError::Remote(message);
    }
    let mut body = body.trim().to_string();
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        body = body.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>() + "…";
    }
    ApiError::Status { code, body }
}

#[derive(Debug, Deserialize)]
struct ErrorWire {
    error: Option<String>,
}

fn remote_error(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorWire>(body.trim())
        .ok()
        .and_then(|wire| wire.error)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

#[derive(Debug, Deserialize)]
struct PredictionWire {
    churn_probability: Option<f64>,
    churn_prediction: Option<bool>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RetrainWire {
    metrics: Option<MetricsWire>,
    plot: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetricsWire {
    accuracy: Option<f64>,
    precision: Option<f64>,
    recall: Option<f64>,
    f1_score: Option<f64>,
}

/// Validate a predict response body.
pub fn parse_prediction_response(body: &str) -> Result<Prediction, ApiError> {
    let wire: PredictionWire = parse_json(body)?;
    if let Some(message) = non_empty(wire.error) {
        return Err(ApiError::Remote(message));
    }
    let churn_probability = unit_interval("churn_probability", wire.churn_probability)?;
    let churn_prediction = wire
        .churn_prediction
        .ok_or_else(|| ApiError::Invalid("missing churn_prediction".to_string()))?;
    Ok(Prediction {
        churn_probability,
        churn_prediction,
    })
}

/// Validate a retrain response body.
pub fn parse_retrain_response(body: &str) -> Result<RetrainReport, ApiError> {
    let wire: RetrainWire = parse_json(body)?;
    if let Some(message) = non_empty(wire.error) {
        return Err(ApiError::Remote(message));
    }
    let metrics = wire
        .metrics
        .ok_or_else(|| ApiError::Invalid("missing metrics".to_string()))?;
    let metrics = ModelMetrics {
        accuracy: unit_interval("metrics.accuracy", metrics.accuracy)?,
        precision: unit_interval("metrics.precision", metrics.precision)?,
        recall: unit_interval("metrics.recall", metrics.recall)?,
        f1_score: unit_interval("metrics.f1_score", metrics.f1_score)?,
    };
    let plot = non_empty(wire.plot).and_then(|reference| {
        let parsed = PlotImage::parse(&reference);
        if parsed.is_none() {
            tracing::warn!("Ignoring unrecognised plot reference ({} chars)", reference.len());
        }
        parsed
    });
    Ok(RetrainReport { metrics, plot })
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Json("Empty response body".to_string()));
    }
    serde_json::from_str(trimmed).map_err(|err| ApiError::Json(err.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn unit_interval(name: &str, value: Option<f64>) -> Result<f64, ApiError> {
    let value = value.ok_or_else(|| ApiError::Invalid(format!("missing {name}")))?;
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::Invalid(format!("{name} out of range: {value}")))
    }
}
