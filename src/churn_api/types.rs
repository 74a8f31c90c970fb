use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::plot::PlotImage;

/// Yes/No answer for the plan columns the model was trained on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanChoice {
    Yes,
    #[default]
    No,
}

impl PlanChoice {
    pub const ALL: [PlanChoice; 2] = [PlanChoice::No, PlanChoice::Yes];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for PlanChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanChoice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            other => Err(format!("expected Yes or No, got {other:?}")),
        }
    }
}

/// Customer record sent to the predict endpoint.
///
/// Field names are the wire keys; the struct serializes directly as the JSON body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub account_length: u32,
    pub international_plan: PlanChoice,
    pub voice_mail_plan: PlanChoice,
    pub total_day_minutes: f64,
    pub total_eve_minutes: f64,
    pub total_night_minutes: f64,
    pub total_intl_minutes: f64,
}

/// A single-field edit of [`PredictionInput`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PredictField {
    AccountLength(u32),
    InternationalPlan(PlanChoice),
    VoiceMailPlan(PlanChoice),
    DayMinutes(f64),
    EveMinutes(f64),
    NightMinutes(f64),
    IntlMinutes(f64),
}

impl PredictionInput {
    /// Return a copy with one field replaced.
    pub fn with(&self, update: PredictField) -> Self {
        let mut next = self.clone();
        match update {
            PredictField::AccountLength(value) => next.account_length = value,
            PredictField::InternationalPlan(value) => next.international_plan = value,
            PredictField::VoiceMailPlan(value) => next.voice_mail_plan = value,
            PredictField::DayMinutes(value) => next.total_day_minutes = value,
            PredictField::EveMinutes(value) => next.total_eve_minutes = value,
            PredictField::NightMinutes(value) => next.total_night_minutes = value,
            PredictField::IntlMinutes(value) => next.total_intl_minutes = value,
        }
        next
    }
}

/// Validated predict response.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// Probability in `[0, 1]`.
    pub churn_probability: f64,
    pub churn_prediction: bool,
}

/// Validated evaluation metrics, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Validated retrain response.
#[derive(Clone, Debug, PartialEq)]
pub struct RetrainReport {
    pub metrics: ModelMetrics,
    pub plot: Option<PlotImage>,
}

/// A CSV file ready to be sent as the `file` multipart field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvUpload {
    /// Read the whole file into memory.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "data.csv".to_string());
        Ok(Self { file_name, bytes })
    }
}
