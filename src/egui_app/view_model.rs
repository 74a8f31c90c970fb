//! Helpers to convert API results into display lines.
//!
//! Shared by the egui popups and the command line client so both render
//! results identically.

use crate::churn_api::{ModelMetrics, Prediction};

/// Format a `[0, 1]` ratio as a percentage with two decimals.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Human label for the predicted class.
pub fn prediction_label(churn: bool) -> &'static str {
    if churn { "Will Churn" } else { "Won't Churn" }
}

/// Lines shown for a successful prediction.
pub fn prediction_lines(prediction: &Prediction) -> Vec<String> {
    vec![
        format!(
            "Churn Probability: {}",
            format_percent(prediction.churn_probability)
        ),
        format!("Prediction: {}", prediction_label(prediction.churn_prediction)),
    ]
}

/// Lines shown for the metrics of a successful retrain.
pub fn metrics_lines(metrics: &ModelMetrics) -> Vec<String> {
    [
        ("Accuracy", metrics.accuracy),
        ("Precision", metrics.precision),
        ("Recall", metrics.recall),
        ("F1 Score", metrics.f1_score),
    ]
    .into_iter()
    .map(|(label, value)| format!("{label}: {}", format_percent(value)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_probability_to_two_decimals() {
        assert_eq!(format_percent(0.823), "82.30%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.1236), "12.36%");
    }

    #[test]
    fn prediction_lines_match_popup_copy() {
        let lines = prediction_lines(&Prediction {
            churn_probability: 0.823,
            churn_prediction: true,
        });
        assert_eq!(lines, vec!["Churn Probability: 82.30%", "Prediction: Will Churn"]);
        assert_eq!(prediction_label(false), "Won't Churn");
    }

    #[test]
    fn metrics_lines_list_all_scores() {
        let lines = metrics_lines(&ModelMetrics {
            accuracy: 0.91,
            precision: 0.875,
            recall: 0.6,
            f1_score: 0.7123,
        });
        assert_eq!(
            lines,
            vec![
                "Accuracy: 91.00%",
                "Precision: 87.50%",
                "Recall: 60.00%",
                "F1 Score: 71.23%",
            ]
        );
    }
}
