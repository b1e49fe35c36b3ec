//! Prediction record export (JSON).
//!
//! A record bundles what was sent, what came back and when, so a single
//! classification can be archived or diffed later.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, ClassificationRequest, ClassificationResult};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub tool: String,
    pub classified_at: DateTime<Utc>,
    pub backend: String,
    pub input: ClassificationRequest,
    pub category: Category,
    pub result: ClassificationResult,
}

impl PredictionRecord {
    pub fn new(backend: &str, input: ClassificationRequest, result: ClassificationResult) -> Self {
        Self {
            tool: "exo".to_string(),
            classified_at: Utc::now(),
            backend: backend.to_string(),
            input,
            category: Category::classify(&result.prediction),
            result,
        }
    }
}

pub fn write_prediction_json(path: &Path, record: &PredictionRecord) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, record)
        .map_err(|e| AppError::new(4, format!("Failed to write export JSON: {e}")))?;
    tracing::info!(path = %path.display(), "prediction exported");
    Ok(())
}

pub fn read_prediction_json(path: &Path) -> Result<PredictionRecord, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open export '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid export JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_record_has_expected_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prediction.json");
        let input = ClassificationRequest {
            orbital_period: 3.52,
            transit_duration: 2.8,
            planetary_radius: 13.5,
        };
        let result: ClassificationResult =
            serde_json::from_str(r#"{"prediction":"Candidate Planet","confidence":{"grouped":{"Candidate Planet":0.7}}}"#)
                .unwrap();

        let record = PredictionRecord::new("http://localhost:5000/", input, result.clone());
        write_prediction_json(&path, &record).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["tool"], "exo");
        assert_eq!(raw["category"], "candidate");
        assert_eq!(raw["input"]["orbital_period"], 3.52);
        assert_eq!(raw["result"]["prediction"], "Candidate Planet");

        let back = read_prediction_json(&path).unwrap();
        assert_eq!(back.result, result);
        assert_eq!(back.input, input);
    }

    #[test]
    fn export_to_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("prediction.json");
        let record = PredictionRecord::new(
            "http://localhost:5000/",
            ClassificationRequest {
                orbital_period: 1.0,
                transit_duration: 1.0,
                planetary_radius: 1.0,
            },
            ClassificationResult {
                prediction: "x".into(),
                confidence: None,
                input: None,
            },
        );
        let err = write_prediction_json(&path, &record).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
