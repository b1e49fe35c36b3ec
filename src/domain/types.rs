//! Shared domain types.
//!
//! Wire types mirror the classification backend's JSON contract:
//!
//! - `ClassificationRequest` is what we POST to `/predict`
//! - `ClassificationResult` is what a successful `/predict` returns
//! - `HealthStatus` / `PerformanceMetrics` back `/health` and `/performance`

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    OrbitalPeriod,
    TransitDuration,
    PlanetaryRadius,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::OrbitalPeriod, Field::TransitDuration, Field::PlanetaryRadius];

    /// Human-readable label for forms and messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Field::OrbitalPeriod => "Orbital period",
            Field::TransitDuration => "Transit duration",
            Field::PlanetaryRadius => "Planetary radius",
        }
    }

    /// Unit convention for the field (informational only, never validated).
    pub fn unit(self) -> &'static str {
        match self {
            Field::OrbitalPeriod => "days",
            Field::TransitDuration => "hours",
            Field::PlanetaryRadius => "Earth radii",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::OrbitalPeriod => Field::TransitDuration,
            Field::TransitDuration => Field::PlanetaryRadius,
            Field::PlanetaryRadius => Field::OrbitalPeriod,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::OrbitalPeriod => Field::PlanetaryRadius,
            Field::TransitDuration => Field::OrbitalPeriod,
            Field::PlanetaryRadius => Field::TransitDuration,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Raw form text, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub orbital_period: String,
    pub transit_duration: String,
    pub planetary_radius: String,
}

impl FormInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::OrbitalPeriod => &self.orbital_period,
            Field::TransitDuration => &self.transit_duration,
            Field::PlanetaryRadius => &self.planetary_radius,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::OrbitalPeriod => self.orbital_period = value,
            Field::TransitDuration => self.transit_duration = value,
            Field::PlanetaryRadius => self.planetary_radius = value,
        }
    }
}

/// Payload for `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub orbital_period: f64,
    pub transit_duration: f64,
    pub planetary_radius: f64,
}

/// Successful `/predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub prediction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// Inputs as the backend received them, when it echoes them back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<ClassificationRequest>,
}

/// Probability breakdowns. Values are reported as-is; they are neither
/// clamped to `[0, 1]` nor required to sum to one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouped: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed: Option<BTreeMap<String, f64>>,
}

/// Main outcome category of a prediction label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Confirmed,
    Candidate,
    FalsePositive,
    Unknown,
}

const CANDIDATE_MARKERS: [&str; 4] = ["CANDIDATE", "APC", "CP", "KP"];
const FALSE_POSITIVE_MARKERS: [&str; 3] = ["FALSE", "FA", "REFUTED"];

impl Category {
    /// Categorize a free-form prediction label.
    ///
    /// Case-insensitive substring scan; the first matching rule wins:
    /// `CONFIRMED`, then candidate markers, then false-positive markers.
    pub fn classify(prediction: &str) -> Self {
        let upper = prediction.to_uppercase();
        if upper.contains("CONFIRMED") {
            Category::Confirmed
        } else if CANDIDATE_MARKERS.iter().any(|m| upper.contains(m)) {
            Category::Candidate
        } else if FALSE_POSITIVE_MARKERS.iter().any(|m| upper.contains(m)) {
            Category::FalsePositive
        } else {
            Category::Unknown
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Confirmed => "Confirmed Planet",
            Category::Candidate => "Candidate Planet",
            Category::FalsePositive => "False Positive",
            Category::Unknown => "Unknown",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Category::Confirmed => "✓",
            Category::Candidate => "◐",
            Category::FalsePositive => "✗",
            Category::Unknown => "?",
        }
    }
}

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub scaler_loaded: bool,
    #[serde(default)]
    pub label_encoder_loaded: bool,
}

impl HealthStatus {
    pub fn is_ready(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") && self.model_loaded
    }
}

/// `GET /performance` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    #[serde(default)]
    pub confusion_matrix: Vec<Vec<u64>>,
    #[serde(default)]
    pub class_names: Vec<String>,
}
