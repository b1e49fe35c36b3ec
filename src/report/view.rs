//! Result renderer: a pure projection of a `ClassificationResult` into what
//! both front-ends display.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{Category, ClassificationResult};

/// One labeled probability, as a bar (grouped) or a tile (detailed).
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityEntry {
    pub label: String,
    pub probability: f64,
}

impl ProbabilityEntry {
    /// Bar fill in percent: `probability * 100`, not clamped.
    pub fn width_percent(&self) -> f64 {
        self.probability * 100.0
    }

    /// Percentage text with one decimal, e.g. `90.0%`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.width_percent())
    }

    /// Filled cells for a bar `width` cells wide at 100%.
    ///
    /// Values above one overflow the bar, up to twice its width; negative
    /// and NaN values fill nothing.
    pub fn bar_cells(&self, width: usize) -> usize {
        let cells = (self.probability * width as f64).round();
        if cells.is_nan() || cells <= 0.0 {
            return 0;
        }
        let cap = width.saturating_mul(2);
        if cells >= cap as f64 { cap } else { cells as usize }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub prediction: String,
    pub category: Category,
    /// `None` when the response had no grouped breakdown.
    pub grouped: Option<Vec<ProbabilityEntry>>,
    /// `None` when the response had no detailed breakdown.
    pub detailed: Option<Vec<ProbabilityEntry>>,
}

pub fn render(result: &ClassificationResult) -> ResultView {
    let confidence = result.confidence.as_ref();
    ResultView {
        prediction: result.prediction.clone(),
        category: Category::classify(&result.prediction),
        grouped: confidence.and_then(|c| c.grouped.as_ref()).map(ranked),
        detailed: confidence.and_then(|c| c.detailed.as_ref()).map(ranked),
    }
}

/// Entries by descending probability. Ties keep label order.
fn ranked(map: &BTreeMap<String, f64>) -> Vec<ProbabilityEntry> {
    let mut entries: Vec<ProbabilityEntry> = map
        .iter()
        .map(|(label, &probability)| ProbabilityEntry {
            label: label.clone(),
            probability,
        })
        .collect();
    entries.sort_by(|a, b| b.probability.partial_cmp(&a.probability).unwrap_or(Ordering::Equal));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ClassificationResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn confirmed_example_ranks_grouped_bars() {
        let view = render(&parse(
            r#"{"prediction": "CONFIRMED", "confidence": {"grouped": {"Confirmed": 0.9, "Candidate": 0.07, "False Positive": 0.03}}}"#,
        ));
        assert_eq!(view.category, Category::Confirmed);

        let grouped = view.grouped.unwrap();
        let labels: Vec<(&str, String)> = grouped
            .iter()
            .map(|e| (e.label.as_str(), e.percent_label()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Confirmed", "90.0%".to_string()),
                ("Candidate", "7.0%".to_string()),
                ("False Positive", "3.0%".to_string()),
            ]
        );
        assert!(view.detailed.is_none());
    }

    #[test]
    fn missing_confidence_renders_no_sections() {
        let view = render(&parse(r#"{"prediction": "FALSE POSITIVE (FA)"}"#));
        assert_eq!(view.category, Category::FalsePositive);
        assert!(view.grouped.is_none());
        assert!(view.detailed.is_none());
    }

    #[test]
    fn detailed_shows_every_entry_in_order() {
        let view = render(&parse(
            r#"{"prediction": "CP", "confidence": {"detailed": {"APC": 0.05, "CP": 0.6, "FA": 0.01, "FP": 0.04, "KP": 0.2, "PC": 0.1}}}"#,
        ));
        assert_eq!(view.category, Category::Candidate);
        assert!(view.grouped.is_none());

        let detailed = view.detailed.unwrap();
        assert_eq!(detailed.len(), 6);
        let order: Vec<&str> = detailed.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(order, vec!["CP", "KP", "PC", "APC", "FP", "FA"]);
    }

    #[test]
    fn probabilities_are_not_clamped_or_normalized() {
        let view = render(&parse(
            r#"{"prediction": "x", "confidence": {"grouped": {"a": 1.5, "b": -0.25}}}"#,
        ));
        let grouped = view.grouped.unwrap();
        assert_eq!(grouped[0].width_percent(), 150.0);
        assert_eq!(grouped[1].width_percent(), -25.0);
        assert_eq!(view.category, Category::Unknown);
    }

    #[test]
    fn bar_cells_stay_bounded_for_any_value() {
        let cells = |p: f64| {
            ProbabilityEntry {
                label: "a".into(),
                probability: p,
            }
            .bar_cells(30)
        };
        assert_eq!(cells(0.5), 15);
        assert_eq!(cells(1.5), 45);
        assert_eq!(cells(1e300), 60);
        assert_eq!(cells(f64::INFINITY), 60);
        assert_eq!(cells(-3.0), 0);
        assert_eq!(cells(f64::NAN), 0);
    }

    #[test]
    fn empty_maps_are_present_but_empty() {
        let view = render(&parse(r#"{"prediction": "x", "confidence": {"grouped": {}}}"#));
        assert_eq!(view.grouped, Some(Vec::new()));
    }
}
