//! Terminal text output for the one-shot CLI commands.

use crate::domain::{ClassificationRequest, Field, HealthStatus, PerformanceMetrics};
use crate::report::view::{ProbabilityEntry, ResultView};

/// Columns used by a full (100%) bar.
const BAR_WIDTH: usize = 30;

/// Format a rendered classification result.
pub fn format_result_view(view: &ResultView, request: Option<&ClassificationRequest>) -> String {
    let mut out = String::new();

    out.push_str("=== exo - Exoplanet Classification ===\n");
    if let Some(req) = request {
        for (field, value) in [
            (Field::OrbitalPeriod, req.orbital_period),
            (Field::TransitDuration, req.transit_duration),
            (Field::PlanetaryRadius, req.planetary_radius),
        ] {
            out.push_str(&format!("{:<18} {value} {}\n", format!("{field}:"), field.unit()));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Prediction: {} {} ({})\n",
        view.category.glyph(),
        view.prediction,
        view.category.display_name(),
    ));

    if let Some(grouped) = &view.grouped {
        out.push_str("\nConfidence:\n");
        let width = label_width(grouped);
        for entry in grouped {
            out.push_str(&format!(
                "{:<width$} {} {:>7}\n",
                entry.label,
                text_bar(entry, BAR_WIDTH),
                entry.percent_label(),
            ));
        }
    }

    if let Some(detailed) = &view.detailed {
        out.push_str(&format!("\nDetailed breakdown ({} classes):\n", detailed.len()));
        let tiles: Vec<String> = detailed
            .iter()
            .map(|e| format!("[{} {}]", e.label, e.percent_label()))
            .collect();
        for row in tiles.chunks(4) {
            out.push_str(&format!("  {}\n", row.join(" ")));
        }
    }

    out
}

/// Format a `/health` response.
pub fn format_health(base_url: &str, health: &HealthStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!("Backend: {base_url}\n"));
    out.push_str(&format!("Status: {}\n", health.status));
    out.push_str(&format!("Model loaded: {}\n", yes_no(health.model_loaded)));
    out.push_str(&format!("Scaler loaded: {}\n", yes_no(health.scaler_loaded)));
    out.push_str(&format!("Label encoder loaded: {}\n", yes_no(health.label_encoder_loaded)));
    out
}

/// Format a `/performance` response, including the confusion matrix.
pub fn format_metrics(metrics: &PerformanceMetrics) -> String {
    let mut out = String::new();
    out.push_str("Model performance:\n");
    out.push_str(&format!("- accuracy : {:.3}\n", metrics.accuracy));
    out.push_str(&format!("- precision: {:.3}\n", metrics.precision));
    out.push_str(&format!("- recall   : {:.3}\n", metrics.recall));
    out.push_str(&format!("- f1       : {:.3}\n", metrics.f1_score));

    if metrics.confusion_matrix.is_empty() {
        return out;
    }

    out.push_str("\nConfusion matrix (rows = actual, columns = predicted):\n");
    let names: Vec<String> = (0..metrics.confusion_matrix.len())
        .map(|i| {
            metrics
                .class_names
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("class {i}"))
        })
        .collect();
    let name_w = names.iter().map(|n| n.chars().count()).max().unwrap_or(0).max(6);

    let mut header = format!("{:<name_w$}", "");
    for name in &names {
        header.push_str(&format!(" {:>8}", truncate(name, 8)));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for (name, row) in names.iter().zip(&metrics.confusion_matrix) {
        let mut line = format!("{name:<name_w$}");
        for count in row {
            line.push_str(&format!(" {count:>8}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// A block bar `width` columns wide at 100%. Negative values give an empty
/// bar; values above one overflow, bounded by [`ProbabilityEntry::bar_cells`].
fn text_bar(entry: &ProbabilityEntry, width: usize) -> String {
    let filled = entry.bar_cells(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn label_width(entries: &[ProbabilityEntry]) -> usize {
    entries.iter().map(|e| e.label.chars().count()).max().unwrap_or(0)
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
