//! Command-line parsing for the exoplanet classification client.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! the form, controller and rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "exo", version, about = "Exoplanet transit classification client")]
pub struct Cli {
    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (landing page + classification form).
    Tui,
    /// Classify one set of transit measurements and print the result.
    Predict(PredictArgs),
    /// Show a previously exported prediction record.
    Show(ShowArgs),
    /// Check whether the backend is up and its model is loaded.
    Health,
    /// Print the backend's model performance metrics.
    Metrics,
}

/// Backend connection options, shared by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct BackendArgs {
    /// Backend base URL (overrides EXO_API_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds, 0 to disable (overrides EXO_TIMEOUT_SECS).
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

impl BackendArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Measurements for a one-shot classification.
///
/// Values are taken as text and validated exactly like the TUI form.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Orbital period (days).
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    pub orbital_period: String,

    /// Transit duration (hours).
    #[arg(short = 'd', long, allow_hyphen_values = true)]
    pub transit_duration: String,

    /// Planetary radius (Earth radii).
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    pub planetary_radius: String,

    /// Print the raw backend result as JSON instead of the summary.
    #[arg(long)]
    pub json: bool,

    /// Write a prediction record (input + result + timestamp) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Prediction record produced by `exo predict --export`.
    #[arg(value_name = "JSON")]
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_parses_values_as_text() {
        let cli = Cli::try_parse_from([
            "exo", "predict", "-p", "0", "--transit-duration", "2.5", "-r", "-1", "--json",
        ])
        .unwrap();
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.orbital_period, "0");
        assert_eq!(args.transit_duration, "2.5");
        assert_eq!(args.planetary_radius, "-1");
        assert!(args.json);
        assert!(args.export.is_none());
    }

    #[test]
    fn backend_flags_are_global() {
        let cli = Cli::try_parse_from(["exo", "health", "--base-url", "http://h:1", "--timeout-secs", "3"]).unwrap();
        let o = cli.backend.overrides();
        assert_eq!(o.base_url.as_deref(), Some("http://h:1"));
        assert_eq!(o.timeout_secs, Some(3));
    }

    #[test]
    fn predict_requires_all_three_values() {
        assert!(Cli::try_parse_from(["exo", "predict", "-p", "1", "-d", "2"]).is_err());
    }
}
