//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves settings and initializes logging
//! - dispatches to the TUI or a one-shot command

use clap::Parser;

use crate::cli::{Command, PredictArgs, ShowArgs};
use crate::config::Settings;
use crate::data::ApiClient;
use crate::domain::Field;
use crate::error::AppError;
use crate::form::{Dispatch, Session};
use crate::io::{PredictionRecord, read_prediction_json, write_prediction_json};

/// Entry point for the `exo` binary.
pub fn run() -> Result<(), AppError> {
    // We want `exo` and `exo --base-url URL` to behave like `exo tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let settings = Settings::from_env(&cli.backend.overrides())?;
    if let Err(err) = crate::logging::init(&settings.log_dir) {
        eprintln!("warning: {err}; continuing without a log file");
    }
    tracing::info!(base_url = %settings.base_url, command = ?cli.command, "exo starting");

    match cli.command {
        Command::Tui => crate::tui::run(settings),
        Command::Predict(args) => handle_predict(settings, args),
        Command::Show(args) => handle_show(args),
        Command::Health => handle_health(settings),
        Command::Metrics => handle_metrics(settings),
    }
}

fn handle_predict(settings: Settings, args: PredictArgs) -> Result<(), AppError> {
    let client = ApiClient::new(settings)?;

    let mut session = Session::new();
    session.on_field_change(Field::OrbitalPeriod, args.orbital_period);
    session.on_field_change(Field::TransitDuration, args.transit_duration);
    session.on_field_change(Field::PlanetaryRadius, args.planetary_radius);

    let request = match crate::form::submit(&mut session, &client) {
        Dispatch::Started(pending) => pending.request,
        Dispatch::Rejected | Dispatch::Busy => {
            let msg = session.error().unwrap_or(crate::error::GENERIC_FAILURE);
            return Err(AppError::new(2, msg));
        }
    };

    if let Some(msg) = session.error() {
        return Err(AppError::new(4, msg));
    }
    let Some(result) = session.result() else {
        return Err(AppError::new(4, crate::error::GENERIC_FAILURE));
    };

    if args.json {
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| AppError::new(4, format!("Failed to encode result: {e}")))?;
        println!("{json}");
    } else {
        let view = crate::report::render(result);
        print!("{}", crate::report::format_result_view(&view, Some(&request)));
    }

    if let Some(path) = &args.export {
        let record = PredictionRecord::new(client.base_url(), request, result.clone());
        write_prediction_json(path, &record)?;
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let record = read_prediction_json(&args.file)?;
    println!("Classified at {} by {}", record.classified_at.to_rfc3339(), record.backend);
    let view = crate::report::render(&record.result);
    print!("{}", crate::report::format_result_view(&view, Some(&record.input)));
    Ok(())
}

fn handle_health(settings: Settings) -> Result<(), AppError> {
    let client = ApiClient::new(settings)?;
    let health = client.health().map_err(|e| e.into_app_error())?;
    print!("{}", crate::report::format_health(client.base_url(), &health));
    if health.is_ready() {
        Ok(())
    } else {
        Err(AppError::new(4, "Backend is up but not ready to classify."))
    }
}

fn handle_metrics(settings: Settings) -> Result<(), AppError> {
    let client = ApiClient::new(settings)?;
    let metrics = client.performance().map_err(|e| e.into_app_error())?;
    print!("{}", crate::report::format_metrics(&metrics));
    Ok(())
}

/// Rewrite argv so `exo` defaults to `exo tui`.
///
/// Rules:
/// - `exo`                       -> `exo tui`
/// - `exo --base-url URL ...`    -> `exo tui --base-url URL ...`
/// - `exo --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "tui" | "predict" | "show" | "health" | "metrics"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["exo"])), args(&["exo", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(args(&["exo", "--base-url", "http://x"])),
            args(&["exo", "tui", "--base-url", "http://x"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(args(&["exo", "health"])), args(&["exo", "health"]));
        assert_eq!(rewrite_args(args(&["exo", "--help"])), args(&["exo", "--help"]));
        assert_eq!(
            rewrite_args(args(&["exo", "predict", "-p", "1"])),
            args(&["exo", "predict", "-p", "1"])
        );
    }
}
