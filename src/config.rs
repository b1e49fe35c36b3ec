//! Runtime settings.
//!
//! Resolution order, highest first: CLI flag, process environment, `.env`
//! (loaded with `dotenvy`), built-in default.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_DIR: &str = "logs";

pub const ENV_BASE_URL: &str = "EXO_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "EXO_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "EXO_LOG_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Backend base URL; endpoint paths are appended to it.
    pub base_url: Url,
    /// `None` disables the request timeout.
    pub timeout: Option<Duration>,
    pub log_dir: PathBuf,
}

/// Values supplied on the command line, if any.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from the environment (and `.env`), then apply CLI overrides.
    pub fn from_env(overrides: &Overrides) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self::resolve(
            overrides,
            env(ENV_BASE_URL),
            env(ENV_TIMEOUT_SECS),
            env(ENV_LOG_DIR),
        )
    }

    /// Pure resolution step, separated from process state for testing.
    pub fn resolve(
        overrides: &Overrides,
        env_base_url: Option<String>,
        env_timeout: Option<String>,
        env_log_dir: Option<String>,
    ) -> Result<Self, AppError> {
        let raw_url = overrides
            .base_url
            .clone()
            .or(env_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&raw_url)?;

        let timeout_secs = match (overrides.timeout_secs, env_timeout) {
            (Some(secs), _) => secs,
            (None, Some(raw)) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::new(2, format!("Invalid {ENV_TIMEOUT_SECS} '{raw}': {e}"))
            })?,
            (None, None) => DEFAULT_TIMEOUT_SECS,
        };
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let log_dir = PathBuf::from(env_log_dir.unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()));

        Ok(Self {
            base_url,
            timeout,
            log_dir,
        })
    }

    /// Absolute URL of a backend endpoint, e.g. `endpoint("predict")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::new(2, format!("Invalid backend URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::new(
            2,
            format!("Backend URL must use http or https (got '{other}')."),
        )),
    }
}
