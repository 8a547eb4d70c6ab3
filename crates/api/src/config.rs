use std::path::PathBuf;

use axum::http::HeaderValue;
use larder_core::scheduling::{refresh_interval, DEFAULT_REFRESH_HOURS};
use larder_core::status::ThresholdTable;

/// Whether the server runs with development or production defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Any CORS origin, verbose logging.
    Debug,
    /// A single configured CORS origin, quiet logging.
    Release,
}

impl AppMode {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            AppMode::Debug => "larder_api=debug,larder_db=debug,tower_http=debug",
            AppMode::Release => "larder_api=info,larder_db=info,tower_http=warn",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the release-mode CORS origin have defaults suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    pub mode: AppMode,
    /// The only allowed CORS origin in release mode.
    pub cors_origin: Option<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Append logs to this file instead of stdout.
    pub log_file: Option<PathBuf>,
    /// Grocery list refresh interval in hours (default: `12`).
    pub grocery_refresh_hours: u64,
    /// Category thresholds used to classify item status.
    pub thresholds: ThresholdTable,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `8080`                  |
    /// | `APP_MODE`              | `debug`                 |
    /// | `CORS_ORIGIN`           | required in release     |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `LOG_FILE`              | unset (stdout)          |
    /// | `GROCERY_REFRESH_HOURS` | `12`                    |
    /// | `CATEGORY_THRESHOLDS`   | built-in table          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 8080)?;

        let mode = match var("APP_MODE").as_deref().map(str::trim) {
            None | Some("debug") => AppMode::Debug,
            Some("release") => AppMode::Release,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "APP_MODE",
                    reason: format!("expected `debug` or `release`, got {other:?}"),
                })
            }
        };

        let cors_origin = var("CORS_ORIGIN").map(|o| o.trim().to_string());
        if let Some(origin) = &cors_origin {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                key: "CORS_ORIGIN",
                reason: e.to_string(),
            })?;
        }
        if mode == AppMode::Release && cors_origin.is_none() {
            return Err(ConfigError::Missing("CORS_ORIGIN"));
        }

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 30)?;
        let log_file = var("LOG_FILE").map(PathBuf::from);

        let grocery_refresh_hours = parse_or(
            "GROCERY_REFRESH_HOURS",
            var("GROCERY_REFRESH_HOURS"),
            DEFAULT_REFRESH_HOURS,
        )?;
        refresh_interval(grocery_refresh_hours).map_err(|e| ConfigError::Invalid {
            key: "GROCERY_REFRESH_HOURS",
            reason: e.to_string(),
        })?;

        let thresholds = match var("CATEGORY_THRESHOLDS") {
            Some(raw) => {
                let table = ThresholdTable::parse(&raw).map_err(|e| ConfigError::Invalid {
                    key: "CATEGORY_THRESHOLDS",
                    reason: e.to_string(),
                })?;
                if table.is_empty() {
                    return Err(ConfigError::Invalid {
                        key: "CATEGORY_THRESHOLDS",
                        reason: "no category thresholds given".into(),
                    });
                }
                table
            }
            None => ThresholdTable::default(),
        };

        Ok(Self {
            host,
            port,
            mode,
            cors_origin,
            request_timeout_secs,
            log_file,
            grocery_refresh_hours,
            thresholds,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}
