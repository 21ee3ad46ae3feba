//! Tracker configuration, loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use crate::constants;
use crate::error::TrackerError;

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Base URL of the statistics API, without a trailing slash.
    pub api_base: String,
    /// Days of history requested for the line chart.
    pub history_days: u32,
    pub request_timeout: Duration,
    /// Rows printed by the `table` command.
    pub table_rows: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base: constants::DEFAULT_API_BASE.to_string(),
            history_days: constants::DEFAULT_HISTORY_DAYS,
            request_timeout: Duration::from_secs(constants::DEFAULT_REQUEST_TIMEOUT_SECS),
            table_rows: constants::DEFAULT_TABLE_ROWS,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `COVID_API_BASE` -- API base URL (default `https://disease.sh/v3/covid-19`)
    /// - `COVID_HISTORY_DAYS` -- chart history length (default 120)
    /// - `COVID_REQUEST_TIMEOUT_SECS` -- per-request timeout (default 30)
    /// - `COVID_TABLE_ROWS` -- table rows shown (default 15)
    pub fn from_env() -> Result<Self, TrackerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TrackerError> {
        let defaults = Self::default();

        let api_base = lookup("COVID_API_BASE")
            .map(|base| base.trim_end_matches('/').to_owned())
            .unwrap_or(defaults.api_base);
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(TrackerError::Config(format!(
                "COVID_API_BASE must be an http(s) url, got `{api_base}`"
            )));
        }

        let history_days = parse_or(&lookup, "COVID_HISTORY_DAYS", defaults.history_days)?;
        let timeout_secs = parse_or(
            &lookup,
            "COVID_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?;
        let table_rows = parse_or(&lookup, "COVID_TABLE_ROWS", defaults.table_rows)?;

        Ok(Self {
            api_base,
            history_days,
            request_timeout: Duration::from_secs(timeout_secs),
            table_rows,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, TrackerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| TrackerError::Config(format!("invalid {key}: {e}"))),
        None => Ok(default),
    }
}
