//! Runtime settings read from the environment.

use std::env;
use std::time::Duration;

use crate::IndexingError;
use bookmark_indexer_pipeline::fetcher::{FetcherConfig, StatusPolicy, DEFAULT_API_URL};
use bookmark_indexer_repository::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_USERNAME};
use bookmark_indexer_repository::SearchConnectionConfig;

/// Connection settings for both ends of a sync run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub search: SearchConnectionConfig,
    pub fetcher: FetcherConfig,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `ELASTIC_PASSWORD`: basic-auth password (default: no auth)
    /// - `ELASTIC_USERNAME`: basic-auth user (default: elastic)
    /// - `ELASTICSEARCH_HOST`: host (default: localhost)
    /// - `ELASTICSEARCH_PORT`: port (default: 9200)
    /// - `ELASTICSEARCH_SCHEME`: http or https (default: http)
    /// - `PINBOARD_TOKEN`: Pinboard API token (required)
    /// - `PINBOARD_API_URL`: API base URL (default: https://api.pinboard.in/v1)
    /// - `PINBOARD_TIMEOUT_SECS`: request deadline, 0 for none (default: none)
    /// - `PINBOARD_ALLOW_HTTP_ERRORS`: parse error responses anyway (default: false)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let auth_token = var("PINBOARD_TOKEN")
            .ok_or_else(|| IndexingError::config("PINBOARD_TOKEN must be set"))?;

        let timeout = match var("PINBOARD_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => None,
        };

        let allow_http_errors = match var("PINBOARD_ALLOW_HTTP_ERRORS") {
            Some(raw) => parse_flag(&raw)?,
            None => false,
        };
        let status_policy = if allow_http_errors {
            StatusPolicy::BestEffort
        } else {
            StatusPolicy::Abort
        };

        let port = match var("ELASTICSEARCH_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                IndexingError::config(format!("Invalid ELASTICSEARCH_PORT {:?}: {}", raw, e))
            })?,
            None => DEFAULT_PORT,
        };

        let scheme = var("ELASTICSEARCH_SCHEME").unwrap_or_else(|| "http".to_string());
        if scheme != "http" && scheme != "https" {
            return Err(IndexingError::config(format!(
                "Invalid ELASTICSEARCH_SCHEME {:?}: expected http or https",
                scheme
            )));
        }

        let search = SearchConnectionConfig {
            scheme,
            host: var("ELASTICSEARCH_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            username: var("ELASTIC_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: var("ELASTIC_PASSWORD"),
            request_timeout: timeout,
        };

        let fetcher = FetcherConfig {
            base_url: var("PINBOARD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            auth_token,
            timeout,
            status_policy,
        };

        Ok(Self { search, fetcher })
    }
}

fn parse_timeout(raw: &str) -> Result<Option<Duration>, IndexingError> {
    let secs = raw.trim().parse::<f64>().map_err(|e| {
        IndexingError::config(format!("Invalid PINBOARD_TIMEOUT_SECS {:?}: {}", raw, e))
    })?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(IndexingError::config(format!(
            "Invalid PINBOARD_TIMEOUT_SECS {:?}: must be a non-negative number",
            raw
        )));
    }
    if secs == 0.0 {
        return Ok(None);
    }
    Duration::try_from_secs_f64(secs).map(Some).map_err(|e| {
        IndexingError::config(format!("Invalid PINBOARD_TIMEOUT_SECS {:?}: {}", raw, e))
    })
}

fn parse_flag(raw: &str) -> Result<bool, IndexingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(IndexingError::config(format!(
            "Invalid PINBOARD_ALLOW_HTTP_ERRORS {:?}: expected true or false",
            raw
        ))),
    }
}
