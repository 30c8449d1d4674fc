//! Pinboard API client.
//!
//! Issues one GET against the Pinboard v1 API and hands back the raw post
//! records.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::errors::PipelineError;
use bookmark_indexer_shared::SyncMethod;

/// Pinboard v1 API base URL.
pub const DEFAULT_API_URL: &str = "https://api.pinboard.in/v1";

/// What to do when Pinboard answers with a non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Fail the run with [`PipelineError::UpstreamHttp`].
    #[default]
    Abort,
    /// Log the failure and try to parse the body anyway.
    BestEffort,
}

/// Configuration for the Pinboard fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// API base URL, without a trailing path component for the method.
    pub base_url: String,
    /// Pinboard API token (`user:HEX`).
    pub auth_token: String,
    /// Request deadline. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Handling of non-success statuses.
    pub status_policy: StatusPolicy,
}

impl FetcherConfig {
    /// Default configuration for the given token.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            auth_token: auth_token.into(),
            timeout: None,
            status_policy: StatusPolicy::default(),
        }
    }
}

/// Fetches bookmark records from Pinboard.
pub struct PinboardFetcher {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl PinboardFetcher {
    /// Create a new fetcher.
    ///
    /// # Returns
    ///
    /// * `Ok(PinboardFetcher)` - A new fetcher instance
    /// * `Err(PipelineError)` - If the HTTP client cannot be built
    pub fn new(config: FetcherConfig) -> Result<Self, PipelineError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        info!(
            base_url = %config.base_url,
            timeout_secs = ?config.timeout.map(|t| t.as_secs_f64()),
            status_policy = ?config.status_policy,
            "Created Pinboard fetcher"
        );

        Ok(Self { client, config })
    }

    /// Full request URL for `method`, token included.
    pub fn request_url(&self, method: SyncMethod) -> Result<Url, PipelineError> {
        let endpoint = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            method.api_path()
        );

        Url::parse_with_params(
            &endpoint,
            &[
                ("auth_token", self.config.auth_token.as_str()),
                ("format", "json"),
            ],
        )
        .map_err(|e| PipelineError::invalid_argument(format!("Invalid Pinboard URL {}: {}", endpoint, e)))
    }

    /// Fetch the records for a method given by name.
    ///
    /// The name is checked before anything goes over the network; an unknown
    /// name fails with [`PipelineError::InvalidArgument`].
    pub async fn fetch(&self, method: &str) -> Result<Vec<Value>, PipelineError> {
        let method: SyncMethod = method.parse()?;
        self.fetch_method(method).await
    }

    /// Fetch the records for `method`.
    ///
    /// `posts/all` returns a bare array and the other endpoints wrap it in
    /// `{"posts": [...]}`; both come back as a flat list here.
    #[instrument(skip_all, fields(method = %method))]
    pub async fn fetch_method(&self, method: SyncMethod) -> Result<Vec<Value>, PipelineError> {
        let url = self.request_url(method)?;
        debug!(url = %redact_token(&url), "Requesting bookmarks");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Pinboard request failed");
            if self.config.status_policy == StatusPolicy::Abort {
                return Err(PipelineError::UpstreamHttp {
                    status: status.as_u16(),
                    body,
                });
            }
            warn!("Continuing with the error response body");
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| PipelineError::upstream_response(format!("invalid JSON: {}", e)))?;

        let records = extract_posts(method, value)?;
        info!(count = records.len(), "Fetched bookmarks");
        Ok(records)
    }
}

/// Pull the post list out of a response body.
fn extract_posts(method: SyncMethod, value: Value) -> Result<Vec<Value>, PipelineError> {
    if method.returns_bare_list() {
        return match value {
            Value::Array(posts) => Ok(posts),
            other => Err(PipelineError::upstream_response(format!(
                "expected an array from {}, got {}",
                method.api_path(),
                json_kind(&other)
            ))),
        };
    }

    match value {
        Value::Object(mut body) => match body.remove("posts") {
            Some(Value::Array(posts)) => Ok(posts),
            Some(other) => Err(PipelineError::upstream_response(format!(
                "expected posts to be an array, got {}",
                json_kind(&other)
            ))),
            None => Err(PipelineError::missing_field("posts")),
        },
        other => Err(PipelineError::upstream_response(format!(
            "expected an object from {}, got {}",
            method.api_path(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Copy of `url` with the auth token masked, for logging.
pub fn redact_token(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "auth_token" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
