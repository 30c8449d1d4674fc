//! Connection configuration for the OpenSearch client.

use std::time::Duration;

/// Default document-store host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default document-store port.
pub const DEFAULT_PORT: u16 = 9200;

/// Default basic-auth user.
pub const DEFAULT_USERNAME: &str = "elastic";

/// Configuration for connecting to the search engine.
#[derive(Debug, Clone)]
pub struct SearchConnectionConfig {
    /// `http` or `https`.
    pub scheme: String,
    /// Host name.
    pub host: String,
    /// Port.
    pub port: u16,
    /// Basic-auth user. Only sent when `password` is set.
    pub username: String,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for SearchConnectionConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: DEFAULT_USERNAME.to_string(),
            password: None,
            request_timeout: None,
        }
    }
}

impl SearchConnectionConfig {
    /// Base URL of the cluster, e.g. `http://localhost:9200`.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Set basic-auth credentials.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = Some(password.into());
        self
    }

    /// Credentials to send, if any.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.password
            .as_deref()
            .map(|password| (self.username.as_str(), password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let config = SearchConnectionConfig::default();
        assert_eq!(config.url(), "http://localhost:9200");
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_basic_auth() {
        let config = SearchConnectionConfig {
            scheme: "https".to_string(),
            host: "es.internal".to_string(),
            port: 9243,
            ..Default::default()
        }
        .with_basic_auth("elastic", "changeme");

        assert_eq!(config.url(), "https://es.internal:9243");
        assert_eq!(config.credentials(), Some(("elastic", "changeme")));
    }
}
