//! Sync method selector.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which Pinboard endpoint a run pulls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMethod {
    /// Full export of every bookmark.
    All,
    /// Most recent bookmarks.
    Recent,
    /// Single-item debug endpoint.
    Test,
}

/// Returned when a method name is not one of `all`, `recent` or `test`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("INVALID METHOD TYPE: Must be one of \"all\", \"recent\", \"test\" (got {0:?})")]
pub struct ParseMethodError(pub String);

impl SyncMethod {
    /// Upstream API path, relative to the `v1` base.
    pub fn api_path(&self) -> &'static str {
        match self {
            SyncMethod::All => "posts/all",
            SyncMethod::Recent => "posts/recent",
            SyncMethod::Test => "posts/get",
        }
    }

    /// Name accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMethod::All => "all",
            SyncMethod::Recent => "recent",
            SyncMethod::Test => "test",
        }
    }

    /// `posts/all` returns a bare array; the others wrap it in `{"posts": [...]}`.
    pub fn returns_bare_list(&self) -> bool {
        matches!(self, SyncMethod::All)
    }
}

impl FromStr for SyncMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SyncMethod::All),
            "recent" => Ok(SyncMethod::Recent),
            "test" => Ok(SyncMethod::Test),
            other => Err(ParseMethodError(other.to_string())),
        }
    }
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_methods() {
        assert_eq!("all".parse::<SyncMethod>().unwrap(), SyncMethod::All);
        assert_eq!("recent".parse::<SyncMethod>().unwrap(), SyncMethod::Recent);
        assert_eq!("test".parse::<SyncMethod>().unwrap(), SyncMethod::Test);
    }

    #[test]
    fn test_parse_invalid_method() {
        let err = "ALL".parse::<SyncMethod>().unwrap_err();
        assert_eq!(err, ParseMethodError("ALL".to_string()));
        assert!(err.to_string().starts_with("INVALID METHOD TYPE"));

        assert!("".parse::<SyncMethod>().is_err());
        assert!("posts/all".parse::<SyncMethod>().is_err());
    }

    #[test]
    fn test_api_paths() {
        assert_eq!(SyncMethod::All.api_path(), "posts/all");
        assert_eq!(SyncMethod::Recent.api_path(), "posts/recent");
        assert_eq!(SyncMethod::Test.api_path(), "posts/get");
    }

    #[test]
    fn test_only_all_returns_bare_list() {
        assert!(SyncMethod::All.returns_bare_list());
        assert!(!SyncMethod::Recent.returns_bare_list());
        assert!(!SyncMethod::Test.returns_bare_list());
    }
}
