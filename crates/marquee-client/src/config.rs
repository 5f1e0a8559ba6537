//! Client configuration and its defaults.
//!
//! # Design
//! - Keep defaults explicit so the CLI and tests agree on them.
//! - Validate once at construction; downstream code trusts the values.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";
/// Per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Directory name holding persisted client state.
pub const STATE_DIR_NAME: &str = "marquee";

/// Errors raised while assembling client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API URL was not an absolute http(s) URL.
    #[error("invalid API URL '{value}': {reason}")]
    InvalidApiUrl {
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Timeout of zero would fail every request.
    #[error("HTTP timeout must be at least one second")]
    ZeroTimeout,
    /// Request identifier cannot be sent as a header.
    #[error("request identifier contains invalid characters")]
    InvalidRequestId,
    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {detail}")]
    HttpClient {
        /// Builder error detail.
        detail: String,
    },
}

/// Validated client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL.
    pub api_url: Url,
    /// Per-request timeout handed to the HTTP client.
    pub timeout: Duration,
    /// Directory for durable client state (the session token).
    pub state_dir: PathBuf,
}

impl ClientConfig {
    /// Build a configuration, rejecting unusable values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is not http(s) or the timeout is zero.
    pub fn new(api_url: Url, timeout_secs: u64, state_dir: PathBuf) -> Result<Self, ConfigError> {
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl {
                value: api_url.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }
        if api_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiUrl {
                value: api_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            state_dir,
        })
    }
}

/// Parse a user-supplied API URL.
///
/// # Errors
///
/// Returns a display string suitable for argument parsers.
pub fn parse_api_url(input: &str) -> Result<Url, String> {
    input
        .trim()
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(value: &str) -> Url {
        value.parse().expect("valid URL")
    }

    #[test]
    fn new_accepts_http_and_https() {
        let config = ClientConfig::new(url("https://api.example"), 5, PathBuf::from("/tmp/m"))
            .expect("valid config");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(ClientConfig::new(url(DEFAULT_API_URL), 1, PathBuf::new()).is_ok());
    }

    #[test]
    fn new_rejects_other_schemes_and_zero_timeout() {
        assert!(matches!(
            ClientConfig::new(url("ftp://example"), 5, PathBuf::new()),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new(url("http://example"), 0, PathBuf::new()),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn parse_api_url_reports_input() {
        let err = parse_api_url("not a url").expect_err("invalid");
        assert!(err.contains("not a url"));
    }
}
