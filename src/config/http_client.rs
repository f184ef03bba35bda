//! Configuration for outbound HTTP clients
//!
//! Each upstream (geocoding, weather, resolver hop) gets its own timeout.
//! Values can be overridden with `<PREFIX>_TIMEOUT_SECONDS` and
//! `<PREFIX>_CONNECT_TIMEOUT_SECONDS`.

use super::app::{env_bool, env_parse};

/// Timeouts and logging switches for one outbound client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Overall request timeout (in seconds)
    pub timeout_seconds: u64,

    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Log every outbound request and its outcome
    pub enable_detailed_logging: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::with_timeout(30)
    }
}

impl HttpClientConfig {
    pub fn with_timeout(timeout_seconds: u64) -> Self {
        Self {
            timeout_seconds,
            connect_timeout_seconds: timeout_seconds.min(3),
            enable_detailed_logging: true,
        }
    }

    /// Load configuration for the upstream identified by `prefix`
    pub fn from_env(prefix: &str, default_timeout_seconds: u64) -> Self {
        let defaults = Self::with_timeout(default_timeout_seconds);

        Self {
            timeout_seconds: env_parse(
                &format!("{prefix}_TIMEOUT_SECONDS"),
                defaults.timeout_seconds,
            ),
            connect_timeout_seconds: env_parse(
                &format!("{prefix}_CONNECT_TIMEOUT_SECONDS"),
                defaults.connect_timeout_seconds,
            ),
            enable_detailed_logging: env_bool(
                "HTTP_CLIENT_DETAILED_LOGGING",
                defaults.enable_detailed_logging,
            ),
        }
    }
}
