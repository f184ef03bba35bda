//! Process-wide application configuration.
//!
//! Every setting is sourced from the environment with a default. The struct is
//! plain data so tests can fabricate configurations without touching `env`.

use super::http_client::HttpClientConfig;
use std::env;
use std::str::FromStr;

/// Output format for the structured logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

/// Settings shared by the gateway, resolver and standalone services
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface the HTTP server binds to
    pub bind_address: String,
    pub port: u16,
    /// Log level name (`DEBUG`, `INFO`, `WARN`, `ERROR`)
    pub log_level: String,
    pub log_format: LogFormat,
    /// WeatherAPI key. Empty means not configured.
    pub weather_api_key: String,
    /// Base URL of the resolver service, used by the gateway
    pub service_b_url: String,
    /// Base URL of the OTLP/HTTP trace collector
    pub otel_collector_url: String,
    pub otel_enabled: bool,
    /// Substitute mock weather data when the weather lookup fails
    pub dev_mode: bool,
    pub metrics_enabled: bool,
    pub geocoding_base_url: String,
    pub weather_api_base_url: String,
    pub geocoding_client: HttpClientConfig,
    pub weather_client: HttpClientConfig,
    pub service_b_client: HttpClientConfig,
}

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RESOLVER_PORT: u16 = 8081;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            log_level: "INFO".to_string(),
            log_format: LogFormat::Text,
            weather_api_key: String::new(),
            service_b_url: "http://localhost:8081".to_string(),
            otel_collector_url: "http://localhost:4318".to_string(),
            otel_enabled: true,
            dev_mode: false,
            metrics_enabled: true,
            geocoding_base_url: "https://viacep.com.br".to_string(),
            weather_api_base_url: "https://api.weatherapi.com".to_string(),
            geocoding_client: HttpClientConfig::with_timeout(5),
            weather_client: HttpClientConfig::with_timeout(10),
            service_b_client: HttpClientConfig::with_timeout(30),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_env_with_port(DEFAULT_PORT)
    }

    /// Same as [`AppConfig::from_env`] with a service-specific default port
    pub fn from_env_with_port(default_port: u16) -> Self {
        let defaults = Self::default();

        let log_format = if env_bool("LOG_JSON", false) {
            LogFormat::Json
        } else {
            LogFormat::Text
        };

        Self {
            bind_address: env_or("BIND_ADDRESS", &defaults.bind_address),
            port: env_parse("PORT", default_port),
            log_level: env_or("LOG_LEVEL", &defaults.log_level),
            log_format,
            weather_api_key: env_or("WEATHER_API_KEY", ""),
            service_b_url: env_or("SERVICE_B_URL", &defaults.service_b_url),
            otel_collector_url: env_or("OTEL_COLLECTOR_URL", &defaults.otel_collector_url),
            otel_enabled: env_bool("OTEL_ENABLED", defaults.otel_enabled),
            dev_mode: env_bool("DEV_MODE", false),
            metrics_enabled: env_bool("METRICS_ENABLED", defaults.metrics_enabled),
            geocoding_base_url: env_or("GEOCODING_BASE_URL", &defaults.geocoding_base_url),
            weather_api_base_url: env_or("WEATHER_API_BASE_URL", &defaults.weather_api_base_url),
            geocoding_client: HttpClientConfig::from_env("GEOCODING", 5),
            weather_client: HttpClientConfig::from_env("WEATHER", 10),
            service_b_client: HttpClientConfig::from_env("SERVICE_B", 30),
        }
    }

    pub fn has_weather_api_key(&self) -> bool {
        !self.weather_api_key.trim().is_empty()
    }
}

/// Read a string variable; unset and empty both yield the default
pub(crate) fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Read a boolean variable accepting `1/t/true` and `0/f/false` in any case
pub(crate) fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
