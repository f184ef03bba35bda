//! Instrumented HTTP client for outbound calls.
//!
//! Wraps `reqwest` with:
//! - A per-upstream timeout, where a timeout counts as a transport failure
//! - Structured logging of every request and its outcome
//! - Upstream metrics (request count by outcome, latency histogram)
//! - W3C trace-context injection on calls to sibling services
//!
//! Requests are never retried.

use crate::config::HttpClientConfig;
use crate::services::metrics::AppMetrics;
use crate::telemetry::inject_trace_context;
use crate::utils::duration_millis;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Errors that can occur before a response is received
#[derive(Debug, thiserror::Error)]
pub enum OutboundError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request timed out after {0}s")]
    Timeout(u64),
}

/// HTTP client bound to one upstream
#[derive(Clone)]
pub struct InstrumentedClient {
    client: Client,
    config: HttpClientConfig,
    metrics: Option<AppMetrics>,
    upstream: &'static str,
}

impl InstrumentedClient {
    /// Create a client for `upstream` (used as the metrics and log label)
    pub fn new(
        upstream: &'static str,
        config: HttpClientConfig,
        metrics: Option<AppMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics,
            upstream,
        })
    }

    pub fn upstream(&self) -> &'static str {
        self.upstream
    }

    /// Execute an HTTP GET request
    pub async fn get(&self, url: &str) -> Result<Response, OutboundError> {
        self.execute(self.client.get(url), "GET", url).await
    }

    /// Execute an HTTP POST with a JSON body, propagating the current trace context
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, OutboundError> {
        let mut headers = HeaderMap::new();
        inject_trace_context(&mut headers);

        let request = self.client.post(url).headers(headers).json(body);
        self.execute(request, "POST", url).await
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        method: &'static str,
        url: &str,
    ) -> Result<Response, OutboundError> {
        let destination = extract_destination(url);
        let path = extract_path(url);
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let start = Instant::now();

        let result = tokio::time::timeout(timeout, request.send()).await;
        let duration = start.elapsed();

        match result {
            Ok(Ok(response)) => {
                if self.config.enable_detailed_logging {
                    info!(
                        upstream = self.upstream,
                        destination = %destination,
                        method,
                        path = %path,
                        status = response.status().as_u16(),
                        duration_ms = duration_millis(duration),
                        "Outbound request completed"
                    );
                }
                self.record(outcome_for_status(response.status().as_u16()), duration);
                Ok(response)
            }
            Ok(Err(e)) => {
                if self.config.enable_detailed_logging {
                    error!(
                        upstream = self.upstream,
                        destination = %destination,
                        method,
                        path = %path,
                        error = %e,
                        duration_ms = duration_millis(duration),
                        "Outbound request failed with network error"
                    );
                }
                self.record("network_error", duration);
                Err(OutboundError::Network(e))
            }
            Err(_) => {
                if self.config.enable_detailed_logging {
                    warn!(
                        upstream = self.upstream,
                        destination = %destination,
                        method,
                        path = %path,
                        timeout_seconds = timeout.as_secs(),
                        "Outbound request timed out"
                    );
                }
                self.record("timeout", duration);
                Err(OutboundError::Timeout(timeout.as_secs()))
            }
        }
    }

    fn record(&self, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics.record_upstream(self.upstream, outcome, duration);
        }
    }
}

fn outcome_for_status(status: u16) -> &'static str {
    if (200..300).contains(&status) {
        "success"
    } else {
        "error_status"
    }
}

/// Host part of `url`, used to group log lines by collaborator
fn extract_destination(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "invalid_url".to_string())
}

/// Path part of `url`. The query is dropped so API keys are never logged.
fn extract_path(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| "invalid_url".to_string())
}
