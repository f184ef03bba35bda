//! Logging and distributed tracing setup.
//!
//! One subscriber per process: an `EnvFilter`, a fmt layer (JSON or text)
//! and, when enabled, an OpenTelemetry layer that batches spans to an
//! OTLP/HTTP collector. W3C trace context travels on the gateway → resolver
//! hop via [`inject_trace_context`] and [`set_parent_from_headers`].

use crate::config::{AppConfig, LogFormat};
use crate::utils::duration_millis;
use opentelemetry::propagation::{Extractor, Injector};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::time::Instant;
use tracing::{Span, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

pub const SERVICE_VERSION: &str = "1.0.0";

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to build OTLP exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("global subscriber already set: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Telemetry settings for one service process
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Collector base URL; spans go to `{collector_url}/v1/traces`
    pub collector_url: String,
    pub enabled: bool,
}

impl TelemetryConfig {
    pub fn from_app(service_name: &str, config: &AppConfig) -> Self {
        Self {
            service_name: service_name.to_string(),
            service_version: SERVICE_VERSION.to_string(),
            log_level: config.log_level.clone(),
            log_format: config.log_format,
            collector_url: config.otel_collector_url.clone(),
            enabled: config.otel_enabled && !config.otel_collector_url.trim().is_empty(),
        }
    }

    fn traces_endpoint(&self) -> String {
        format!("{}/v1/traces", self.collector_url.trim_end_matches('/'))
    }
}

/// Keeps the tracer provider alive; call [`TelemetryGuard::shutdown`] before exit
/// so buffered spans are flushed.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                warn!(error = %e, "Error shutting down tracer provider");
            }
        }
    }
}

/// Map a `LOG_LEVEL` value to a filter directive. Unknown names fall back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => "trace",
        "DEBUG" => "debug",
        "WARN" | "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(level_directive(&config.log_level))?),
    }
}

fn build_provider(config: &TelemetryConfig) -> Result<SdkTracerProvider, TelemetryError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(config.traces_endpoint())
        .build()?;

    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attribute(KeyValue::new(
            "service.version",
            config.service_version.clone(),
        ))
        .build();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build())
}

/// Install the global subscriber and, when enabled, the OTLP trace pipeline.
///
/// Must run outside an async runtime: the exporter uses a blocking HTTP client.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let filter = build_filter(config)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer().with_target(true).boxed(),
    });

    let provider = if config.enabled {
        let provider = build_provider(config)?;
        global::set_tracer_provider(provider.clone());
        let tracer = provider.tracer(config.service_name.clone());
        layers.push(tracing_opentelemetry::layer().with_tracer(tracer).boxed());
        Some(provider)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()?;

    if config.enabled {
        info!(
            service = %config.service_name,
            endpoint = %config.traces_endpoint(),
            "Trace export enabled"
        );
    } else {
        info!(service = %config.service_name, "Trace export disabled");
    }

    Ok(TelemetryGuard { provider })
}

struct ReqwestInjector<'a>(&'a mut reqwest::header::HeaderMap);

impl Injector for ReqwestInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let Ok(name) = reqwest::header::HeaderName::from_bytes(key.as_bytes()) {
            if let Ok(val) = reqwest::header::HeaderValue::from_str(&value) {
                self.0.insert(name, val);
            }
        }
    }
}

struct ActixExtractor<'a>(&'a actix_web::http::header::HeaderMap);

impl Extractor for ActixExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Write the current span's context into outbound headers (`traceparent`)
pub fn inject_trace_context(headers: &mut reqwest::header::HeaderMap) {
    let cx = Span::current().context();
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(&cx, &mut ReqwestInjector(headers));
    });
}

/// Parent `span` on the trace context carried by inbound headers, if any
pub fn set_parent_from_headers(span: &Span, headers: &actix_web::http::header::HeaderMap) {
    let parent = global::get_text_map_propagator(|propagator| {
        propagator.extract(&ActixExtractor(headers))
    });
    let _ = span.set_parent(parent);
}

/// Record elapsed milliseconds since `started` on the span's `latency_ms` field
pub fn record_latency(span: &Span, started: Instant) {
    span.record("latency_ms", duration_millis(started.elapsed()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARN"), "warn");
        assert_eq!(level_directive("Error"), "error");
        assert_eq!(level_directive("verbose"), "info");
        assert_eq!(level_directive(""), "info");
    }

    #[test]
    fn test_from_app() {
        let app = AppConfig {
            otel_collector_url: "http://collector:4318/".to_string(),
            ..AppConfig::default()
        };
        let config = TelemetryConfig::from_app("service-a", &app);
        assert_eq!(config.service_name, "service-a");
        assert_eq!(config.service_version, "1.0.0");
        assert!(config.enabled);
        assert_eq!(config.traces_endpoint(), "http://collector:4318/v1/traces");

        let app = AppConfig {
            otel_enabled: false,
            ..AppConfig::default()
        };
        assert!(!TelemetryConfig::from_app("service-b", &app).enabled);
    }

    #[test]
    fn test_inject_without_active_trace() {
        global::set_text_map_propagator(TraceContextPropagator::new());
        let mut headers = reqwest::header::HeaderMap::new();
        inject_trace_context(&mut headers);
        assert!(headers.get("traceparent").is_none());
    }

    #[test]
    fn test_set_parent_tolerates_missing_headers() {
        let headers = actix_web::http::header::HeaderMap::new();
        let span = tracing::info_span!("test");
        set_parent_from_headers(&span, &headers);
    }
}
