//! CEP Weather - current temperature for a Brazilian postal code (CEP)
//!
//! Built with Actix Web, the crate resolves a CEP to its city through ViaCEP
//! and reports that city's current temperature from WeatherAPI in Celsius,
//! Fahrenheit and Kelvin. It ships three binaries:
//! - `gateway` (service A) - validates `POST /cep` and forwards to the resolver
//! - `resolver` (service B) - `POST /weather`, performs both lookups
//! - `standalone` - `GET /weather/{cep}` in a single process
//!
//! All three emit structured logs, export spans over OTLP/HTTP and expose
//! Prometheus metrics.
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Request/response bodies and upstream payloads
//! - `handlers/` - HTTP request handlers and app factories
//! - `middleware/` - Request IDs, request logging and metrics
//! - `services/` - Geocoding and weather ports, orchestration, HTTP client
//! - `utils/` - Request inspection helpers
//! - `config/` - Configuration structures and environment loading
//! - `telemetry` - Subscriber setup and trace-context propagation
//! - `server` - Per-deployment bootstrap
//!
//! ## Quick Start
//!
//! ```no_run
//! use cep_weather::{AppConfig, server};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     server::run_standalone(AppConfig::from_env()).await
//! }
//! ```

// Core modules
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod telemetry;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use config::{AppConfig, HttpClientConfig, LogFormat};
pub use errors::{ServiceError, UpstreamError};
pub use handlers::{create_gateway_app, create_resolver_app, create_standalone_app};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{CepRequest, ErrorResponse, LocationRecord, TemperatureResponse, WeatherSample};
pub use services::{
    AppMetrics, GatewayService, InstrumentedClient, LocationResolver, TemperatureResolver,
    ViaCepClient, WeatherApiClient, WeatherFetcher,
};
pub use telemetry::{TelemetryConfig, TelemetryGuard, init_telemetry};
