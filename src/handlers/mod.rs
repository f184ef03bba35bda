//! HTTP request handlers for API endpoints.
//!
//! Handlers stay thin: decode the request, call a service, and let
//! [`crate::errors::ServiceError`] render failures.

pub mod app;
pub mod gateway;
pub mod health;
pub mod metrics;
pub mod request;
pub mod resolver;
pub mod standalone;

pub use app::*;
pub use gateway::*;
pub use health::*;
pub use metrics::*;
pub use request::*;
pub use resolver::*;
pub use standalone::*;
