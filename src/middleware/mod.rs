//! Custom middleware implementations for the API.
//!
//! Request IDs and request logging, plus inbound HTTP metrics.

pub mod metrics;
pub mod request_id;

pub use metrics::*;
pub use request_id::*;
