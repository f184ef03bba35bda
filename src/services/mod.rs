//! Business logic and service layer modules.
//!
//! The geocoding and weather ports live in `location` and `weather`;
//! `resolver` and `gateway` orchestrate them for each deployment.

pub mod gateway;
pub mod http_client;
pub mod location;
pub mod metrics;
pub mod resolver;
pub mod validation;
pub mod weather;

pub use gateway::*;
pub use http_client::*;
pub use location::*;
pub use metrics::*;
pub use resolver::*;
pub use validation::*;
pub use weather::*;
