//! Utility functions and helper modules.
//!
//! Request inspection helpers shared by the middleware.

pub mod http;
pub mod route;
pub mod time;

pub use http::*;
pub use route::*;
pub use time::*;
