//! Data models for the CEP weather services.
//!
//! This module contains the wire types exchanged with clients and between
//! services, plus the payloads decoded from the third-party APIs.

pub mod api;
pub mod upstream;

pub use api::*;
pub use upstream::*;
