//! Configuration structures and loading utilities.
//!
//! This module contains all configuration structures used by the services,
//! including environment variable loading and default values.

pub mod app;
pub mod http_client;

pub use app::*;
pub use http_client::*;

#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
