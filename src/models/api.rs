//! Request and response models exposed by the HTTP services.

use crate::models::upstream::WeatherSample;
use crate::services::validation::celsius_to_kelvin;
use serde::{Deserialize, Serialize};

/// Body accepted by `POST /cep` and `POST /weather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CepRequest {
    /// Postal code, expected to be 8 ASCII digits
    #[serde(default)]
    pub cep: String,
}

impl CepRequest {
    pub fn new(cep: impl Into<String>) -> Self {
        Self { cep: cep.into() }
    }
}

/// Temperature report returned on success
///
/// `city` is only present on the combined (gateway/resolver) endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl TemperatureResponse {
    /// Build a report from an upstream sample. Fahrenheit is passed through
    /// untouched; Kelvin is always derived from Celsius.
    pub fn from_sample(city: Option<String>, sample: &WeatherSample) -> Self {
        Self {
            city,
            temp_c: sample.current.temp_c,
            temp_f: sample.current.temp_f,
            temp_k: celsius_to_kelvin(sample.current.temp_c),
        }
    }
}

/// Error envelope used for every non-2xx response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
