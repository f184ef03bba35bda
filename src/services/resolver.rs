//! Temperature resolution: postal code → city → current weather.
//!
//! Failure mapping at this layer:
//! - malformed code → [`ServiceError::InvalidInput`], no outbound call
//! - any geocoding failure, including "not found" → [`ServiceError::NotFound`]
//! - missing API key → [`ServiceError::Configuration`]
//! - any other weather failure → [`ServiceError::UpstreamFailure`]

use crate::errors::{ServiceError, UpstreamError};
use crate::models::{LocationRecord, TemperatureResponse, WeatherSample};
use crate::services::location::LocationResolver;
use crate::services::validation::is_valid_cep;
use crate::services::weather::WeatherFetcher;
use crate::telemetry::record_latency;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, error, field, info, info_span, warn};

/// Orchestrates the geocoding and weather ports
#[derive(Clone)]
pub struct TemperatureResolver {
    locations: Arc<dyn LocationResolver>,
    weather: Arc<dyn WeatherFetcher>,
}

impl TemperatureResolver {
    pub fn new(locations: Arc<dyn LocationResolver>, weather: Arc<dyn WeatherFetcher>) -> Self {
        Self { locations, weather }
    }

    /// Resolve `cep` into a report that includes the city name
    pub async fn resolve(&self, cep: &str) -> Result<TemperatureResponse, ServiceError> {
        let (location, sample) = self.lookup(cep, false).await?;
        let report = TemperatureResponse::from_sample(Some(location.city), &sample);
        log_report(cep, &report);
        Ok(report)
    }

    /// Resolve `cep` for the single-service deployment: no city in the report,
    /// and with `dev_mode` a failed weather lookup falls back to mock data.
    pub async fn resolve_standalone(
        &self,
        cep: &str,
        dev_mode: bool,
    ) -> Result<TemperatureResponse, ServiceError> {
        let (_, sample) = self.lookup(cep, dev_mode).await?;
        let report = TemperatureResponse::from_sample(None, &sample);
        log_report(cep, &report);
        Ok(report)
    }

    async fn lookup(
        &self,
        cep: &str,
        allow_mock: bool,
    ) -> Result<(LocationRecord, WeatherSample), ServiceError> {
        if !is_valid_cep(cep) {
            warn!(cep = %cep, "Invalid zipcode");
            return Err(ServiceError::InvalidInput);
        }

        let location = self.locate(cep).await?;
        info!(cep = %cep, city = %location.city, state = %location.state, "Location found");

        let sample = match self.fetch_weather(&location.city).await {
            Ok(sample) => sample,
            Err(err) if allow_mock && err.is_weather_failure() => {
                info!(city = %location.city, "Using mock weather data");
                WeatherSample::mock(&location.city)
            }
            Err(err) => return Err(err),
        };

        Ok((location, sample))
    }

    async fn locate(&self, cep: &str) -> Result<LocationRecord, ServiceError> {
        let span = info_span!(
            "service-b.getLocationFromCEP",
            cep = %cep,
            latency_ms = field::Empty
        );

        async {
            info!(cep = %cep, "Calling ViaCEP API");
            let started = Instant::now();
            let result = self.locations.locate(cep).await;
            record_latency(&tracing::Span::current(), started);
            info!(cep = %cep, ok = result.is_ok(), "ViaCEP response received");

            match result {
                Ok(record) if record.is_found() => {
                    info!(
                        cep = %cep,
                        city = %record.city,
                        state = %record.state,
                        district = %record.district,
                        street = %record.street,
                        "CEP found"
                    );
                    Ok(record)
                }
                Ok(_) => {
                    warn!(cep = %cep, "CEP not found");
                    Err(ServiceError::NotFound("CEP not found".to_string()))
                }
                Err(err) => {
                    error!(cep = %cep, error = %err, "Error getting location");
                    Err(ServiceError::NotFound(err.to_string()))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn fetch_weather(&self, city: &str) -> Result<WeatherSample, ServiceError> {
        let span = info_span!(
            "service-b.getWeatherFromLocation",
            city = %city,
            latency_ms = field::Empty
        );

        async {
            info!(city = %city, "Calling WeatherAPI");
            let started = Instant::now();
            let result = self.weather.current(city).await;
            record_latency(&tracing::Span::current(), started);
            info!(city = %city, ok = result.is_ok(), "WeatherAPI response received");

            result.map_err(|err| {
                error!(city = %city, error = %err, "Error getting weather");
                let detail = err.to_string();
                match err {
                    UpstreamError::MissingApiKey => ServiceError::Configuration(detail),
                    _ => ServiceError::UpstreamFailure(detail),
                }
            })
        }
        .instrument(span)
        .await
    }
}

fn log_report(cep: &str, report: &TemperatureResponse) {
    info!(
        cep = %cep,
        city = ?report.city,
        temp_c = report.temp_c,
        temp_f = report.temp_f,
        temp_k = report.temp_k,
        "Sending response"
    );
}
