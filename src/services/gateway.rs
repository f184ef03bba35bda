//! Gateway hop: validate the postal code, then forward it to the resolver.

use crate::errors::ServiceError;
use crate::models::{CepRequest, TemperatureResponse};
use crate::services::http_client::InstrumentedClient;
use crate::services::validation::is_valid_cep;
use crate::telemetry::record_latency;
use std::time::Instant;
use tracing::{Instrument, error, field, info, info_span, warn};

/// Forwards validated postal codes to the resolver service
#[derive(Clone)]
pub struct GatewayService {
    client: InstrumentedClient,
    service_b_url: String,
}

impl GatewayService {
    pub fn new(client: InstrumentedClient, service_b_url: impl Into<String>) -> Self {
        Self {
            client,
            service_b_url: service_b_url.into(),
        }
    }

    fn weather_url(&self) -> String {
        format!("{}/weather", self.service_b_url.trim_end_matches('/'))
    }

    /// Validate `cep` locally and relay the resolver's answer.
    ///
    /// An invalid code is rejected without calling the resolver.
    pub async fn handle(&self, cep: &str) -> Result<TemperatureResponse, ServiceError> {
        if !is_valid_cep(cep) {
            warn!(cep = %cep, "Invalid zipcode");
            return Err(ServiceError::InvalidInput);
        }

        let url = self.weather_url();
        let span = info_span!(
            "service-a.callServiceB",
            cep = %cep,
            service_b_url = %url,
            latency_ms = field::Empty
        );

        async {
            info!(cep = %cep, url = %url, "Calling Service B");
            let started = Instant::now();
            let result = self.client.post_json(&url, &CepRequest::new(cep)).await;
            record_latency(&tracing::Span::current(), started);

            let response = result.map_err(|e| {
                error!(cep = %cep, error = %e, "Error calling Service B");
                ServiceError::ResolverFailure(e.to_string())
            })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| {
                error!(cep = %cep, error = %e, "Error reading Service B response");
                ServiceError::ResolverFailure(e.to_string())
            })?;
            info!(cep = %cep, status_code = status, "Service B response received");

            translate_status(status, &body)
        }
        .instrument(span)
        .await
    }
}

/// Map the resolver's status and body onto the gateway outcome
pub fn translate_status(status: u16, body: &str) -> Result<TemperatureResponse, ServiceError> {
    match status {
        200 => serde_json::from_str::<TemperatureResponse>(body).map_err(|e| {
            error!(error = %e, "Error decoding Service B response");
            ServiceError::ResolverFailure(format!("invalid response from service B: {e}"))
        }),
        404 => Err(ServiceError::NotFound("reported by service B".to_string())),
        422 => Err(ServiceError::InvalidInput),
        other => {
            error!(status_code = other, response = %body, "Service B returned an error");
            Err(ServiceError::ResolverFailure(format!(
                "service B returned status {other}: {body}"
            )))
        }
    }
}
