//! Postal-code geocoding via the ViaCEP API.

use crate::errors::UpstreamError;
use crate::models::LocationRecord;
use crate::services::http_client::InstrumentedClient;
use async_trait::async_trait;
use tracing::{debug, error};

/// Port resolving a postal code to a location record
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Look up `cep`. A decoded record is returned as-is, including records
    /// that carry the not-found flag; callers decide what "found" means.
    async fn locate(&self, cep: &str) -> Result<LocationRecord, UpstreamError>;
}

/// ViaCEP-backed [`LocationResolver`]
pub struct ViaCepClient {
    client: InstrumentedClient,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(client: InstrumentedClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn lookup_url(&self, cep: &str) -> String {
        format!("{}/ws/{}/json/", self.base_url.trim_end_matches('/'), cep)
    }
}

#[async_trait]
impl LocationResolver for ViaCepClient {
    async fn locate(&self, cep: &str) -> Result<LocationRecord, UpstreamError> {
        let url = self.lookup_url(cep);
        debug!(cep = %cep, endpoint = %url, "Querying ViaCEP");

        let response = self.client.get(&url).await.map_err(|e| {
            error!(cep = %cep, error = %e, "Error contacting ViaCEP");
            UpstreamError::from(e)
        })?;

        let status = response.status().as_u16();
        if status != 200 {
            error!(cep = %cep, status_code = status, "ViaCEP returned an unexpected status");
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        response.json::<LocationRecord>().await.map_err(|e| {
            error!(cep = %cep, error = %e, "Error decoding ViaCEP response");
            UpstreamError::Decode(e.to_string())
        })
    }
}
