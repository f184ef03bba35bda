//! Current-weather lookup via WeatherAPI.

use crate::errors::UpstreamError;
use crate::models::WeatherSample;
use crate::services::http_client::InstrumentedClient;
use async_trait::async_trait;
use tracing::{debug, error, info};
use url::Url;

/// Port fetching the current weather for a city
#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherSample, UpstreamError>;
}

/// WeatherAPI-backed [`WeatherFetcher`]
pub struct WeatherApiClient {
    client: InstrumentedClient,
    api_key: String,
    base_url: String,
}

impl WeatherApiClient {
    pub fn new(
        client: InstrumentedClient,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn current_url(&self, city: &str) -> Result<Url, UpstreamError> {
        build_current_url(&self.base_url, &self.api_key, city)
            .map_err(|e| UpstreamError::Decode(format!("invalid weather API URL: {e}")))
    }
}

/// Build `{base}/v1/current.json?key=..&q=<city>, Brazil&aqi=no`.
///
/// Query values are form-urlencoded, so spaces become `+` and the comma `%2C`.
pub fn build_current_url(base_url: &str, api_key: &str, city: &str) -> Result<Url, url::ParseError> {
    let query = format!("{city}, Brazil");
    Url::parse_with_params(
        &format!("{}/v1/current.json", base_url.trim_end_matches('/')),
        &[("key", api_key), ("q", query.as_str()), ("aqi", "no")],
    )
}

#[async_trait]
impl WeatherFetcher for WeatherApiClient {
    async fn current(&self, city: &str) -> Result<WeatherSample, UpstreamError> {
        debug!(key_length = self.api_key.len(), "Checking weather API key");
        if self.api_key.trim().is_empty() {
            return Err(UpstreamError::MissingApiKey);
        }

        let url = self.current_url(city)?;
        debug!(city = %city, encoded_query = ?url.query(), "Requesting WeatherAPI");

        let response = self.client.get(url.as_str()).await.map_err(|e| {
            error!(city = %city, error = %e, "WeatherAPI request failed");
            UpstreamError::from(e)
        })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            error!(city = %city, status_code = status, response = %body, "WeatherAPI returned an error response");
            return Err(UpstreamError::Status { status, body });
        }

        let sample = response.json::<WeatherSample>().await.map_err(|e| {
            error!(city = %city, error = %e, "Error decoding WeatherAPI response");
            UpstreamError::Decode(e.to_string())
        })?;

        info!(
            city = %city,
            temp_c = sample.current.temp_c,
            temp_f = sample.current.temp_f,
            country = %sample.location.country,
            "Weather data retrieved"
        );

        Ok(sample)
    }
}
