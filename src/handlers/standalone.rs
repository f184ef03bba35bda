//! `GET /weather/{cep}`: single-service deployment.

use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::services::TemperatureResolver;
use actix_web::{HttpResponse, web};
use tracing::{Instrument, info, info_span};

/// Resolve the postal code in the path. The report carries no `city`, and
/// with `DEV_MODE=true` a failed weather lookup is answered with mock data.
pub async fn handle_weather_path(
    cep: web::Path<String>,
    resolver: web::Data<TemperatureResolver>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, ServiceError> {
    let cep = cep.into_inner();
    let span = info_span!("weather-standalone.handleWeatherRequest", cep = %cep);

    async move {
        info!(cep = %cep, dev_mode = config.dev_mode, "Received weather request");
        let report = resolver.resolve_standalone(&cep, config.dev_mode).await?;
        Ok(HttpResponse::Ok().json(report))
    }
    .instrument(span)
    .await
}
