//! `POST /weather`: the resolver entry point, called by the gateway.

use crate::errors::ServiceError;
use crate::handlers::request::read_cep_request;
use crate::services::TemperatureResolver;
use crate::telemetry::set_parent_from_headers;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{Instrument, Span, field, info, info_span};

pub async fn handle_weather(
    req: HttpRequest,
    payload: web::Payload,
    resolver: web::Data<TemperatureResolver>,
) -> Result<HttpResponse, ServiceError> {
    let span = info_span!(
        "service-b.handleWeatherRequest",
        method = %req.method(),
        path = %req.path(),
        cep = field::Empty
    );
    // Continue the gateway's trace when it sent a traceparent
    set_parent_from_headers(&span, req.headers());

    async move {
        let request = read_cep_request(payload).await?;
        Span::current().record("cep", request.cep.as_str());
        info!(cep = %request.cep, "Received weather request");

        let report = resolver.resolve(&request.cep).await?;
        Ok(HttpResponse::Ok().json(report))
    }
    .instrument(span)
    .await
}
