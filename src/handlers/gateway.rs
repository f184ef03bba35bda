//! `POST /cep`: the gateway entry point.

use crate::errors::ServiceError;
use crate::handlers::request::read_cep_request;
use crate::services::GatewayService;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{Instrument, Span, field, info, info_span};

pub async fn handle_cep(
    req: HttpRequest,
    payload: web::Payload,
    gateway: web::Data<GatewayService>,
) -> Result<HttpResponse, ServiceError> {
    let span = info_span!(
        "service-a.handleCEPRequest",
        method = %req.method(),
        path = %req.path(),
        cep = field::Empty
    );

    async move {
        let request = read_cep_request(payload).await?;
        Span::current().record("cep", request.cep.as_str());
        info!(cep = %request.cep, "Received CEP request");

        let report = gateway.handle(&request.cep).await?;
        Ok(HttpResponse::Ok().json(report))
    }
    .instrument(span)
    .await
}
