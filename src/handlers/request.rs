//! Request-body decoding shared by the `POST` handlers.

use crate::errors::ServiceError;
use crate::models::CepRequest;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::warn;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Read and decode a [`CepRequest`].
///
/// An unreadable or oversized body is [`ServiceError::InvalidBody`]; bytes
/// that do not decode as the request shape are [`ServiceError::InvalidJson`].
pub async fn read_cep_request(payload: web::Payload) -> Result<CepRequest, ServiceError> {
    let bytes = match payload.to_bytes_limited(MAX_BODY_BYTES).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            warn!(error = %e, "Error reading request body");
            return Err(ServiceError::InvalidBody(e.to_string()));
        }
        Err(e) => {
            warn!(error = %e, limit = MAX_BODY_BYTES, "Request body too large");
            return Err(ServiceError::InvalidBody(e.to_string()));
        }
    };

    serde_json::from_slice::<CepRequest>(&bytes).map_err(|e| {
        warn!(error = %e, "Invalid JSON format");
        ServiceError::InvalidJson(e.to_string())
    })
}

/// Fallback for a known path hit with the wrong method
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    warn!(method = %req.method(), path = %req.path(), "Method not allowed");
    Err(ServiceError::MethodNotAllowed)
}
