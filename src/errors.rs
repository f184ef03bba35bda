//! Error taxonomy shared by all services.
//!
//! [`UpstreamError`] describes what went wrong talking to a collaborator.
//! [`ServiceError`] is what a handler returns; it owns the mapping to the
//! outward status code and `{"message": ...}` envelope.

use crate::models::ErrorResponse;
use crate::services::http_client::OutboundError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

pub const MSG_INVALID_ZIPCODE: &str = "invalid zipcode";
pub const MSG_NOT_FOUND: &str = "can not find zipcode";
pub const MSG_WEATHER_FAILURE: &str = "error getting weather information";
pub const MSG_PROCESSING_FAILURE: &str = "error processing request";
pub const MSG_INVALID_BODY: &str = "invalid request body";
pub const MSG_INVALID_JSON: &str = "invalid json format";
pub const MSG_METHOD_NOT_ALLOWED: &str = "method not allowed";

/// Failure reported by a geocoding or weather port
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Outbound(#[from] OutboundError),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    #[error("WEATHER_API_KEY environment variable not set")]
    MissingApiKey,
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Postal code is not 8 ASCII digits
    #[error("invalid zipcode")]
    InvalidInput,

    /// Geocoding failed. True not-found and transport errors share this variant.
    #[error("can not find zipcode: {0}")]
    NotFound(String),

    /// Weather lookup failed
    #[error("weather lookup failed: {0}")]
    UpstreamFailure(String),

    /// The resolver hop answered with an unexpected status or was unreachable
    #[error("resolver call failed: {0}")]
    ResolverFailure(String),

    /// A required setting (the weather API key) is missing
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("invalid json format: {0}")]
    InvalidJson(String),

    #[error("method not allowed")]
    MethodNotAllowed,
}

impl ServiceError {
    /// Message placed in the error envelope. Upstream detail is never exposed.
    pub fn user_message(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput => MSG_INVALID_ZIPCODE,
            ServiceError::NotFound(_) => MSG_NOT_FOUND,
            ServiceError::UpstreamFailure(_) | ServiceError::Configuration(_) => {
                MSG_WEATHER_FAILURE
            }
            ServiceError::ResolverFailure(_) => MSG_PROCESSING_FAILURE,
            ServiceError::InvalidBody(_) => MSG_INVALID_BODY,
            ServiceError::InvalidJson(_) => MSG_INVALID_JSON,
            ServiceError::MethodNotAllowed => MSG_METHOD_NOT_ALLOWED,
        }
    }

    /// True when the failure happened in the weather step, which is the only
    /// step the development-mode fallback may mask
    pub fn is_weather_failure(&self) -> bool {
        matches!(
            self,
            ServiceError::UpstreamFailure(_) | ServiceError::Configuration(_)
        )
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::UpstreamFailure(_)
            | ServiceError::ResolverFailure(_)
            | ServiceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::InvalidBody(_) | ServiceError::InvalidJson(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.user_message()))
    }
}
