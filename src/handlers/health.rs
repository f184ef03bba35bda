//! Health check endpoint handler.

use actix_web::HttpResponse;

/// Liveness check. Always 200 `OK`, independent of upstream or configuration state.
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}
