//! Route label extraction for metrics.

use actix_web::HttpRequest;

/// Label used when a request matched no registered resource
pub const UNMATCHED_ROUTE: &str = "/unknown";

/// Matched resource pattern for `req` (e.g. `/weather/{cep:.*}`).
///
/// Using the pattern rather than the raw path keeps label cardinality bounded
/// when the postal code travels in the path.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
