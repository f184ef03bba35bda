//! Inbound request metrics.
//!
//! Every response is counted once in `http_requests_total` and timed in
//! `http_request_duration_seconds`, labelled with the route pattern actix
//! matched (`/weather/{cep:.*}`, not `/weather/01001000`).

use crate::{config::AppConfig, services::AppMetrics, utils::route::extract_route_pattern};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    time::{Duration, Instant},
};

/// Wraps an app so each request lands in the registered [`AppMetrics`].
///
/// Nothing is recorded when the app has no `AppMetrics` data or when
/// `METRICS_ENABLED=false`.
pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestMetricsService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestMetricsService { inner: service }))
    }
}

pub struct RequestMetricsService<S> {
    inner: S,
}

impl<S, B> Service<ServiceRequest> for RequestMetricsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().as_str().to_owned();
        let fut = self.inner.call(req);

        Box::pin(async move {
            let res = fut.await?;
            record_response(&res, &method, started.elapsed());
            Ok(res)
        })
    }
}

/// The route pattern is only known once routing has run, so labels are
/// read from the finished response's request.
fn record_response<B>(res: &ServiceResponse<B>, method: &str, elapsed: Duration) {
    let req = res.request();
    let enabled = req
        .app_data::<web::Data<AppConfig>>()
        .is_none_or(|config| config.metrics_enabled);
    if !enabled {
        return;
    }

    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        let route = extract_route_pattern(req);
        metrics.record_request(method, &route, res.status().as_u16(), elapsed);
    }
}
