//! App factories for the three deployments.
//!
//! Each factory wires the shared middleware stack and observability routes
//! around the deployment's entry point. Servers and integration tests build
//! their apps through these same functions.

use crate::{
    config::AppConfig,
    handlers::{get_metrics, handle_cep, handle_weather, handle_weather_path, health, method_not_allowed},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    services::{AppMetrics, GatewayService, TemperatureResolver},
};
use actix_web::{
    App, Error,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};

/// `/health` (any method) and `GET /metrics`
fn observability_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").to(health)).service(
        web::resource("/metrics")
            .route(web::get().to(get_metrics))
            .default_service(web::to(method_not_allowed)),
    );
}

/// Gateway (`service-a`): `POST /cep`
pub fn create_gateway_app(
    config: web::Data<AppConfig>,
    gateway: web::Data<GatewayService>,
    metrics: web::Data<AppMetrics>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .app_data(config)
        .app_data(gateway)
        .app_data(metrics)
        .configure(observability_routes)
        .service(
            web::resource("/cep")
                .route(web::post().to(handle_cep))
                .default_service(web::to(method_not_allowed)),
        )
}

/// Resolver (`service-b`): `POST /weather`
pub fn create_resolver_app(
    config: web::Data<AppConfig>,
    resolver: web::Data<TemperatureResolver>,
    metrics: web::Data<AppMetrics>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .app_data(config)
        .app_data(resolver)
        .app_data(metrics)
        .configure(observability_routes)
        .service(
            web::resource("/weather")
                .route(web::post().to(handle_weather))
                .default_service(web::to(method_not_allowed)),
        )
}

/// Standalone (`weather-standalone`): `GET /weather/{cep}`
///
/// The path segment is matched greedily so malformed codes (including ones
/// with extra slashes) reach validation and yield 422 rather than 404.
pub fn create_standalone_app(
    config: web::Data<AppConfig>,
    resolver: web::Data<TemperatureResolver>,
    metrics: web::Data<AppMetrics>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .app_data(config)
        .app_data(resolver)
        .app_data(metrics)
        .configure(observability_routes)
        .service(
            web::resource("/weather/{cep:.*}")
                .route(web::get().to(handle_weather_path))
                .default_service(web::to(method_not_allowed)),
        )
}
