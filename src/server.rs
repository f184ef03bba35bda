//! Server bootstrap for each deployment.
//!
//! Builds the outbound clients and services from [`AppConfig`], then runs an
//! actix `HttpServer` on `BIND_ADDRESS:PORT` until it is stopped.

use crate::config::AppConfig;
use crate::handlers::{create_gateway_app, create_resolver_app, create_standalone_app};
use crate::services::{
    AppMetrics, GatewayService, InstrumentedClient, TemperatureResolver, ViaCepClient,
    WeatherApiClient,
};
use actix_web::{HttpServer, web};
use std::io;
use std::sync::Arc;
use tracing::{info, warn};

/// Resolver wired to ViaCEP and WeatherAPI
pub fn build_temperature_resolver(
    config: &AppConfig,
    metrics: &AppMetrics,
) -> io::Result<TemperatureResolver> {
    if !config.has_weather_api_key() {
        warn!("WEATHER_API_KEY is not set; weather lookups will fail");
    }

    let geocoding = InstrumentedClient::new(
        "viacep",
        config.geocoding_client.clone(),
        Some(metrics.clone()),
    )
    .map_err(io::Error::other)?;
    let weather = InstrumentedClient::new(
        "weatherapi",
        config.weather_client.clone(),
        Some(metrics.clone()),
    )
    .map_err(io::Error::other)?;

    Ok(TemperatureResolver::new(
        Arc::new(ViaCepClient::new(geocoding, config.geocoding_base_url.clone())),
        Arc::new(WeatherApiClient::new(
            weather,
            config.weather_api_key.clone(),
            config.weather_api_base_url.clone(),
        )),
    ))
}

pub async fn run_gateway(config: AppConfig) -> io::Result<()> {
    let metrics = AppMetrics::new().map_err(io::Error::other)?;
    let client = InstrumentedClient::new(
        "service-b",
        config.service_b_client.clone(),
        Some(metrics.clone()),
    )
    .map_err(io::Error::other)?;

    let gateway = web::Data::new(GatewayService::new(client, config.service_b_url.clone()));
    let metrics = web::Data::new(metrics);
    let app_config = web::Data::new(config.clone());

    info!(
        port = config.port,
        service_b_url = %config.service_b_url,
        "Service A starting"
    );

    HttpServer::new(move || {
        create_gateway_app(app_config.clone(), gateway.clone(), metrics.clone())
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}

pub async fn run_resolver(config: AppConfig) -> io::Result<()> {
    let metrics = AppMetrics::new().map_err(io::Error::other)?;
    let resolver = web::Data::new(build_temperature_resolver(&config, &metrics)?);
    let metrics = web::Data::new(metrics);
    let app_config = web::Data::new(config.clone());

    info!(
        port = config.port,
        weather_api_configured = config.has_weather_api_key(),
        "Service B starting"
    );

    HttpServer::new(move || {
        create_resolver_app(app_config.clone(), resolver.clone(), metrics.clone())
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}

pub async fn run_standalone(config: AppConfig) -> io::Result<()> {
    let metrics = AppMetrics::new().map_err(io::Error::other)?;
    let resolver = web::Data::new(build_temperature_resolver(&config, &metrics)?);
    let metrics = web::Data::new(metrics);
    let app_config = web::Data::new(config.clone());

    if config.dev_mode {
        warn!("DEV_MODE enabled; weather failures will be answered with mock data");
    }
    info!(port = config.port, "Weather service starting");

    HttpServer::new(move || {
        create_standalone_app(app_config.clone(), resolver.clone(), metrics.clone())
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
