//! Resolver service integration tests.
//!
//! ViaCEP and WeatherAPI are stubbed with `httpmock`; the app is built
//! through the same factory the `resolver` binary uses.

use actix_web::{App, http::StatusCode, test, web};
use cep_weather::server::build_temperature_resolver;
use cep_weather::{AppConfig, AppMetrics, HttpClientConfig, create_resolver_app};
use httpmock::prelude::*;
use serde_json::{Value, json};
use std::time::Duration;

fn vitoria_location() -> Value {
    json!({
        "cep": "29902-555",
        "logradouro": "Rua Alberto Calixto",
        "complemento": "",
        "bairro": "Centro",
        "localidade": "Vitória",
        "uf": "ES",
        "ibge": "3205309",
        "gia": "",
        "ddd": "27",
        "siafi": "5705"
    })
}

fn vitoria_weather() -> Value {
    json!({
        "location": { "name": "Vitoria", "region": "Espirito Santo", "country": "Brazil" },
        "current": { "temp_c": 25.5, "temp_f": 77.9 }
    })
}

fn test_config(geocoding: &MockServer, weather: &MockServer, api_key: &str) -> AppConfig {
    AppConfig {
        geocoding_base_url: geocoding.base_url(),
        weather_api_base_url: weather.base_url(),
        weather_api_key: api_key.to_string(),
        ..AppConfig::default()
    }
}

fn resolver_app(
    config: AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let metrics = AppMetrics::new().unwrap();
    let resolver = build_temperature_resolver(&config, &metrics).unwrap();
    create_resolver_app(
        web::Data::new(config),
        web::Data::new(resolver),
        web::Data::new(metrics),
    )
}

fn post_cep(cep: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/weather")
        .set_json(json!({ "cep": cep }))
}

/// Full pipeline: CEP → Vitória → 25.5 °C
#[actix_web::test]
async fn test_resolves_temperature_for_valid_cep() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;

    let location_mock = geocoding
        .mock_async(|when, then| {
            when.method(GET).path("/ws/29902555/json/");
            then.status(200).json_body(vitoria_location());
        })
        .await;
    let weather_mock = weather
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/current.json")
                .query_param("key", "test-key")
                .query_param("q", "Vitória, Brazil")
                .query_param("aqi", "no");
            then.status(200).json_body(vitoria_weather());
        })
        .await;

    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, "test-key"))).await;
    let resp = test::call_service(&app, post_cep("29902555").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "city": "Vitória", "temp_C": 25.5, "temp_F": 77.9, "temp_K": 298.65 })
    );

    assert_eq!(location_mock.calls_async().await, 1);
    assert_eq!(weather_mock.calls_async().await, 1);
}

/// Identical upstream answers produce identical reports
#[actix_web::test]
async fn test_repeated_requests_are_identical() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    geocoding
        .mock_async(|when, then| {
            when.method(GET).path("/ws/29902555/json/");
            then.status(200).json_body(vitoria_location());
        })
        .await;
    weather
        .mock_async(|when, then| {
            when.method(GET).path("/v1/current.json");
            then.status(200).json_body(vitoria_weather());
        })
        .await;

    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, "test-key"))).await;
    let first = test::call_and_read_body(&app, post_cep("29902555").to_request()).await;
    let second = test::call_and_read_body(&app, post_cep("29902555").to_request()).await;
    assert_eq!(first, second);
}

/// Malformed codes are rejected before any outbound call
#[actix_web::test]
async fn test_invalid_cep_makes_no_upstream_calls() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    let location_mock = geocoding
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(vitoria_location());
        })
        .await;

    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, "test-key"))).await;

    for cep in ["12345", "abc12345", "", "29902-555", "299025551"] {
        let resp = test::call_service(&app, post_cep(cep).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "cep {cep:?}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "invalid zipcode" }));
    }

    assert_eq!(location_mock.calls_async().await, 0);
}

#[actix_web::test]
async fn test_not_found_flag_returns_404() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    geocoding
        .mock_async(|when, then| {
            when.method(GET).path("/ws/99999999/json/");
            then.status(200).json_body(json!({ "erro": "true" }));
        })
        .await;
    let weather_mock = weather
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(vitoria_weather());
        })
        .await;

    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, "test-key"))).await;
    let resp = test::call_service(&app, post_cep("99999999").to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "can not find zipcode" }));
    assert_eq!(weather_mock.calls_async().await, 0);
}

/// A failing geocoder is reported the same way as an unknown code
#[actix_web::test]
async fn test_geocoding_error_returns_404() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    geocoding
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500).body("internal error");
        })
        .await;

    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, "test-key"))).await;
    let resp = test::call_service(&app, post_cep("29902555").to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_weather_error_returns_500() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    geocoding
        .mock_async(|when, then| {
            when.method(GET).path("/ws/29902555/json/");
            then.status(200).json_body(vitoria_location());
        })
        .await;
    weather
        .mock_async(|when, then| {
            when.method(GET).path("/v1/current.json");
            then.status(403)
                .json_body(json!({ "error": { "code": 2008, "message": "API key disabled" } }));
        })
        .await;

    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, "test-key"))).await;
    let resp = test::call_service(&app, post_cep("29902555").to_request()).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "error getting weather information" }));
}

/// Without an API key the weather API is never contacted
#[actix_web::test]
async fn test_missing_api_key_returns_500() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    geocoding
        .mock_async(|when, then| {
            when.method(GET).path("/ws/29902555/json/");
            then.status(200).json_body(vitoria_location());
        })
        .await;
    let weather_mock = weather
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(vitoria_weather());
        })
        .await;

    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, ""))).await;
    let resp = test::call_service(&app, post_cep("29902555").to_request()).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "error getting weather information" }));
    assert_eq!(weather_mock.calls_async().await, 0);
}

#[actix_web::test]
async fn test_malformed_body_returns_400() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, "test-key"))).await;

    let req = test::TestRequest::post()
        .uri("/weather")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"cep\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "invalid json format" }));
}

#[actix_web::test]
async fn test_wrong_method_returns_405() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, "test-key"))).await;

    let req = test::TestRequest::get().uri("/weather").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "method not allowed" }));
}

/// Health does not depend on configuration
#[actix_web::test]
async fn test_health_is_ok_without_api_key() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, ""))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "OK");
}

#[actix_web::test]
async fn test_metrics_endpoint_reports_upstreams() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    geocoding
        .mock_async(|when, then| {
            when.method(GET).path("/ws/29902555/json/");
            then.status(200).json_body(vitoria_location());
        })
        .await;
    weather
        .mock_async(|when, then| {
            when.method(GET).path("/v1/current.json");
            then.status(200).json_body(vitoria_weather());
        })
        .await;

    let app = test::init_service(resolver_app(test_config(&geocoding, &weather, "test-key"))).await;
    test::call_service(&app, post_cep("29902555").to_request()).await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains(r#"upstream="viacep""#));
    assert!(text.contains(r#"upstream="weatherapi""#));
    assert!(text.contains(r#"route="/weather""#));
}

/// A geocoder that answers after the client timeout counts as a lookup failure
#[actix_web::test]
async fn test_geocoding_timeout_returns_404() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    geocoding
        .mock_async(|when, then| {
            when.method(GET).path("/ws/29902555/json/");
            then.status(200)
                .json_body(vitoria_location())
                .delay(Duration::from_secs(3));
        })
        .await;
    let weather_mock = weather
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(vitoria_weather());
        })
        .await;

    let config = AppConfig {
        geocoding_client: HttpClientConfig::with_timeout(1),
        ..test_config(&geocoding, &weather, "test-key")
    };
    let app = test::init_service(resolver_app(config)).await;
    let resp = test::call_service(&app, post_cep("29902555").to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "can not find zipcode" }));
    assert_eq!(weather_mock.calls_async().await, 0);
}

#[actix_web::test]
async fn test_weather_timeout_returns_500() {
    let geocoding = MockServer::start_async().await;
    let weather = MockServer::start_async().await;
    geocoding
        .mock_async(|when, then| {
            when.method(GET).path("/ws/29902555/json/");
            then.status(200).json_body(vitoria_location());
        })
        .await;
    weather
        .mock_async(|when, then| {
            when.method(GET).path("/v1/current.json");
            then.status(200)
                .json_body(vitoria_weather())
                .delay(Duration::from_secs(3));
        })
        .await;

    let config = AppConfig {
        weather_client: HttpClientConfig::with_timeout(1),
        ..test_config(&geocoding, &weather, "test-key")
    };
    let app = test::init_service(resolver_app(config)).await;
    let resp = test::call_service(&app, post_cep("29902555").to_request()).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "error getting weather information" }));
}
