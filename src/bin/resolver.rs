//! Service B: resolves postal codes to the current temperature.

use cep_weather::config::{AppConfig, DEFAULT_RESOLVER_PORT};
use cep_weather::server;
use cep_weather::telemetry::{TelemetryConfig, init_telemetry};

fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env_with_port(DEFAULT_RESOLVER_PORT);

    let telemetry = init_telemetry(&TelemetryConfig::from_app("service-b", &config))
        .map_err(std::io::Error::other)?;

    let result = actix_web::rt::System::new().block_on(server::run_resolver(config));
    telemetry.shutdown();
    result
}
