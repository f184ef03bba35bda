//! Single-service deployment: `GET /weather/{cep}`.

use cep_weather::config::AppConfig;
use cep_weather::server;
use cep_weather::telemetry::{TelemetryConfig, init_telemetry};

fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env();

    let telemetry = init_telemetry(&TelemetryConfig::from_app("weather-standalone", &config))
        .map_err(std::io::Error::other)?;

    let result = actix_web::rt::System::new().block_on(server::run_standalone(config));
    telemetry.shutdown();
    result
}
