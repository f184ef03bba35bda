//! Service A: validates postal codes and forwards them to the resolver.

use cep_weather::config::AppConfig;
use cep_weather::server;
use cep_weather::telemetry::{TelemetryConfig, init_telemetry};

fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env();

    // Telemetry is set up before the runtime starts; the OTLP exporter blocks
    let telemetry = init_telemetry(&TelemetryConfig::from_app("service-a", &config))
        .map_err(std::io::Error::other)?;

    let result = actix_web::rt::System::new().block_on(server::run_gateway(config));
    telemetry.shutdown();
    result
}
