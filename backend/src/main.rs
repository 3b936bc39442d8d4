//! Backend entry-point: loads settings, initialises logging, and serves the
//! portal login and aggregation endpoints.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portal_backend::inbound::http::health::HealthState;
use portal_backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::from_settings(&settings)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!(bind_addr = %config.bind_addr(), "starting portal backend");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
