//! User API entry-point: loads settings, opens the store and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_repository, build_user_directory, create_server};
use user_api::inbound::http::health::HealthState;
use user_api::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load configuration")?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("USER_API_HOST must be an IP address")?;

    let repository = build_repository(&settings).await?;
    let directory = build_user_directory(&settings, repository).await?;

    let config = ServerConfig::new(bind_addr, directory);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::default_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "user API listening");
    server.await?;
    Ok(())
}
