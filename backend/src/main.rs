//! Storefront entry-point: loads settings, prepares the store and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use storefront::inbound::http::health::HealthState;
use storefront::outbound::persistence::{DbPool, run_pending_migrations};
use storefront::settings::StorefrontSettings;

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

    let settings =
        StorefrontSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid STOREFRONT_BIND_ADDR")?;

    let mut config = ServerConfig::new(bind_addr);
    match settings.pool_config() {
        Some(pool_config) => {
            if settings.run_migrations {
                run_pending_migrations(pool_config.database_url())
                    .await
                    .wrap_err("failed to migrate database")?;
            }
            info!(
                max_size = pool_config.max_size(),
                min_idle = ?pool_config.min_idle(),
                timeout_secs = pool_config.connection_timeout().as_secs(),
                "building database pool"
            );
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; serving from the in-memory store"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    info!(%bind_addr, "storefront listening");
    server.await.wrap_err("server terminated with an error")
}
