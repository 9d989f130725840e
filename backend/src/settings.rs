//! Server settings loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `STOREFRONT_*` environment variables
//! and an optional config file.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration for the storefront server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct StorefrontSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. When absent the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Connections the pool keeps open while idle.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection before failing the request.
    pub db_connection_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl StorefrontSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Pool settings for the configured database, if any. Unset knobs keep
    /// the [`PoolConfig`] defaults.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let mut config = PoolConfig::new(url);
        if let Some(max) = self.db_max_connections {
            config = config.with_max_size(max);
        }
        if let Some(idle) = self.db_min_idle {
            config = config.with_min_idle(Some(idle));
        }
        if let Some(secs) = self.db_connection_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }
}
