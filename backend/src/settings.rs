//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_API_*` environment variables and config
//! files. Optional fields fall back to defaults in their accessors.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime settings for the user API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_API")]
pub struct ServiceSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Leave the store unseeded at startup.
    #[ortho_config(default = false)]
    pub skip_seed_users: bool,
}

impl ServiceSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the bind address from host and port.
    ///
    /// # Errors
    /// Returns [`std::net::AddrParseError`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host(), self.port()).parse()
    }

    /// Return the database URL with surrounding whitespace removed, treating
    /// an empty value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the pool size, falling back to 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Whether the default users should be seeded. Seeding runs unless
    /// `skip_seed_users` is set.
    pub fn seed_users(&self) -> bool {
        !self.skip_seed_users
    }
}
