//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use user_api::domain::ports::UserDirectory;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) directory: Arc<dyn UserDirectory>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Bind to `bind_addr` and serve requests from `directory`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            bind_addr,
            directory,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "read by server bootstrap tests only")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
