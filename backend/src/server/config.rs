//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use portal_backend::domain::AggregationPolicy;
use portal_backend::settings::{ServerSettings, SettingsError, UpstreamMode};

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstream: UpstreamMode,
    pub(crate) request_timeout: Duration,
    pub(crate) policy: AggregationPolicy,
}

impl ServerConfig {
    /// Resolve loaded settings into a server configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the bind address or upstream is invalid.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            upstream: settings.upstream()?,
            request_timeout: settings.request_timeout(),
            policy: AggregationPolicy::default().with_fetch_timeout(settings.fetch_timeout()),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the upstream the portal adapters target.
    #[must_use]
    pub fn upstream(&self) -> &UpstreamMode {
        &self.upstream
    }
}
