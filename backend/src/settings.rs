//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `PORTAL_*` environment variables, CLI flags, or a config
//! file. Everything is optional; accessors supply the defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind host and port do not form a socket address.
    #[error("invalid bind address {address}: {message}")]
    BindAddress { address: String, message: String },
    /// The upstream base URL could not be parsed.
    #[error("invalid portal base URL {url}: {message}")]
    PortalBaseUrl { url: String, message: String },
    /// Neither an upstream nor fixture mode was configured.
    #[error("PORTAL_BASE_URL is required unless PORTAL_DEV_FIXTURES=true")]
    MissingUpstream,
}

/// Where the portal adapters point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamMode {
    /// Talk to the portal at this base URL.
    Portal(Url),
    /// Serve canned fixture data for local development.
    Fixtures,
}

/// Configuration values for the HTTP server and its portal adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Base URL of the upstream portal API.
    pub base_url: Option<String>,
    /// Timeout for every upstream HTTP request, in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Optional bound on each category fetch during aggregation, in milliseconds.
    pub fetch_timeout_ms: Option<u64>,
    /// Serve fixture data when no portal base URL is configured.
    #[ortho_config(default = false)]
    pub dev_fixtures: bool,
}

impl ServerSettings {
    /// Socket address to bind, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddress`] when host and port do not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let address = format!("{host}:{}", self.port.unwrap_or(DEFAULT_PORT));
        address
            .parse()
            .map_err(|error: std::net::AddrParseError| SettingsError::BindAddress {
                message: error.to_string(),
                address,
            })
    }

    /// Upstream request timeout, falling back to ten seconds.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    /// Per-fetch aggregation bound; unset or zero means unbounded.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Decide whether to call the portal or serve fixtures.
    ///
    /// A configured base URL always wins over `dev_fixtures`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable URL, or when neither mode is set.
    pub fn upstream(&self) -> Result<UpstreamMode, SettingsError> {
        match self.base_url.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Url::parse(raw)
                .map(UpstreamMode::Portal)
                .map_err(|error| SettingsError::PortalBaseUrl {
                    url: raw.to_owned(),
                    message: error.to_string(),
                }),
            _ if self.dev_fixtures => Ok(UpstreamMode::Fixtures),
            _ => Err(SettingsError::MissingUpstream),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "PORTAL_HOST",
        "PORTAL_PORT",
        "PORTAL_BASE_URL",
        "PORTAL_REQUEST_TIMEOUT_MS",
        "PORTAL_FETCH_TIMEOUT_MS",
        "PORTAL_DEV_FIXTURES",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> ServerSettings {
        let _guard = lock_env(VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        ServerSettings::load_from_iter([OsString::from("portal-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let settings = load_with(&[]);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.fetch_timeout(), None);
        assert_eq!(settings.upstream(), Err(SettingsError::MissingUpstream));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("PORTAL_HOST", "127.0.0.1"),
            ("PORTAL_PORT", "9090"),
            ("PORTAL_BASE_URL", "https://portal.example/api"),
            ("PORTAL_REQUEST_TIMEOUT_MS", "2500"),
            ("PORTAL_FETCH_TIMEOUT_MS", "1500"),
        ]);
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.request_timeout(), Duration::from_millis(2500));
        assert_eq!(settings.fetch_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(
            settings.upstream(),
            Ok(UpstreamMode::Portal(
                Url::parse("https://portal.example/api").expect("literal")
            ))
        );
    }

    #[rstest]
    fn dev_fixtures_apply_without_a_base_url() {
        let settings = load_with(&[("PORTAL_DEV_FIXTURES", "true")]);
        assert_eq!(settings.upstream(), Ok(UpstreamMode::Fixtures));
    }

    #[rstest]
    #[case("not a url")]
    #[case("/relative/path")]
    fn invalid_base_urls_are_reported(#[case] raw: &str) {
        let settings = load_with(&[("PORTAL_BASE_URL", raw)]);
        assert!(matches!(
            settings.upstream(),
            Err(SettingsError::PortalBaseUrl { .. })
        ));
    }

    #[rstest]
    fn zero_fetch_timeout_means_unbounded() {
        let settings = load_with(&[("PORTAL_FETCH_TIMEOUT_MS", "0")]);
        assert_eq!(settings.fetch_timeout(), None);
    }
}
