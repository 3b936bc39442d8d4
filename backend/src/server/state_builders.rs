//! Builders wiring portal adapters into the HTTP state.

use std::sync::Arc;

use tracing::{info, warn};

use portal_backend::domain::ports::{
    FixturePortalDataSource, FixtureSessionAuthenticator, LoginService, PortalDataSource,
    SessionAuthenticator, UserRecordQuery,
};
use portal_backend::domain::{PortalLoginService, UserRecordService};
use portal_backend::inbound::http::state::HttpState;
use portal_backend::outbound::portal::{PortalHttpAuthenticator, PortalHttpSource};
use portal_backend::settings::UpstreamMode;

use super::ServerConfig;

/// Build the driven adapters for the configured upstream.
///
/// Uses the reqwest adapters when a portal base URL is configured, otherwise
/// falls back to the fixtures for local development.
///
/// # Errors
/// Returns [`std::io::Error`] if a reqwest client cannot be constructed.
fn build_adapters(
    config: &ServerConfig,
) -> std::io::Result<(Arc<dyn SessionAuthenticator>, Arc<dyn PortalDataSource>)> {
    match config.upstream() {
        UpstreamMode::Portal(base) => {
            info!(base_url = %base, "using portal upstream");
            let authenticator =
                PortalHttpAuthenticator::new(base.clone(), config.request_timeout)
                    .map_err(|e| std::io::Error::other(format!("portal client: {e}")))?;
            let source = PortalHttpSource::new(base.clone(), config.request_timeout)
                .map_err(|e| std::io::Error::other(format!("portal client: {e}")))?;
            Ok((Arc::new(authenticator), Arc::new(source)))
        }
        UpstreamMode::Fixtures => {
            warn!("serving fixture portal data (dev only)");
            Ok((
                Arc::new(FixtureSessionAuthenticator),
                Arc::new(FixturePortalDataSource),
            ))
        }
    }
}

/// Assemble the HTTP state from the configured adapters.
///
/// # Errors
/// Propagates adapter construction failures.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let (authenticator, source) = build_adapters(config)?;
    let login: Arc<dyn LoginService> = Arc::new(PortalLoginService::new(authenticator));
    let user_records: Arc<dyn UserRecordQuery> =
        Arc::new(UserRecordService::with_policy(source, config.policy));
    Ok(HttpState::new(login, user_records))
}
