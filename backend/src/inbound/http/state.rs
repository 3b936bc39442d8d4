//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, UserRecordQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub user_records: Arc<dyn UserRecordQuery>,
}

impl HttpState {
    /// Construct state from the login and aggregation use-cases.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use portal_backend::domain::ports::{
    ///     FixturePortalDataSource, FixtureSessionAuthenticator,
    /// };
    /// use portal_backend::domain::{PortalLoginService, UserRecordService};
    /// use portal_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(PortalLoginService::new(Arc::new(FixtureSessionAuthenticator))),
    ///     Arc::new(UserRecordService::new(Arc::new(FixturePortalDataSource))),
    /// );
    /// let _ = state.login.clone();
    /// ```
    pub fn new(login: Arc<dyn LoginService>, user_records: Arc<dyn UserRecordQuery>) -> Self {
        Self {
            login,
            user_records,
        }
    }
}
