//! Driven port exchanging portal credentials for a session token.
//!
//! Callers must validate credentials first; implementations assume a
//! non-empty account and password.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::define_port_error;
use crate::domain::{LoginCredentials, PortalSession, SessionToken};

define_port_error! {
    /// Errors surfaced while logging in to the portal.
    pub enum SessionAuthenticatorError {
        /// The portal refused the credentials.
        Rejected { message: String } => "authentication rejected: {message}",
        /// The portal could not be reached or answered unexpectedly.
        Unavailable { message: String } => "portal unavailable: {message}",
    }
}

/// Port for the external login capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<PortalSession, SessionAuthenticatorError>;
}

/// In-memory authenticator used when no portal is configured.
///
/// Accepts `student` / `password` and issues a fixed token.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionAuthenticator;

impl FixtureSessionAuthenticator {
    /// Account accepted by the fixture.
    pub const ACCOUNT: &'static str = "student";
    /// Password accepted by the fixture.
    pub const PASSWORD: &'static str = "password";
    /// Token issued on success.
    pub const TOKEN: &'static str = "fixture-session-token";
}

#[async_trait]
impl SessionAuthenticator for FixtureSessionAuthenticator {
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<PortalSession, SessionAuthenticatorError> {
        if credentials.account() != Self::ACCOUNT || credentials.password() != Self::PASSWORD {
            return Err(SessionAuthenticatorError::rejected("invalid credentials"));
        }
        let token = SessionToken::new(Self::TOKEN)
            .map_err(|err| SessionAuthenticatorError::unavailable(err.to_string()))?;
        let mut metadata = Map::new();
        metadata.insert("account".to_owned(), Value::from(credentials.account()));
        Ok(PortalSession::new(token).with_metadata(metadata))
    }
}
