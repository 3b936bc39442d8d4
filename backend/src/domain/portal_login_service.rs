//! Login use-case backed by a [`SessionAuthenticator`].
//!
//! Both rejection and upstream unavailability surface as `401 Unauthorized`
//! carrying the authenticator's message; credentials never reach the error.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LoginService, SessionAuthenticator, SessionAuthenticatorError};
use crate::domain::{Error, LoginCredentials, PortalSession};

/// Domain service implementing [`LoginService`].
pub struct PortalLoginService<A: ?Sized> {
    authenticator: Arc<A>,
}

impl<A: ?Sized> PortalLoginService<A> {
    /// Create a service delegating to `authenticator`.
    pub fn new(authenticator: Arc<A>) -> Self {
        Self { authenticator }
    }
}

fn map_authenticator_error(error: &SessionAuthenticatorError) -> Error {
    let message = match error {
        SessionAuthenticatorError::Rejected { message }
        | SessionAuthenticatorError::Unavailable { message } => message.as_str(),
    };
    Error::unauthorized(message)
}

#[async_trait]
impl<A> LoginService for PortalLoginService<A>
where
    A: SessionAuthenticator + ?Sized,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<PortalSession, Error> {
        self.authenticator
            .login(credentials)
            .await
            .map_err(|err| map_authenticator_error(&err))
    }
}
