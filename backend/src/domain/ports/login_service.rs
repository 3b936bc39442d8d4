//! Driving port for portal login.
//!
//! Inbound adapters call it with validated credentials and get back either a
//! session or a domain [`Error`] ready for the transport envelope.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, PortalSession};

/// Domain use-case port for logging in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate credentials against the portal.
    async fn login(&self, credentials: &LoginCredentials) -> Result<PortalSession, Error>;
}
