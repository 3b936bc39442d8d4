//! Portal outbound adapters.
//!
//! Thin reqwest implementations of the `SessionAuthenticator` and
//! `PortalDataSource` ports. The portal speaks JSON; every request after login
//! carries the session token in the `X-CSRF-Token` header.

mod dto;
mod http_authenticator;
mod http_source;
mod transport;

pub use http_authenticator::PortalHttpAuthenticator;
pub use http_source::PortalHttpSource;
pub use transport::PORTAL_TOKEN_HEADER;
