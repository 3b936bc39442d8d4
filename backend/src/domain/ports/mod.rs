//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod portal_data_source;
mod session_authenticator;
mod user_record_query;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use portal_data_source::MockPortalDataSource;
pub use portal_data_source::{FixturePortalDataSource, PortalDataSource, PortalDataSourceError};
#[cfg(test)]
pub use session_authenticator::MockSessionAuthenticator;
pub use session_authenticator::{
    FixtureSessionAuthenticator, SessionAuthenticator, SessionAuthenticatorError,
};
#[cfg(test)]
pub use user_record_query::MockUserRecordQuery;
pub use user_record_query::UserRecordQuery;
