//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP adapter and
//! the upstream portal adapters. Keep types immutable and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - LoginCredentials (alias to `auth::LoginCredentials`): validated login input.
//! - PortalSession / SessionToken: what a successful login yields.
//! - UserRecord (alias to `user_record::UserRecord`): aggregated categories.
//! - UserRecordService: concurrent fan-out/fan-in over the data source port.
//! - PortalLoginService: login use-case over the authenticator port.

pub mod auth;
pub mod error;
pub mod portal_data;
pub mod portal_login_service;
pub mod ports;
pub mod session;
pub mod trace_id;
pub mod user_record;
pub mod user_record_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::portal_data::{
    Attendance, Category, CategoryPayload, Courses, Marks, Timetable, UserProfile,
};
pub use self::portal_login_service::PortalLoginService;
pub use self::session::{PortalSession, SessionToken, SessionTokenValidationError};
pub use self::trace_id::TraceId;
pub use self::user_record::{UserRecord, UserRecordBuildError, UserRecordBuilder};
pub use self::user_record_service::{AggregationError, AggregationPolicy, UserRecordService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use portal_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Missing X-CSRF-Token header"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
