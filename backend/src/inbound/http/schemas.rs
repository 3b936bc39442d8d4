//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Credentials were rejected or the session token is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// No route matched the request.
    #[schema(rename = "not_found")]
    NotFound,
    /// A portal fetch failed.
    #[schema(rename = "upstream_failure")]
    UpstreamFailure,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Every failure is a single envelope with a human-readable `error` message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "failed to fetch marks: portal transport failed: upstream 503")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "upstream_failure")]
    code: ErrorCodeSchema,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field.
    #[schema(value_type = Option<Object>)]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::PortalSession`].
///
/// Authenticator-specific metadata appears alongside `token`.
#[derive(ToSchema)]
#[schema(as = crate::domain::PortalSession)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PortalSessionSchema {
    /// Session token to replay in the `X-CSRF-Token` header.
    #[schema(example = "fixture-session-token")]
    token: String,
}

/// OpenAPI schema for [`crate::domain::UserRecord`].
///
/// Category payloads are passed through exactly as the portal shaped them.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserRecord, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserRecordSchema {
    /// Profile payload.
    #[schema(value_type = Object)]
    profile: serde_json::Value,
    /// Attendance payload.
    #[schema(value_type = Object)]
    attendance: serde_json::Value,
    /// Marks payload.
    #[schema(value_type = Object)]
    marks: serde_json::Value,
    /// Courses payload.
    #[schema(value_type = Object)]
    courses: serde_json::Value,
    /// Timetable payload.
    #[schema(value_type = Object)]
    timetable: serde_json::Value,
    /// Registration number, present only when the profile exposes one.
    #[schema(example = "21CS045")]
    reg_number: Option<String>,
}
