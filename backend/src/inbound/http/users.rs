//! Portal user API handlers.
//!
//! ```text
//! POST /api/login {"account":"student","password":"password"}
//! GET /api/user   X-CSRF-Token: <session token>
//! GET /api/hello
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginValidationError, PortalSession, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::csrf::CsrfToken;
use crate::inbound::http::schemas::{ErrorSchema, PortalSessionSchema, UserRecordSchema};
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
///
/// Missing fields deserialise as empty strings so they fail validation with
/// field-level details rather than a generic parse error.
///
/// Example JSON:
/// `{"account":"student","password":"password"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.account, &value.password)
    }
}

/// Greeting returned by `GET /api/hello`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HelloResponse {
    #[schema(example = "Hello, World!")]
    pub message: &'static str,
}

/// JSON extractor configuration mapping body errors to `400` envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req: &HttpRequest| {
            Error::invalid_request(format!("invalid request body: {err}")).into()
        })
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyAccount => Error::invalid_request("account must not be empty")
            .with_details(json!({ "field": "account", "code": "empty_account" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Log in to the portal and return the opaque session.
///
/// Credentials are validated before the portal is contacted.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = PortalSessionSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Credentials rejected", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<PortalSession>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let session = state.login.login(&credentials).await?;
    info!("portal login succeeded");
    Ok(web::Json(session))
}

/// Aggregate every data category for the session in `X-CSRF-Token`.
#[utoipa::path(
    get,
    path = "/api/user",
    params(
        ("X-CSRF-Token" = String, Header, description = "Portal session token issued at login")
    ),
    responses(
        (status = 200, description = "Aggregated user record", body = UserRecordSchema),
        (status = 401, description = "Missing session token", body = ErrorSchema),
        (status = 500, description = "A portal fetch failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user")]
pub async fn user(
    state: web::Data<HttpState>,
    token: CsrfToken,
) -> ApiResult<web::Json<UserRecord>> {
    let record = state.user_records.fetch_all(token.token()).await?;
    Ok(web::Json(record))
}

/// Static greeting used by deployment smoke checks.
#[utoipa::path(
    get,
    path = "/api/hello",
    responses((status = 200, description = "Greeting", body = HelloResponse)),
    tags = ["users"],
    operation_id = "hello",
    security([])
)]
#[get("/hello")]
pub async fn hello() -> web::Json<HelloResponse> {
    web::Json(HelloResponse {
        message: "Hello, World!",
    })
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("404 Not Found"))
}
