//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: login, aggregated user record, greeting, and health probes
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`PortalSessionSchema`], [`UserRecordSchema`]) that provide OpenAPI
//!   definitions without coupling domain types to the utoipa framework
//! - **Security**: the `X-CSRF-Token` session header
//!
//! The generated specification is served by Swagger UI in debug builds.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, PortalSessionSchema, UserRecordSchema,
};
use crate::inbound::http::users::{HelloResponse, LoginRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "CsrfToken",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-CSRF-Token",
                "Session token returned by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Portal aggregation API",
        description = "Portal login and concurrent aggregation of per-user data categories."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("CsrfToken" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::user,
        crate::inbound::http::users::hello,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PortalSessionSchema,
        UserRecordSchema,
        LoginRequest,
        HelloResponse
    )),
    tags(
        (name = "users", description = "Portal login and user data"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const USER_RECORD_SCHEMA_NAME: &str = "crate.domain.UserRecord";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_matches_the_envelope() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "error");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn user_record_schema_has_reg_number() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get(USER_RECORD_SCHEMA_NAME)
            .expect("UserRecord schema");

        assert_object_schema_has_field(schema, "regNumber");
        assert_object_schema_has_field(schema, "timetable");
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/login",
            "/api/user",
            "/api/hello",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
