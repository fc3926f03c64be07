//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! endpoint from the inbound layer, the shared schemas, and the session
//! cookie security scheme. Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Notification, NotificationKind, RelationshipSummary, User};
use crate::inbound::http::connections::RespondRequest;
use crate::inbound::http::notifications::ReadAllResponse;
use crate::inbound::http::users::{CurrentUserResponse, LoginRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Buddy Connect API",
        description = "Session-authenticated connection requests and notifications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::connections::send_connection_request,
        crate::inbound::http::connections::respond_to_connection_request,
        crate::inbound::http::notifications::mark_notification_read,
        crate::inbound::http::notifications::mark_all_notifications_read,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        RelationshipSummary,
        Notification,
        NotificationKind,
        LoginRequest,
        CurrentUserResponse,
        RespondRequest,
        ReadAllResponse,
    )),
    tags(
        (name = "users", description = "Login and profile access"),
        (name = "connections", description = "Connection-request lifecycle"),
        (name = "notifications", description = "Notification read state"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

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
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/login",
            "/api/v1/auth/me",
            "/api/v1/users/{id}/connect",
            "/api/v1/users/{id}/connect/respond",
            "/api/v1/notifications/{id}/read",
            "/api/v1/notifications/read-all",
            "/health/live",
            "/health/ready",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path {path} in OpenAPI document"
            );
        }
    }
}
