//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] collects every handler annotated with `#[utoipa::path]` and the
//! schemas they reference. Swagger UI serves it at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, MatchRequestStatus, Role, User};
use crate::inbound::http::auth::{LoginRequest, LoginResponse, SignupRequest};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::match_requests::{
    CreateMatchRequestBody, MatchRequestResponse, OutgoingMatchRequestResponse,
};

/// Adds the session cookie security scheme.
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
                "Encrypted session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the mentor matching API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Mentor match API",
        description = "Accounts, sessions, and the mentee-to-mentor match request lifecycle."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::match_requests::create_match_request,
        crate::inbound::http::match_requests::list_incoming,
        crate::inbound::http::match_requests::list_outgoing,
        crate::inbound::http::match_requests::accept_match_request,
        crate::inbound::http::match_requests::reject_match_request,
        crate::inbound::http::match_requests::cancel_match_request,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Role,
        MatchRequestStatus,
        SignupRequest,
        LoginRequest,
        LoginResponse,
        CreateMatchRequestBody,
        MatchRequestResponse,
        OutgoingMatchRequestResponse,
        ProbeStatus,
    )),
    tags(
        (name = "auth", description = "Signup, login, and logout"),
        (name = "match-requests", description = "Mentee to mentor match requests"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("MatchRequestResponse", &["id", "mentorId", "menteeId", "message", "status"])]
    #[case("OutgoingMatchRequestResponse", &["id", "mentorId", "menteeId", "status"])]
    #[case("User", &["id", "email", "name", "role"])]
    fn schemas_use_camel_case_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = object_fields(name);
        for field in expected {
            assert!(fields.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    #[case("/api/signup")]
    #[case("/api/login")]
    #[case("/api/match-requests")]
    #[case("/api/match-requests/{id}/accept")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
