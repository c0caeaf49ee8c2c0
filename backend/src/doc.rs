//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every `/api` handler plus the health probes
//! - **Schemas**: the response envelopes, request bodies, and the domain
//!   aggregates they carry
//! - **Security**: Session cookie authentication scheme
//!
//! The GraphQL admin API describes itself through introspection and is not
//! part of this document. The generated specification is used by Swagger UI
//! (debug builds) and exported via `cargo run --bin openapi-dump`.

use crate::domain::{
    AcademicCredential, ApplicationDetails, ApplicationStatus, Availability, CandidateApplication,
    CandidateProfile, CandidateSummary, CandidateTally, Course, CourseSummary, Error, ErrorCode,
    PreviousRole, Role, SelectionStatistics, SessionType, User,
};
use crate::inbound::http::applications::ApplicationRequest;
use crate::inbound::http::auth::{SignInRequest, SignUpRequest};
use crate::inbound::http::candidates::{CredentialRequest, PreviousRoleRequest, ProfileRequest};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::lecturer::{CommentRequest, RankingRequest, StatusRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

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
                "Session cookie issued by POST /api/auth/signin.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "TeachTeam backend API",
        description = "Tutor and lab-assistant recruitment: accounts, candidate profiles, applications, and lecturer review."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::auth::me,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::candidates::get_profile,
        crate::inbound::http::candidates::update_profile,
        crate::inbound::http::candidates::add_credential,
        crate::inbound::http::candidates::remove_credential,
        crate::inbound::http::candidates::add_previous_role,
        crate::inbound::http::candidates::remove_previous_role,
        crate::inbound::http::applications::apply,
        crate::inbound::http::applications::my_applications,
        crate::inbound::http::lecturer::assigned_courses,
        crate::inbound::http::lecturer::search_applications,
        crate::inbound::http::lecturer::candidate_profile,
        crate::inbound::http::lecturer::set_status,
        crate::inbound::http::lecturer::set_ranking,
        crate::inbound::http::lecturer::set_comment,
        crate::inbound::http::lecturer::statistics,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelope,
        Error,
        ErrorCode,
        User,
        Role,
        Course,
        CourseSummary,
        CandidateSummary,
        CandidateProfile,
        AcademicCredential,
        PreviousRole,
        Availability,
        CandidateApplication,
        ApplicationDetails,
        ApplicationStatus,
        SessionType,
        SelectionStatistics,
        CandidateTally,
        SignUpRequest,
        SignInRequest,
        ProfileRequest,
        CredentialRequest,
        PreviousRoleRequest,
        ApplicationRequest,
        StatusRequest,
        RankingRequest,
        CommentRequest,
    )),
    tags(
        (name = "auth", description = "Sign-up, sign-in, and the session user"),
        (name = "courses", description = "Course catalogue"),
        (name = "candidates", description = "Candidate profile management"),
        (name = "applications", description = "Candidate applications"),
        (name = "lecturer", description = "Application review for assigned courses"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
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

    #[rstest]
    #[case("Error", &["code", "message"])]
    #[case("User", &["id", "firstName", "lastName", "email", "role", "isBlocked"])]
    #[case("SignUpRequest", &["firstName", "lastName", "email", "password", "role"])]
    fn schemas_expose_camel_case_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get(name)
            .unwrap_or_else(|| panic!("{name} schema"));

        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/api/auth/signup")]
    #[case("/api/applications")]
    #[case("/api/lecturer/applications/{id}/ranking")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
