//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the specification for the REST surface: every
//! handler path, the wire DTOs, and the bearer-token security scheme.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::identity::{
    AckResponse, LoginRequest, PasswordChangeRequest, ProfileResponse, ProfileUpdateRequest,
    RegisterRequest, SessionResponse, UserDto,
};
use crate::inbound::http::projects::{
    ApiKeyResponse, CreateProjectRequest, ProjectDto, ProjectOverviewDto, UpdateProjectRequest,
};
use crate::inbound::http::submissions::SubmissionDto;
use crate::inbound::http::track::{TrackRequest, TrackResponse};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "DataPulse backend API",
        description = "Multi-tenant form analytics: identity, projects, ingestion, and submission queries."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::identity::register,
        crate::inbound::http::identity::login,
        crate::inbound::http::identity::update_profile,
        crate::inbound::http::identity::change_password,
        crate::inbound::http::identity::delete_account,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::projects::regenerate_api_key,
        crate::inbound::http::track::track,
        crate::inbound::http::submissions::list_submissions,
        crate::inbound::http::submissions::get_submission,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserDto,
        RegisterRequest,
        LoginRequest,
        SessionResponse,
        ProfileUpdateRequest,
        ProfileResponse,
        PasswordChangeRequest,
        AckResponse,
        ProjectDto,
        ProjectOverviewDto,
        CreateProjectRequest,
        UpdateProjectRequest,
        ApiKeyResponse,
        TrackRequest,
        TrackResponse,
        SubmissionDto,
        HealthResponse,
    )),
    tags(
        (name = "auth", description = "Accounts and sessions"),
        (name = "projects", description = "Tenant projects and API keys"),
        (name = "track", description = "Public submission ingestion"),
        (name = "submissions", description = "Tenant-scoped submission queries"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn document_builds_and_lists_every_path() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/health",
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/profile",
            "/api/auth/password",
            "/api/auth/account",
            "/api/projects",
            "/api/projects/{id}",
            "/api/projects/{id}/key",
            "/api/track",
            "/api/submissions",
            "/api/submissions/{id}",
        ] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
