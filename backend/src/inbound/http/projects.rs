//! Project API handlers.
//!
//! ```text
//! GET /api/projects
//! POST /api/projects {"name":"Demo Website","domain":"demo.datapulse.io"}
//! PUT /api/projects/{id} {"name":"Renamed"}
//! DELETE /api/projects/{id}
//! POST /api/projects/{id}/key
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Project, ProjectEdit, ProjectId, ProjectOverview};
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Project representation returned by create and update.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub api_key: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectDto {
    fn from(project: Project) -> Self {
        Self {
            id: *project.id.as_uuid(),
            name: project.name,
            domain: project.domain,
            api_key: project.api_key.into(),
            created_at: project.created_at,
        }
    }
}

/// Project representation returned by the listing, including the live
/// submission count.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverviewDto {
    #[serde(flatten)]
    pub project: ProjectDto,
    pub submission_count: u64,
}

impl From<ProjectOverview> for ProjectOverviewDto {
    fn from(overview: ProjectOverview) -> Self {
        Self {
            project: overview.project.into(),
            submission_count: overview.submission_count,
        }
    }
}

/// Project creation request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub domain: String,
}

/// Project update request body; omitted fields are left untouched.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub domain: Option<String>,
}

/// Response for API key rotation.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub api_key: String,
}

/// List the caller's projects with submission counts.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Projects", body = [ProjectOverviewDto]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<Vec<ProjectOverviewDto>>> {
    let user = state.identity.authenticate(&token.0).await?;
    let overviews = state.tenants.list_projects(user.id).await?;
    Ok(web::Json(
        overviews.into_iter().map(Into::into).collect(),
    ))
}

/// Create a project.
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectDto),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<CreateProjectRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.identity.authenticate(&token.0).await?;
    let body = payload.into_inner();
    let project = state
        .tenants
        .create_project(user.id, &body.name, &body.domain)
        .await?;
    Ok(HttpResponse::Created().json(ProjectDto::from(project)))
}

/// Update an owned project.
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectDto),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[put("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateProjectRequest>,
) -> ApiResult<web::Json<ProjectDto>> {
    let user = state.identity.authenticate(&token.0).await?;
    let body = payload.into_inner();
    let project = state
        .tenants
        .update_project(
            user.id,
            ProjectId::from_uuid(path.into_inner()),
            ProjectEdit {
                name: body.name,
                domain: body.domain,
            },
        )
        .await?;
    Ok(web::Json(project.into()))
}

/// Delete an owned project and its submissions.
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user = state.identity.authenticate(&token.0).await?;
    state
        .tenants
        .delete_project(user.id, ProjectId::from_uuid(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Rotate the project's API key.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/key",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Key rotated", body = ApiKeyResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "regenerateApiKey"
)]
#[post("/projects/{id}/key")]
pub async fn regenerate_api_key(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ApiKeyResponse>> {
    let user = state.identity.authenticate(&token.0).await?;
    let project = state
        .tenants
        .regenerate_api_key(user.id, ProjectId::from_uuid(path.into_inner()))
        .await?;
    Ok(web::Json(ApiKeyResponse {
        api_key: project.api_key.into(),
    }))
}
