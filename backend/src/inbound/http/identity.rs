//! Identity API handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@x.io","password":"pw123456"}
//! POST /api/auth/login {"email":"ada@x.io","password":"pw123456"}
//! PUT /api/auth/profile {"name":"Ada Lovelace"}
//! PUT /api/auth/password {"currentPassword":"pw123456","newPassword":"pw654321"}
//! DELETE /api/auth/account
//! ```

use actix_web::{delete, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthenticatedSession, Error, UserProfile};
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Public user representation.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[schema(value_type = String, format = Uuid)]
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: *profile.id.as_uuid(),
            name: profile.name,
            email: profile.email.into(),
            created_at: profile.created_at,
        }
    }
}

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A fresh session: the public profile and its bearer token.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserDto,
    pub token: String,
}

impl From<AuthenticatedSession> for SessionResponse {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            user: session.profile.into(),
            token: session.token.to_string(),
        }
    }
}

/// Profile update request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub name: String,
}

/// Wrapper mirroring the register/login envelope for profile reads.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserDto,
}

/// Password change request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Generic success acknowledgement.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AckResponse {
    pub success: bool,
}

/// Create an account and open a session for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid request or duplicate email", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let session = state
        .identity
        .register(&body.name, &body.email, &body.password)
        .await?;
    Ok(HttpResponse::Created().json(SessionResponse::from(session)))
}

/// Exchange credentials for a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let session = state.identity.login(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

/// Update the caller's display name.
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["auth"],
    operation_id = "updateProfile"
)]
#[put("/auth/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.identity.authenticate(&token.0).await?;
    let profile = state
        .identity
        .update_name(user.id, &payload.name)
        .await?;
    Ok(HttpResponse::Ok().json(ProfileResponse {
        user: profile.into(),
    }))
}

/// Change the caller's password.
#[utoipa::path(
    put,
    path = "/api/auth/password",
    request_body = PasswordChangeRequest,
    responses(
        (status = 200, description = "Password changed", body = AckResponse),
        (status = 400, description = "Wrong current password", body = Error),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["auth"],
    operation_id = "changePassword"
)]
#[put("/auth/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<PasswordChangeRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.identity.authenticate(&token.0).await?;
    state
        .identity
        .change_password(user.id, &payload.current_password, &payload.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(AckResponse { success: true }))
}

/// Delete the caller's account, projects, and submissions.
#[utoipa::path(
    delete,
    path = "/api/auth/account",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["auth"],
    operation_id = "deleteAccount"
)]
#[delete("/auth/account")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<HttpResponse> {
    let user = state.identity.authenticate(&token.0).await?;
    // Tenant data goes first so the account's API keys stop capturing even
    // if the final user-row delete fails.
    state.tenants.purge_owner(user.id).await?;
    state.identity.delete_account(user.id, &token.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
