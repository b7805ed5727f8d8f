//! Submission query handlers.
//!
//! ```text
//! GET /api/submissions
//! GET /api/submissions/{id}
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Error, Submission, SubmissionId};
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Captured submission as returned to the dashboard.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDto {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    #[schema(value_type = String, format = Uuid)]
    pub project_id: Uuid,
    pub form_id: String,
    #[schema(value_type = Object)]
    pub data: Value,
    pub page_url: String,
    pub user_agent: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

impl From<Submission> for SubmissionDto {
    fn from(submission: Submission) -> Self {
        Self {
            id: *submission.id.as_uuid(),
            project_id: *submission.project_id.as_uuid(),
            form_id: submission.form_id,
            data: submission.data,
            page_url: submission.page_url,
            user_agent: submission.user_agent,
            timestamp: submission.timestamp,
        }
    }
}

/// List every submission across the caller's projects, newest first.
#[utoipa::path(
    get,
    path = "/api/submissions",
    responses(
        (status = 200, description = "Submissions, newest first", body = [SubmissionDto]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["submissions"],
    operation_id = "listSubmissions"
)]
#[get("/submissions")]
pub async fn list_submissions(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<Vec<SubmissionDto>>> {
    let user = state.identity.authenticate(&token.0).await?;
    let submissions = state.submissions.list(user.id).await?;
    Ok(web::Json(
        submissions.into_iter().map(Into::into).collect(),
    ))
}

/// Fetch one submission, if it belongs to the caller.
#[utoipa::path(
    get,
    path = "/api/submissions/{id}",
    params(("id" = String, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Submission", body = SubmissionDto),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["submissions"],
    operation_id = "getSubmission"
)]
#[get("/submissions/{id}")]
pub async fn get_submission(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<SubmissionDto>> {
    let user = state.identity.authenticate(&token.0).await?;
    let submission = state
        .submissions
        .detail(user.id, SubmissionId::from_uuid(path.into_inner()))
        .await?;
    Ok(web::Json(submission.into()))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use crate::inbound::http::test_utils::{authed, create_project, register, spawn_app};
    use actix_web::test;
    use serde_json::{json, Value};

    async fn track<S, B, E>(app: &S, api_key: &str, form_id: &str)
    where
        S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = E,
        >,
        B: actix_web::body::MessageBody,
        E: std::fmt::Debug,
    {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/api/track")
                .set_json(json!({ "apiKey": api_key, "formId": form_id }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), 201);
    }

    #[actix_web::test]
    async fn captured_submissions_show_up_for_the_owner() {
        let app = spawn_app().await;
        let token = register(&app, "Ada", "ada@x.io", "pw123456").await;
        let (_, api_key) = create_project(&app, &token, "Site", "x.io").await;
        track(&app, &api_key, "contact").await;

        let res = test::call_service(
            &app,
            authed(test::TestRequest::get().uri("/api/submissions"), &token).to_request(),
        )
        .await;
        assert_eq!(res.status(), 200);
        let body: Value = test::read_body_json(res).await;
        let listed = body.as_array().expect("array body");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["formId"], json!("contact"));
    }

    #[actix_web::test]
    async fn listing_excludes_other_tenants() {
        let app = spawn_app().await;
        let alice = register(&app, "Alice", "alice@x.io", "pw123456").await;
        let (_, alice_key) = create_project(&app, &alice, "Alice Site", "a.io").await;
        let bob = register(&app, "Bob", "bob@x.io", "pw123456").await;
        create_project(&app, &bob, "Bob Site", "b.io").await;
        track(&app, &alice_key, "contact").await;

        let res = test::call_service(
            &app,
            authed(test::TestRequest::get().uri("/api/submissions"), &bob).to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        assert!(body.as_array().expect("array body").is_empty());
    }

    #[actix_web::test]
    async fn detail_is_tenant_scoped_even_with_a_direct_id() {
        let app = spawn_app().await;
        let alice = register(&app, "Alice", "alice@x.io", "pw123456").await;
        let (_, alice_key) = create_project(&app, &alice, "Alice Site", "a.io").await;
        track(&app, &alice_key, "contact").await;

        let res = test::call_service(
            &app,
            authed(test::TestRequest::get().uri("/api/submissions"), &alice).to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        let id = body[0]["id"].as_str().expect("submission id").to_owned();

        // The owner can fetch it directly.
        let res = test::call_service(
            &app,
            authed(
                test::TestRequest::get().uri(&format!("/api/submissions/{id}")),
                &alice,
            )
            .to_request(),
        )
        .await;
        assert_eq!(res.status(), 200);

        // Another tenant gets a 404, not someone else's data.
        let bob = register(&app, "Bob", "bob@x.io", "pw123456").await;
        let res = test::call_service(
            &app,
            authed(
                test::TestRequest::get().uri(&format!("/api/submissions/{id}")),
                &bob,
            )
            .to_request(),
        )
        .await;
        assert_eq!(res.status(), 404);
    }
}
