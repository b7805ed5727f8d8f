//! Helpers for handler tests: an in-memory app and auth shortcuts.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use crate::inbound::http::state::HttpState;

/// Build the full route tree over in-memory stores.
pub async fn spawn_app() -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::in_memory()))
            .wrap(crate::middleware::Trace)
            .configure(crate::inbound::http::configure),
    )
    .await
}

/// Register an account and return its bearer token.
pub async fn register<S, B, E>(app: &S, name: &str, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: std::fmt::Debug,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "name": name, "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 201, "registration must succeed");
    let body: Value = test::read_body_json(res).await;
    body["token"].as_str().expect("token in response").to_owned()
}

/// Attach a bearer token to a request under construction.
pub fn authed(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {token}")))
}

/// Create a project for the token's account and return its `(id, apiKey)`.
pub async fn create_project<S, B, E>(
    app: &S,
    token: &str,
    name: &str,
    domain: &str,
) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: std::fmt::Debug,
{
    let res = test::call_service(
        app,
        authed(test::TestRequest::post().uri("/api/projects"), token)
            .set_json(json!({ "name": name, "domain": domain }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 201, "project creation must succeed");
    let body: Value = test::read_body_json(res).await;
    (
        body["id"].as_str().expect("project id").to_owned(),
        body["apiKey"].as_str().expect("api key").to_owned(),
    )
}
