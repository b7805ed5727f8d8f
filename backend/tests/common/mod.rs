//! Shared helpers for the integration tests: a full app over in-memory
//! stores and request shortcuts.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use datapulse_backend::inbound::http::{self, HttpState};
use datapulse_backend::Trace;

pub async fn spawn_app() -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::in_memory()))
            .wrap(Trace)
            .configure(http::configure),
    )
    .await
}

pub fn authed(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {token}")))
}

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

pub async fn track<S, B, E>(app: &S, api_key: &str, form_id: &str, data: Value) -> u16
where
    S: Service<Request, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: std::fmt::Debug,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/track")
            .set_json(json!({ "apiKey": api_key, "formId": form_id, "data": data }))
            .to_request(),
    )
    .await;
    res.status().as_u16()
}
