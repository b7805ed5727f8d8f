//! End-to-end flows over the full route tree: capture, rotation, and
//! account teardown.

mod common;

use actix_web::test;
use common::{authed, create_project, register, spawn_app, track};
use serde_json::{json, Value};

#[actix_web::test]
async fn capture_flow_round_trips() {
    let app = spawn_app().await;
    let token = register(&app, "Ada", "ada@x.io", "pw123456").await;
    let (_, api_key) = create_project(&app, &token, "Site A", "a.com").await;

    let status = track(&app, &api_key, "contact", json!({ "email": "a@b.com" })).await;
    assert_eq!(status, 201);

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
    assert_eq!(listed[0]["data"]["email"], json!("a@b.com"));

    let res = test::call_service(
        &app,
        authed(test::TestRequest::get().uri("/api/projects"), &token).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body[0]["submissionCount"], json!(1));
}

#[actix_web::test]
async fn submissions_list_newest_first() {
    let app = spawn_app().await;
    let token = register(&app, "Ada", "ada@x.io", "pw123456").await;
    let (_, api_key) = create_project(&app, &token, "Site", "x.io").await;

    for form in ["first", "second", "third"] {
        assert_eq!(track(&app, &api_key, form, json!({})).await, 201);
    }

    let res = test::call_service(
        &app,
        authed(test::TestRequest::get().uri("/api/submissions"), &token).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    let listed = body.as_array().expect("array body");
    assert_eq!(listed.len(), 3);
    let timestamps: Vec<&str> = listed
        .iter()
        .map(|s| s["timestamp"].as_str().expect("timestamp"))
        .collect();
    let mut sorted = timestamps.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(timestamps, sorted);
}

#[actix_web::test]
async fn rotated_key_takes_effect_immediately() {
    let app = spawn_app().await;
    let token = register(&app, "Ada", "ada@x.io", "pw123456").await;
    let (id, old_key) = create_project(&app, &token, "Site", "x.io").await;

    let res = test::call_service(
        &app,
        authed(
            test::TestRequest::post().uri(&format!("/api/projects/{id}/key")),
            &token,
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);
    let body: Value = test::read_body_json(res).await;
    let new_key = body["apiKey"].as_str().expect("api key").to_owned();

    assert_eq!(track(&app, &old_key, "contact", json!({})).await, 401);
    assert_eq!(track(&app, &new_key, "contact", json!({})).await, 201);
}

#[actix_web::test]
async fn track_defaults_optional_fields() {
    let app = spawn_app().await;
    let token = register(&app, "Ada", "ada@x.io", "pw123456").await;
    let (_, api_key) = create_project(&app, &token, "Site", "x.io").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/track")
            .set_json(json!({ "apiKey": api_key }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 201);

    let res = test::call_service(
        &app,
        authed(test::TestRequest::get().uri("/api/submissions"), &token).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body[0]["formId"], json!("unknown"));
    assert_eq!(body[0]["data"], json!({}));
    assert_eq!(body[0]["pageUrl"], json!(""));
    assert_eq!(body[0]["userAgent"], json!(""));
}

#[actix_web::test]
async fn track_treats_an_empty_form_id_as_missing() {
    let app = spawn_app().await;
    let token = register(&app, "Ada", "ada@x.io", "pw123456").await;
    let (_, api_key) = create_project(&app, &token, "Site", "x.io").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/track")
            .set_json(json!({ "apiKey": api_key, "formId": "" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 201);

    let res = test::call_service(
        &app,
        authed(test::TestRequest::get().uri("/api/submissions"), &token).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body[0]["formId"], json!("unknown"));
}

#[actix_web::test]
async fn account_deletion_tears_everything_down() {
    let app = spawn_app().await;
    let token = register(&app, "Ada", "ada@x.io", "pw123456").await;
    let (_, api_key) = create_project(&app, &token, "Site", "x.io").await;
    assert_eq!(track(&app, &api_key, "contact", json!({})).await, 201);

    let res = test::call_service(
        &app,
        authed(test::TestRequest::delete().uri("/api/auth/account"), &token).to_request(),
    )
    .await;
    assert_eq!(res.status(), 204);

    // The token is dead.
    let res = test::call_service(
        &app,
        authed(test::TestRequest::get().uri("/api/projects"), &token).to_request(),
    )
    .await;
    assert_eq!(res.status(), 401);

    // The project's key stops capturing.
    assert_eq!(track(&app, &api_key, "contact", json!({})).await, 401);
}

#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = spawn_app().await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;
    assert!(res.headers().contains_key("trace-id"));

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/projects").to_request(),
    )
    .await;
    assert_eq!(res.status(), 401);
    assert!(res.headers().contains_key("trace-id"));
}

#[actix_web::test]
async fn error_envelope_includes_the_trace_id() {
    let app = spawn_app().await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "ghost@x.io", "password": "pw" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 401);
    let header = res
        .headers()
        .get("trace-id")
        .expect("trace id header")
        .to_str()
        .expect("ascii header")
        .to_owned();
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_credentials"));
    assert_eq!(body["traceId"], json!(header));
}
