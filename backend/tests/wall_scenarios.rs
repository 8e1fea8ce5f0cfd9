//! End-to-end scenarios over the assembled application with in-memory stores:
//! register, log in, post to the wall, and read it back.

use std::sync::Arc;

use actix_web::{test as actix_test, web};
use serde_json::{Value, json};

use happywall::domain::{LoginWorkflow, RegistrationWorkflow, WallWorkflow};
use happywall::inbound::http::health::HealthState;
use happywall::inbound::http::state::HttpState;
use happywall::outbound::memory::{MemoryAccountRepository, MemoryWallRepository};
use happywall::server::build_app;

fn memory_state() -> HttpState {
    let accounts = Arc::new(MemoryAccountRepository::new());
    let posts = Arc::new(MemoryWallRepository::new(Arc::clone(&accounts)));
    HttpState::new(
        Arc::new(RegistrationWorkflow::new(accounts.clone())),
        Arc::new(LoginWorkflow::new(accounts)),
        Arc::new(WallWorkflow::new(posts)),
    )
}

async fn post_json(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    uri: &str,
    body: Value,
) -> (actix_web::http::StatusCode, Value) {
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

#[actix_web::test]
async fn register_login_post_and_read_the_wall() {
    let app = actix_test::init_service(build_app(
        web::Data::new(HealthState::new()),
        web::Data::new(memory_state()),
    ))
    .await;

    // Register.
    let (status, created) = post_json(
        &app,
        "/api/register",
        json!({ "email": "a@x.com", "name": "A", "password": "pw1" }),
    )
    .await;
    assert_eq!(status, actix_web::http::StatusCode::CREATED);
    assert_eq!(created["user"]["name"].as_str(), Some("A"));
    let account_id = created["user"]["id"].as_str().expect("account id").to_owned();

    // Login with the right password resolves the same account.
    let (status, logged_in) = post_json(
        &app,
        "/api/login",
        json!({ "email": "a@x.com", "password": "pw1" }),
    )
    .await;
    assert_eq!(status, actix_web::http::StatusCode::OK);
    assert_eq!(logged_in["user"]["id"].as_str(), Some(account_id.as_str()));

    // The wrong password is rejected without leaking anything.
    let (status, rejected) = post_json(
        &app,
        "/api/login",
        json!({ "email": "a@x.com", "password": "pw2" }),
    )
    .await;
    assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
    assert_eq!(rejected["message"].as_str(), Some("Incorrect password"));

    // Registering the same email again conflicts.
    let (status, _) = post_json(
        &app,
        "/api/register",
        json!({ "email": "a@x.com", "name": "B", "password": "pw3" }),
    )
    .await;
    assert_eq!(status, actix_web::http::StatusCode::CONFLICT);

    // Post to the wall.
    let (status, _) = post_json(
        &app,
        "/api/wallposts",
        json!({ "message": "hi", "userId": account_id }),
    )
    .await;
    assert_eq!(status, actix_web::http::StatusCode::CREATED);

    // The feed resolves the author's name and a relative age.
    let request = actix_test::TestRequest::get()
        .uri("/api/wallposts")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    assert!(response.headers().contains_key("trace-id"));
    assert_eq!(
        response
            .headers()
            .get("Access-Control-Allow-Origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body = actix_test::read_body(response).await;
    let feed: Value = serde_json::from_slice(&body).expect("feed payload");
    let posts = feed["wallposts"].as_array().expect("wallposts array");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["message"].as_str(), Some("hi"));
    assert_eq!(posts[0]["author"]["name"].as_str(), Some("A"));
    assert_eq!(posts[0]["createdAt"].as_str(), Some("a few seconds ago"));
}

#[actix_web::test]
async fn health_probes_report_readiness() {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let app =
        actix_test::init_service(build_app(health, web::Data::new(memory_state()))).await;

    for path in ["/health/ready", "/health/live"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(path).to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK, "{path}");
    }
}
