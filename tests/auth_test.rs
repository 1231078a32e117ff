use std::env;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use agentic_platform::storage::memory::MemoryCandidateStore;
use agentic_platform::storage::CandidateStore;
use agentic_platform::AppState;

const BOUNDARY: &str = "auth-test-boundary";
const JWT_SECRET: &str = "test_secret_key";

fn setup_app() -> (Router, Arc<MemoryCandidateStore>) {
    env::set_var("DATABASE_URL", "postgres://localhost/unused_in_tests");
    env::set_var("JWT_SECRET", JWT_SECRET);
    env::set_var(
        "UPLOADS_DIR",
        env::temp_dir()
            .join("agentic-platform-test-uploads")
            .to_str()
            .expect("temp dir path"),
    );
    let _ = agentic_platform::config::init_config();

    let store = Arc::new(MemoryCandidateStore::new());
    let app = agentic_platform::app(AppState::new(store.clone()));
    (app, store)
}

fn create_body() -> String {
    let mut body = String::new();
    for (name, value) in [
        ("full_name", "Jane Doe"),
        ("email", "jane@example.com"),
        ("applied_role", "Engineer"),
    ] {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn create_request(auth_header: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/candidates")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(value) = auth_header {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::from(create_body())).expect("build request")
}

#[tokio::test]
async fn missing_credential_is_rejected_before_storage() {
    let (app, store) = setup_app();

    let resp = app
        .clone()
        .oneshot(create_request(None))
        .await
        .expect("send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // the rejected request must leave no trace in storage
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn unsupported_scheme_is_rejected() {
    let (app, store) = setup_app();

    let resp = app
        .clone()
        .oneshot(create_request(Some("Basic dXNlcjpwYXNz")))
        .await
        .expect("send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let (app, store) = setup_app();

    let resp = app
        .clone()
        .oneshot(create_request(Some("Bearer not.a.token")))
        .await
        .expect("send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let (app, store) = setup_app();

    let claims = agentic_platform::middleware::auth::Claims {
        sub: "tester".into(),
        exp: (chrono::Utc::now().timestamp() - 3600) as usize,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("encode token");

    let resp = app
        .clone()
        .oneshot(create_request(Some(&format!("Bearer {token}"))))
        .await
        .expect("send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_rejected() {
    let (app, store) = setup_app();

    let token = agentic_platform::middleware::auth::issue_token("tester", "other_secret", 3600)
        .expect("issue token");

    let resp = app
        .clone()
        .oneshot(create_request(Some(&format!("Bearer {token}"))))
        .await
        .expect("send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn every_candidate_endpoint_requires_auth() {
    let (app, _store) = setup_app();

    for (method, uri) in [
        ("GET", "/api/candidates"),
        ("GET", "/api/candidates/1"),
        ("DELETE", "/api/candidates/1"),
    ] {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("build request");
        let resp = app.clone().oneshot(req).await.expect("send request");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}
