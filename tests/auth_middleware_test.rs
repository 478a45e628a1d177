use std::sync::Once;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use attendance_backend::middleware::auth::{require_auth, require_manager, Claims};
use attendance_backend::models::user::{User, UserRole};
use attendance_backend::utils::token::issue_token;

static INIT: Once = Once::new();

fn setup() {
    INIT.call_once(|| {
        std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        std::env::set_var("DATABASE_URL", "postgres://localhost/attendance_test");
        std::env::set_var("JWT_SECRET", "test_secret_key");
        attendance_backend::config::init_config().expect("init config");
    });
}

fn user_with_role(role: UserRole) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        password_hash: "x".to_string(),
        role,
        employee_id: "EMP-1".to_string(),
        department: "Engineering".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn manager_probe() -> Router {
    Router::new()
        .route("/probe", get(|| async { "ok" }))
        .layer(axum::middleware::from_fn(require_manager))
}

fn auth_probe() -> Router {
    Router::new()
        .route("/probe", get(|| async { "ok" }))
        .layer(axum::middleware::from_fn(require_auth))
}

fn probe_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/probe");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn error_body(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    setup();
    let resp = manager_probe().oneshot(probe_request(None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = error_body(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Not authorized, no token");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    setup();
    let resp = manager_probe()
        .oneshot(probe_request(Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn employee_token_cannot_reach_manager_routes() {
    setup();
    let token = issue_token(&user_with_role(UserRole::Employee)).unwrap();
    let resp = manager_probe()
        .oneshot(probe_request(Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = error_body(resp).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn manager_token_passes_the_manager_guard() {
    setup();
    let token = issue_token(&user_with_role(UserRole::Manager)).unwrap();
    let resp = manager_probe()
        .oneshot(probe_request(Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn any_role_passes_the_plain_auth_guard() {
    setup();
    for role in [UserRole::Employee, UserRole::Manager] {
        let token = issue_token(&user_with_role(role)).unwrap();
        let resp = auth_probe()
            .oneshot(probe_request(Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn expired_token_is_rejected() {
    setup();
    let config = attendance_backend::config::get_config();
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        // Far enough in the past to clear the default decode leeway.
        exp: (Utc::now().timestamp() - 600) as usize,
        role: UserRole::Manager,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap();

    let resp = manager_probe()
        .oneshot(probe_request(Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
