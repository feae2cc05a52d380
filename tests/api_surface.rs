use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use eventrix_server::auth::firebase::{FirebaseIdentity, TokenVerifier};
use eventrix_server::config::Config;
use eventrix_server::routes::create_routes;
use eventrix_server::services::{GatewayOrder, OrderGateway};
use eventrix_server::state::AppState;
use eventrix_server::utils::error::AppError;

struct RejectingVerifier;

#[async_trait]
impl TokenVerifier for RejectingVerifier {
    async fn verify(&self, _id_token: &str) -> Result<FirebaseIdentity, AppError> {
        Err(AppError::AuthError("Invalid or expired ID token".to_string()))
    }
}

struct UnusedGateway;

#[async_trait]
impl OrderGateway for UnusedGateway {
    async fn create_order(
        &self,
        _amount: i64,
        _currency: &str,
        _receipt: &str,
    ) -> Result<GatewayOrder, AppError> {
        panic!("gateway must not be reached in these tests");
    }
}

/// Router over a lazy pool: nothing here may actually touch the store.
fn test_app() -> axum::Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/eventrix_test")
        .expect("lazy pool");

    let config = Config::from_env();
    let state = AppState::new(pool, config, Arc::new(RejectingVerifier), Arc::new(UnusedGateway));
    create_routes(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok_with_security_headers() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("X-Frame-Options").unwrap(), "DENY");

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["service"], "eventrix-api");
}

#[tokio::test]
async fn user_routes_require_a_bearer_token() {
    let response = test_app()
        .oneshot(
            Request::get("/users/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn rejected_firebase_token_yields_401() {
    let response = test_app()
        .oneshot(
            Request::post("/users/firebase")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"id_token": "garbage"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn organiser_routes_require_the_session_cookie() {
    let response = test_app()
        .oneshot(Request::get("/api/event").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forged_organiser_session_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::get("/api/event")
                .header(header::COOKIE, "organiser_token=not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn admin_curation_requires_the_admin_cookie() {
    let response = test_app()
        .oneshot(
            Request::post("/api/admin/top-events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"event_id": "00000000-0000-0000-0000-000000000000", "position": 1}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn an_organiser_cookie_does_not_open_admin_routes() {
    // Cross-audience sessions must not be interchangeable, even before
    // the account lookup happens.
    let token = eventrix_server::auth::jwt::issue_token(
        "dev-secret",
        uuid::Uuid::new_v4(),
        eventrix_server::auth::jwt::SessionRole::Organiser,
    )
    .unwrap();

    let response = test_app()
        .oneshot(
            Request::get("/api/admin/me")
                .header(header::COOKIE, format!("adminToken={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let response = test_app()
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
