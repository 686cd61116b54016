//! Boundary tests over the assembled router.
//!
//! The pool is created lazily, so these exercise routing, input validation,
//! and error rendering for every path that never issues a statement against
//! the store.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use tower::ServiceExt;

use user_service::db::Database;
use user_service::routes;
use user_service::startup::AppState;

fn test_app() -> Router {
    let options = MySqlConnectOptions::new()
        .host("localhost")
        .username("unused")
        .database("unused");
    let pool = MySqlPoolOptions::new().connect_lazy_with(options);
    routes::router(AppState {
        db: Database::new(pool),
    })
}

async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_route_answers_404_json() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Route not found.");
}

#[tokio::test]
async fn create_requires_name_and_email() {
    let response = test_app()
        .oneshot(json_request("POST", "/api/users", r#"{"name":"Ada"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Both name and email are required.");
}

#[tokio::test]
async fn create_rejects_empty_fields() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/users",
            r#"{"name":"","email":"ada@example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_with_no_fields_is_rejected_before_touching_the_store() {
    let response = test_app()
        .oneshot(json_request("PUT", "/api/users/1", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Provide at least one field to update.");
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/users/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
