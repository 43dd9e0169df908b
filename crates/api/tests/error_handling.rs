//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use wander_api::error::AppError;
use wander_api::router::panic_response;
use wander_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("City is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "City is required");
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound("City not found in our database".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "City not found in our database");
}

// ---------------------------------------------------------------------------
// Test: Auth failures surface the route message, never the detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn auth_error_hides_detail() {
    let err = AppError::Core(CoreError::Auth {
        context: "Failed to fetch hotel data".into(),
        detail: "Token endpoint returned 401: invalid_client".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "AUTH_ERROR");
    assert_eq!(json["error"], "Failed to fetch hotel data");
    assert!(json.get("message").is_none());
    assert!(!json.to_string().contains("invalid_client"));
}

#[tokio::test]
async fn upstream_error_includes_provider_message() {
    let err = AppError::Core(CoreError::Upstream {
        context: "Failed to fetch check-in links".into(),
        message: Some("airlineCode must be a 2-character IATA code".into()),
        detail: "Provider returned 400: {...}".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "Failed to fetch check-in links");
    assert_eq!(json["message"], "airlineCode must be a 2-character IATA code");
}

#[tokio::test]
async fn upstream_error_without_message_omits_field() {
    let err = AppError::Core(CoreError::Upstream {
        context: "Failed to fetch travel data".into(),
        message: None,
        detail: "Request failed: connection refused".into(),
    });

    let (_, json) = error_to_response(err).await;

    assert_eq!(
        json,
        serde_json::json!({ "error": "Failed to fetch travel data", "code": "UPSTREAM_ERROR" })
    );
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Message is required".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Message is required");
}

// ---------------------------------------------------------------------------
// Test: Internal errors are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let err = AppError::InternalError("sensitive stack detail".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        serde_json::json!({ "error": "An internal error occurred", "code": "INTERNAL_ERROR" })
    );
}

async fn panicking_handler() -> &'static str {
    panic!("secret connection string")
}

#[tokio::test]
async fn handler_panic_becomes_internal_error() {
    let app = Router::new()
        .route("/boom", get(panicking_handler))
        .layer(CatchPanicLayer::custom(panic_response));

    let response = app
        .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("secret"));
}
