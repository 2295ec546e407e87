//! API integration tests.
//!
//! These exercise the HTTP boundary with `tower::ServiceExt::oneshot`:
//! auth rejection, blocklist enforcement, request validation, and the
//! error-body shape. None of them reach the network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use athena_api::{create_router, ApiConfig, AppState};
use athena_gemini::GeminiClient;

fn test_router(blocked: &[&str]) -> axum::Router {
    let config = ApiConfig {
        blocked_user_ids: blocked.iter().map(|s| s.to_string()).collect(),
        ..ApiConfig::default()
    };
    // Unroutable base URL; tests here must fail before any network call.
    let gemini = Arc::new(GeminiClient::new("test-key").with_base_url("http://127.0.0.1:1"));
    let state = AppState::with_parts(config, gemini, "models/gemini-1.5-flash".to_string(), None);
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_healthz_alias() {
    let app = test_router(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_without_token_is_401() {
    let app = test_router(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url": "https://www.tiktok.com/@x/video/1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("đăng nhập"));
}

#[tokio::test]
async fn test_analyze_with_blocked_user_is_403() {
    let app = test_router(&["user-banned"]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header(header::AUTHORIZATION, "Bearer user-banned")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url": "https://www.tiktok.com/@x/video/1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("khóa"));
}

#[tokio::test]
async fn test_analyze_missing_url_is_400() {
    let app = test_router(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header(header::AUTHORIZATION, "Bearer user-1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"mode": "transcript"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("URL"));
}

#[tokio::test]
async fn test_analyze_self_referencing_url_is_400() {
    let app = test_router(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header(header::AUTHORIZATION, "Bearer user-1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"url": "https://my-backend.onrender.com/analyze"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Link không hợp lệ"));
}

#[tokio::test]
async fn test_translate_empty_text_is_400() {
    let app = test_router(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/translate")
                .header(header::AUTHORIZATION, "Bearer user-1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text": "   "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("nội dung"));
}

#[tokio::test]
async fn test_translate_without_token_is_401() {
    let app = test_router(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/translate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text": "xin chào"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
