// ==============================
// tests/unit/middleware_tests.rs
// ==============================
//! Unit tests for the bearer middleware on the real router
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::json;

use crate::test_utils::{bearer_request, send, setup_test_app, test_tokens};

fn profile_with_header(value: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/profile")
        .header(header::AUTHORIZATION, value)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_profile_without_header() {
    let (app, _state) = setup_test_app();
    let request = Request::builder()
        .uri("/api/profile")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "unauthorized" }));
}

#[tokio::test]
async fn test_profile_with_wrong_scheme() {
    let (app, _state) = setup_test_app();
    let token = test_tokens().issue_pair("bob").unwrap().access_token;

    for value in [
        format!("Basic {token}"),
        format!("bearer {token}"),
        format!("BEARER {token}"),
        token.clone(),
    ] {
        let (status, body) = send(&app, profile_with_header(&value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{value}");
        assert_eq!(body, json!({ "error": "unauthorized" }));
    }
}

#[tokio::test]
async fn test_profile_with_tampered_signature() {
    let (app, _state) = setup_test_app();
    let token = test_tokens().issue_pair("bob").unwrap().access_token;

    let (signing_input, signature) = token.rsplit_once('.').unwrap();
    let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;
    let tampered = format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(bytes));

    let (status, body) = send(&app, bearer_request("/api/profile", &tampered)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "invalid token" }));
}

#[tokio::test]
async fn test_profile_with_empty_token() {
    let (app, _state) = setup_test_app();
    let (status, body) = send(&app, profile_with_header("Bearer ")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "invalid token" }));
}

#[tokio::test]
async fn test_token_for_unregistered_subject_still_resolves() {
    // The middleware trusts the signature alone; it never consults the credential table
    let (app, _state) = setup_test_app();
    let token = test_tokens().issue_pair("ghost").unwrap().access_token;

    let (status, body) = send(&app, bearer_request("/api/profile", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user": "ghost" }));
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let (app, _state) = setup_test_app();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}
