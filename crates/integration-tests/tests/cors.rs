//! CORS headers on success, refusal, and error paths.

#![allow(clippy::panic)]

use integration_tests::TestServer;
use reqwest::Method;

#[tokio::test]
async fn wildcard_origin_by_default() {
    let server = TestServer::builder().build().await;

    let response = server
        .client
        .post(server.url("/ask"))
        .header("Origin", "https://example.com")
        .json(&serde_json::json!({ "question": "What does Alex work on?" }))
        .send()
        .await
        .expect("sending ask request");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn configured_origin_is_echoed() {
    let server = TestServer::builder().allowed_origin("https://example.com").build().await;

    let response = server
        .client
        .post(server.url("/ask"))
        .header("Origin", "https://example.com")
        .json(&serde_json::json!({ "question": "What does Alex work on?" }))
        .send()
        .await
        .expect("sending ask request");

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://example.com")
    );
}

#[tokio::test]
async fn preflight_is_answered() {
    let server = TestServer::builder().build().await;

    let response = server
        .client
        .request(Method::OPTIONS, server.url("/ask"))
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("sending preflight");

    assert_eq!(response.status(), 200);

    let allow_methods = response
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    assert!(allow_methods.contains("POST"), "allow-methods: {allow_methods}");
    assert!(response.headers().get("access-control-allow-origin").is_some());
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn error_responses_carry_cors_headers() {
    let server = TestServer::builder().upstream_error(500).build().await;

    let response = server
        .client
        .post(server.url("/ask"))
        .header("Origin", "https://example.com")
        .json(&serde_json::json!({ "question": "What does Alex work on?" }))
        .send()
        .await
        .expect("sending ask request");

    // Browser clients must be able to read failures too.
    assert_eq!(response.status(), 500);
    assert!(response.headers().get("access-control-allow-origin").is_some());
}

#[tokio::test]
async fn validation_errors_carry_cors_headers() {
    let server = TestServer::builder().build().await;

    let response = server
        .client
        .post(server.url("/ask"))
        .header("Origin", "https://example.com")
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("sending ask request");

    assert_eq!(response.status(), 400);
    assert!(response.headers().get("access-control-allow-origin").is_some());
}
