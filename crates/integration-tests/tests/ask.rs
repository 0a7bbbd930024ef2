//! End-to-end behavior of the ask pipeline.

#![allow(clippy::panic)]

use integration_tests::TestServer;
use serde_json::{Value, json};

const UNRELATED_REPLY: &str = "I'm sorry, I can only answer questions about Alex Moreau's profile. \
     Please ask me about their skills, certifications, projects, or experience.";

#[tokio::test]
async fn greeting() {
    let server = TestServer::builder().build().await;

    let response = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .expect("sending greeting request");

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "Hello, World!");
}

#[tokio::test]
async fn related_question_gets_an_answer() {
    let server = TestServer::builder()
        .answer_text("Alex's strongest languages are Rust and Python.")
        .build()
        .await;

    let response = server
        .ask("What programming languages does the candidate know?", "203.0.113.1")
        .await;

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "answer": "Alex's strongest languages are Rust and Python." })
    );

    // Classification ran, then the answer stage.
    assert_eq!(server.upstream.calls(), 2);
}

#[tokio::test]
async fn unrelated_question_gets_the_canned_reply() {
    let server = TestServer::builder().build().await;

    let response = server.ask("What's the weather today?", "203.0.113.1").await;

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "answer": UNRELATED_REPLY }));

    // Only the classifier was called; the answer stage never ran.
    assert_eq!(server.upstream.calls(), 1);
}

#[tokio::test]
async fn missing_question_is_a_validation_error() {
    let server = TestServer::builder().build().await;

    for body in [json!({}), json!({ "question": "" }), json!({ "question": "   " })] {
        let response = server.ask_raw(body).await;

        assert_eq!(response.status(), 400);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Question is required" }));
    }

    // Validation failures never reach the completion endpoint.
    assert_eq!(server.upstream.calls(), 0);
}

#[tokio::test]
async fn too_long_question_short_circuits() {
    let server = TestServer::builder().max_question_tokens(10).build().await;

    let long_question = "Tell me about the candidate's experience. ".repeat(20);
    let response = server.ask(&long_question, "203.0.113.1").await;

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let answer = body["answer"].as_str().unwrap();
    assert!(answer.contains("too long"), "unexpected reply: {answer}");

    // The guard fired before any upstream call.
    assert_eq!(server.upstream.calls(), 0);
}

#[tokio::test]
async fn upstream_failure_is_a_500() {
    let server = TestServer::builder().upstream_error(500).build().await;

    let response = server.ask("What certifications does Alex hold?", "203.0.113.1").await;

    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
async fn upstream_auth_failure_is_still_a_500() {
    let server = TestServer::builder().upstream_error(401).build().await;

    let response = server.ask("What awards has Alex won?", "203.0.113.1").await;

    // Policy: any upstream failure surfaces as an internal error, never as
    // a relabeled upstream status.
    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn get_on_ask_is_method_not_allowed() {
    let server = TestServer::builder().build().await;

    let response = server
        .client
        .get(server.url("/ask"))
        .send()
        .await
        .expect("sending GET to /ask");

    assert_eq!(response.status(), 405);
}
