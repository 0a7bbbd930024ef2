//! Daily quota enforcement over the HTTP surface.

#![allow(clippy::panic)]

use integration_tests::TestServer;
use serde_json::Value;

async fn answer_text(response: reqwest::Response) -> String {
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("json body");
    body["answer"].as_str().expect("answer field").to_string()
}

#[tokio::test]
async fn quota_boundary_is_exact() {
    let server = TestServer::builder().daily_limit(5).build().await;

    for _ in 0..5 {
        let answer = answer_text(server.ask("What does Alex work on?", "203.0.113.1").await).await;
        assert!(!answer.contains("limit"), "admitted request was limited: {answer}");
    }

    // The sixth request gets the canned limited reply, still as a 200.
    let answer = answer_text(server.ask("What does Alex work on?", "203.0.113.1").await).await;
    assert!(answer.contains("limit"), "expected limited reply, got: {answer}");

    // Two calls per admitted request (classify + answer), none for the
    // rejected one.
    assert_eq!(server.upstream.calls(), 10);
}

#[tokio::test]
async fn identities_are_isolated() {
    let server = TestServer::builder().daily_limit(1).build().await;

    let answer = answer_text(server.ask("What does Alex work on?", "203.0.113.1").await).await;
    assert!(!answer.contains("limit"));

    let answer = answer_text(server.ask("What does Alex work on?", "203.0.113.1").await).await;
    assert!(answer.contains("limit"));

    // A different forwarded-for identity has a fresh window.
    let answer = answer_text(server.ask("What does Alex work on?", "203.0.113.2").await).await;
    assert!(!answer.contains("limit"));
}

#[tokio::test]
async fn first_forwarded_entry_keys_the_quota() {
    let server = TestServer::builder().daily_limit(1).build().await;

    let response = server
        .client
        .post(server.url("/ask"))
        .header("X-Forwarded-For", "203.0.113.1, 10.0.0.2")
        .json(&serde_json::json!({ "question": "What does Alex work on?" }))
        .send()
        .await
        .expect("sending ask request");

    assert!(!answer_text(response).await.contains("limit"));

    // Same first entry, different second hop: same identity, so limited.
    let response = server
        .client
        .post(server.url("/ask"))
        .header("X-Forwarded-For", "203.0.113.1, 10.99.99.99")
        .json(&serde_json::json!({ "question": "What does Alex work on?" }))
        .send()
        .await
        .expect("sending ask request");

    assert!(answer_text(response).await.contains("limit"));
}

#[tokio::test]
async fn concurrent_requests_never_over_admit() {
    let limit: u32 = 4;
    let server = std::sync::Arc::new(TestServer::builder().daily_limit(limit).build().await);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let server = std::sync::Arc::clone(&server);
            tokio::spawn(async move { answer_text(server.ask("What does Alex work on?", "203.0.113.1").await).await })
        })
        .collect();

    let mut admitted: u32 = 0;
    for handle in handles {
        let answer = handle.await.expect("task panicked");
        if !answer.contains("limit") {
            admitted += 1;
        }
    }

    assert_eq!(admitted, limit);
}

#[tokio::test]
async fn rejected_requests_do_not_call_upstream() {
    let server = TestServer::builder().daily_limit(0).build().await;

    let answer = answer_text(server.ask("What does Alex work on?", "203.0.113.1").await).await;
    assert!(answer.contains("limit"));

    assert_eq!(server.upstream.calls(), 0);
}
