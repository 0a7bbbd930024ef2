//! In-process stand-in for the completion endpoint.
//!
//! Serves the one route the agent calls and scripts both stages: requests
//! carrying the classifier instruction get a verdict keyed off the question
//! text, everything else gets the configured answer text. Every request is
//! counted so tests can assert that guard stages short-circuit before any
//! upstream call.

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Questions containing this marker are classified UNRELATED by the mock.
pub const UNRELATED_MARKER: &str = "weather";

pub struct MockLlm {
    state: Arc<MockLlmState>,
    pub address: SocketAddr,
}

pub(crate) struct MockLlmState {
    calls: AtomicUsize,
    answer_text: String,
    error_status: Option<u16>,
}

impl MockLlm {
    pub(crate) async fn spawn(answer_text: String, error_status: Option<u16>) -> Self {
        let state = Arc::new(MockLlmState {
            calls: AtomicUsize::new(0),
            answer_text,
            error_status,
        });

        let router = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("binding mock upstream");
        let address = listener.local_addr().expect("mock upstream address");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("mock upstream crashed");
        });

        Self { state, address }
    }

    /// Number of completion calls received so far.
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }
}

async fn chat_completions(State(state): State<Arc<MockLlmState>>, Json(request): Json<Value>) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = state.error_status {
        let status = StatusCode::from_u16(status).expect("valid injected status");
        let body = json!({"error": {"message": "injected upstream failure"}});

        return (status, Json(body)).into_response();
    }

    let system = request["messages"][0]["content"].as_str().unwrap_or_default();
    let question = request["messages"][1]["content"].as_str().unwrap_or_default();

    // The classifier stage pins its output format with this phrase; use it
    // to tell the two stages apart.
    let content = if system.contains("exactly one word") {
        if question.to_lowercase().contains(UNRELATED_MARKER) {
            "UNRELATED"
        } else {
            "RELATED"
        }
    } else {
        state.answer_text.as_str()
    };

    let body = json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": request["model"],
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    });

    Json(body).into_response()
}
