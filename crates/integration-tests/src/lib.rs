//! Black-box test harness.
//!
//! Spins the exact production router on an ephemeral port, wired to an
//! in-process mock completion endpoint, and exposes a thin client for the
//! tests in `tests/`.

#![allow(clippy::panic)]

pub mod mock_llm;

use std::net::SocketAddr;

use config::{AllowedOrigin, Config, CorsConfig, LimitsConfig, LlmConfig, ServerConfig};
use secrecy::SecretString;
use serde_json::json;
use tokio::net::TcpListener;

pub use mock_llm::MockLlm;

pub struct TestServer {
    pub client: reqwest::Client,
    pub upstream: MockLlm,
    base_url: String,
}

pub struct TestServerBuilder {
    daily_limit: u32,
    max_question_tokens: usize,
    allowed_origin: AllowedOrigin,
    answer_text: String,
    upstream_error: Option<u16>,
}

impl TestServer {
    pub fn builder() -> TestServerBuilder {
        TestServerBuilder {
            daily_limit: 5,
            max_question_tokens: 1000,
            allowed_origin: AllowedOrigin::Any,
            answer_text: "Alex knows Rust, Python, SQL, and TypeScript.".to_string(),
            upstream_error: None,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a question to `/ask`, impersonating `client_ip` via the
    /// forwarded-for header so tests control the quota identity.
    pub async fn ask(&self, question: &str, client_ip: &str) -> reqwest::Response {
        self.client
            .post(self.url("/ask"))
            .header("X-Forwarded-For", client_ip)
            .json(&json!({ "question": question }))
            .send()
            .await
            .expect("sending ask request")
    }

    /// POST an arbitrary JSON body to `/ask`.
    pub async fn ask_raw(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/ask"))
            .json(&body)
            .send()
            .await
            .expect("sending raw ask request")
    }
}

impl TestServerBuilder {
    pub fn daily_limit(mut self, limit: u32) -> Self {
        self.daily_limit = limit;
        self
    }

    pub fn max_question_tokens(mut self, max: usize) -> Self {
        self.max_question_tokens = max;
        self
    }

    pub fn allowed_origin(mut self, origin: &str) -> Self {
        self.allowed_origin = AllowedOrigin::parse(origin).expect("valid test origin");
        self
    }

    pub fn answer_text(mut self, text: &str) -> Self {
        self.answer_text = text.to_string();
        self
    }

    /// Make every upstream call fail with the given HTTP status.
    pub fn upstream_error(mut self, status: u16) -> Self {
        self.upstream_error = Some(status);
        self
    }

    pub async fn build(self) -> TestServer {
        let upstream = MockLlm::spawn(self.answer_text, self.upstream_error).await;

        let config = Config {
            server: ServerConfig {
                // Placeholder; the test listener below decides the real port.
                listen_address: "127.0.0.1:0".parse().expect("placeholder address"),
                cors: CorsConfig {
                    allowed_origin: self.allowed_origin,
                },
            },
            llm: LlmConfig {
                api_key: SecretString::from("sk-test"),
                base_url: format!("http://{}/v1", upstream.address),
                classifier_model: "gpt-4o-mini".to_string(),
                answer_model: "gpt-4o-mini".to_string(),
                max_answer_tokens: 500,
            },
            limits: LimitsConfig {
                daily_limit: self.daily_limit,
                max_question_tokens: self.max_question_tokens,
            },
        };

        let router = server::router(&config).expect("building router");

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("binding test server");
        let address = listener.local_addr().expect("test server address");

        tokio::spawn(async move {
            axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .expect("test server crashed");
        });

        TestServer {
            client: reqwest::Client::new(),
            upstream,
            base_url: format!("http://{address}"),
        }
    }
}
