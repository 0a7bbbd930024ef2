use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Fatal server lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to bind to address: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),

    #[error("Failed to initialize ask pipeline: {0}")]
    Init(String),
}

/// Request-scoped failures for the ask endpoint.
///
/// Policy refusals (rate limited, too long, unrelated) are not errors; they
/// never appear here. Everything that does is either the caller's malformed
/// input or an upstream failure.
#[derive(Debug, thiserror::Error)]
pub(crate) enum AskError {
    #[error("Question is required")]
    MissingQuestion,

    #[error(transparent)]
    Upstream(#[from] llm::LlmError),
}

impl IntoResponse for AskError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MissingQuestion => (StatusCode::BAD_REQUEST, self.to_string()),
            // Every upstream failure maps to a plain 500 with a short
            // diagnostic; no partial output, no automatic retry.
            Self::Upstream(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.client_message()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
