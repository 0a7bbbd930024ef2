//! HTTP surface of the profile agent.
//!
//! One JSON endpoint (`POST /ask`) plus a liveness greeting on `/`. The ask
//! handler validates input, derives the quota identity, and hands off to the
//! pipeline; every terminal state of the pipeline maps to exactly one
//! response shape.

mod client_ip;
mod cors;
mod error;
pub mod logger;
mod pipeline;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{ConnectInfo, State, rejection::JsonRejection},
    http::HeaderMap,
    routing::{get, post},
};
use config::Config;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use error::AskError;
use pipeline::AskPipeline;

pub use error::Error;

pub(crate) type Result<T> = std::result::Result<T, Error>;

pub struct ServeConfig {
    pub listen_address: SocketAddr,
    pub config: Config,
}

/// Bind and serve until the process is stopped.
pub async fn serve(ServeConfig { listen_address, config }: ServeConfig) -> crate::Result<()> {
    let app = router(&config)?;

    let listener = TcpListener::bind(listen_address).await.map_err(Error::Bind)?;

    log::info!("Ask endpoint available at: http://{listen_address}/ask");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(Error::Server)?;

    Ok(())
}

/// Build the router with all collaborators constructed once.
///
/// Public so the integration test harness can serve the exact production
/// router on an ephemeral port.
pub fn router(config: &Config) -> crate::Result<Router> {
    let pipeline = Arc::new(AskPipeline::new(config).map_err(|e| Error::Init(e.to_string()))?);

    let router = Router::new()
        .route("/", get(index))
        .route("/ask", post(ask))
        .layer(cors::layer(&config.server.cors))
        .with_state(pipeline);

    Ok(router)
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    #[serde(default)]
    question: Option<String>,
}

#[derive(Debug, Serialize)]
struct AskResponse {
    answer: String,
}

async fn index() -> &'static str {
    "Hello, World!"
}

/// Handle one question end to end.
async fn ask(
    State(pipeline): State<Arc<AskPipeline>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> std::result::Result<Json<AskResponse>, AskError> {
    // A missing or unparseable body is treated the same as a missing
    // question, so the caller always sees the one validation shape.
    let question = body
        .ok()
        .and_then(|Json(request)| request.question)
        .map(|question| question.trim().to_owned())
        .filter(|question| !question.is_empty())
        .ok_or(AskError::MissingQuestion)?;

    let identity = client_ip::client_identity(&headers, peer);

    log::debug!("handling question from {identity}");

    let outcome = pipeline.run(&question, &identity).await?;

    Ok(Json(AskResponse {
        answer: outcome.into_reply(),
    }))
}
