use axum::http::{Method, header};
use config::{AllowedOrigin, CorsConfig};
use tower_http::cors::{Any, CorsLayer};

/// CORS layer applied to the whole router, so error responses carry the
/// headers too and browser clients can read failures.
pub(crate) fn layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match &config.allowed_origin {
        AllowedOrigin::Any => cors.allow_origin(Any),
        AllowedOrigin::Exact(origin) => cors.allow_origin(origin.clone()),
    }
}
