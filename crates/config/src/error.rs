/// Errors surfaced while loading configuration from the environment.
///
/// Every variant aborts startup; there is no lazy credential loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
