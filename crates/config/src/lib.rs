//! Typed configuration for the profile agent.
//!
//! Everything is sourced from environment variables once at startup. Missing
//! or malformed values fail fast; nothing is deferred to the first request.

mod error;

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use http::HeaderValue;
use secrecy::SecretString;

pub use error::Error;

pub(crate) type Result<T> = std::result::Result<T, Error>;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CLASSIFIER_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ANSWER_MODEL: &str = "gpt-4o-mini";
const DEFAULT_DAILY_LIMIT: u32 = 5;
const DEFAULT_MAX_QUESTION_TOKENS: usize = 1000;
const DEFAULT_MAX_ANSWER_TOKENS: u32 = 500;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub limits: LimitsConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The socket address the server should listen on.
    pub listen_address: SocketAddr,
    /// CORS policy applied to every response, errors included.
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origin: AllowedOrigin,
}

/// The origin echoed in `Access-Control-Allow-Origin`.
#[derive(Debug, Clone)]
pub enum AllowedOrigin {
    /// Wildcard origin, the default.
    Any,
    /// A single exact origin, validated to be a legal header value.
    Exact(HeaderValue),
}

impl AllowedOrigin {
    pub fn parse(value: &str) -> Result<Self> {
        if value == "*" {
            return Ok(Self::Any);
        }

        let header = HeaderValue::from_str(value.trim()).map_err(|e| Error::Invalid {
            var: "ALLOWED_ORIGIN",
            reason: e.to_string(),
        })?;

        Ok(Self::Exact(header))
    }
}

/// Completion endpoint settings shared by both pipeline stages.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Upstream credential. Required; the process refuses to boot without it.
    pub api_key: SecretString,
    /// Base URL of the chat completions API.
    pub base_url: String,
    /// Cheap model used for the relatedness verdict.
    pub classifier_model: String,
    /// Model used to generate the actual answer.
    pub answer_model: String,
    /// Token cap passed to the answer call.
    pub max_answer_tokens: u32,
}

/// Admission policy knobs for the request pipeline.
#[derive(Debug, Clone, Copy)]
pub struct LimitsConfig {
    /// Admitted requests per client identity per UTC day.
    pub daily_limit: u32,
    /// Questions estimated above this token count are refused.
    pub max_question_tokens: usize,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::load(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Tests pass a map-backed closure here to stay hermetic; `from_env` is
    /// the only caller that touches the real environment.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
            .ok_or(Error::Missing("OPENAI_API_KEY"))?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let allowed_origin = match lookup("ALLOWED_ORIGIN") {
            Some(value) => AllowedOrigin::parse(&value)?,
            None => AllowedOrigin::Any,
        };

        let server = ServerConfig {
            listen_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
            cors: CorsConfig { allowed_origin },
        };

        let llm = LlmConfig {
            api_key: SecretString::from(api_key),
            base_url: lookup("AGENT_LLM_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            classifier_model: lookup("AGENT_CLASSIFIER_MODEL")
                .unwrap_or_else(|| DEFAULT_CLASSIFIER_MODEL.to_owned()),
            answer_model: lookup("AGENT_ANSWER_MODEL").unwrap_or_else(|| DEFAULT_ANSWER_MODEL.to_owned()),
            max_answer_tokens: DEFAULT_MAX_ANSWER_TOKENS,
        };

        let limits = LimitsConfig {
            daily_limit: parse_or(&lookup, "AGENT_DAILY_LIMIT", DEFAULT_DAILY_LIMIT)?,
            max_question_tokens: parse_or(&lookup, "AGENT_MAX_QUESTION_TOKENS", DEFAULT_MAX_QUESTION_TOKENS)?,
        };

        Ok(Config { server, llm, limits })
    }
}

fn parse_or<T>(lookup: impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| Error::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
