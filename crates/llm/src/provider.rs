use reqwest::{Client, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::LlmError,
    http_client::default_http_client_builder,
    messages::{ChatCompletionRequest, ChatCompletionResponse},
};

/// Client for an OpenAI-style chat completions endpoint.
///
/// Holds no per-request state; one instance is built at startup and shared
/// across all concurrent requests.
pub struct CompletionClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl CompletionClient {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> crate::Result<Self> {
        let client = default_http_client_builder().build().map_err(|e| {
            log::error!("Failed to build HTTP client for completion endpoint: {e}");
            LlmError::InternalError(None)
        })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Send one exchange and return the generated text of the first choice.
    ///
    /// `None` means the provider answered successfully but with an empty or
    /// null body; callers pick the conservative interpretation.
    pub async fn chat_completion(&self, request: ChatCompletionRequest) -> crate::Result<Option<String>> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.expose_secret()))
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::ConnectionError(format!("Failed to send request to completion endpoint: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Completion endpoint error ({status}): {error_text}");

            return Err(LlmError::from_status(status.as_u16(), error_text));
        }

        // Read as text first so a parse failure can be logged with context.
        let response_text = response.text().await.map_err(|e| {
            log::error!("Failed to read completion response body: {e}");
            LlmError::InternalError(None)
        })?;

        let completion: ChatCompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            log::error!("Failed to parse completion response: {e}");
            log::debug!("Response parsing failed, length: {} bytes", response_text.len());

            LlmError::InternalError(None)
        })?;

        Ok(completion.into_text())
    }
}
