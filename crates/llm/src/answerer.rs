use std::sync::Arc;

use crate::{
    error::LlmError,
    messages::{ChatCompletionRequest, ChatMessage},
    prompts::answer_system_prompt,
    provider::CompletionClient,
};

/// Final pipeline stage: generate the actual answer with the capable model.
pub struct Answerer {
    client: Arc<CompletionClient>,
    model: String,
    max_tokens: u32,
    system_prompt: String,
}

impl Answerer {
    pub fn new(client: Arc<CompletionClient>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            client,
            model: model.into(),
            max_tokens,
            // Built once; the profile document never changes at runtime.
            system_prompt: answer_system_prompt(),
        }
    }

    /// Returns the generated text unmodified.
    ///
    /// An empty reply from an otherwise successful call is an upstream
    /// malfunction here, unlike in the classifier, so it maps to an error.
    pub async fn answer(&self, question: &str) -> crate::Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.clone()),
                ChatMessage::user(question),
            ],
            max_tokens: Some(self.max_tokens),
        };

        self.client
            .chat_completion(request)
            .await?
            .ok_or_else(|| LlmError::InternalError(Some("completion endpoint returned no content".to_string())))
    }
}
