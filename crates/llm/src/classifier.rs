use std::sync::Arc;

use crate::{
    messages::{ChatCompletionRequest, ChatMessage},
    prompts::CLASSIFIER_SYSTEM_PROMPT,
    provider::CompletionClient,
};

/// Relatedness of a question to the profile subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Related,
    Unrelated,
}

impl Verdict {
    /// Parse the model's raw reply.
    ///
    /// Unrelated if and only if the trimmed text starts with `UNRELATED`
    /// (case-insensitive). Everything else, including an absent body, is
    /// treated as related: answering a stray off-topic question is cheaper
    /// than wrongly refusing an on-topic one.
    pub fn parse(reply: Option<&str>) -> Self {
        let Some(reply) = reply else {
            return Self::Related;
        };

        if reply.trim().to_uppercase().starts_with("UNRELATED") {
            Self::Unrelated
        } else {
            Self::Related
        }
    }
}

/// Classification pre-step run before the answer stage.
pub struct Classifier {
    client: Arc<CompletionClient>,
    model: String,
}

impl Classifier {
    pub fn new(client: Arc<CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Ask the cheap model whether the question is about the profile.
    ///
    /// Transport failures propagate; only the reply text is interpreted
    /// leniently.
    pub async fn classify(&self, question: &str) -> crate::Result<Verdict> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(CLASSIFIER_SYSTEM_PROMPT),
                ChatMessage::user(question),
            ],
            max_tokens: None,
        };

        let reply = self.client.chat_completion(request).await?;
        let verdict = Verdict::parse(reply.as_deref());

        log::debug!("classified question as {verdict:?}");

        Ok(verdict)
    }
}
