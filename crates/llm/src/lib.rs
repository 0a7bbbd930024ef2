//! Completion-endpoint client and the two LLM stages of the ask pipeline.

mod answerer;
mod classifier;
mod error;
mod http_client;
mod messages;
mod prompts;
mod provider;
mod token_counter;

pub use answerer::Answerer;
pub use classifier::{Classifier, Verdict};
pub use error::{LlmError, LlmResult as Result};
pub use messages::{ChatCompletionRequest, ChatMessage};
pub use provider::CompletionClient;
pub use token_counter::TokenCounter;
